//! API helpers for structured interaction with the cluster API

mod core_methods;

use crate::Client;

// Re-exports from k1s-core
pub use k1s_core::{
    AnyResource, Kind, ListParams, Object, Pod, ReplicationController, Resource, Service, Status,
};

/// The generic Api abstraction.
///
/// Pairs a [`Client`] with a [`Resource`] implementor `K` so calls get
/// automatic encoding/decoding through the kind-checking codec and the
/// endpoint table bound to `K`.
#[derive(Clone)]
pub struct Api<K> {
    pub(crate) client: Client,
    /// Note: Using `iter::Empty` over `PhantomData`, because we never actually keep any
    /// `K` objects, so `Empty` better models our constraints (in particular, `Empty<K>`
    /// is `Send`, even if `K` may not be).
    pub(crate) _phantom: std::iter::Empty<K>,
}

impl<K: Resource> Api<K> {
    /// Typed access to `K`'s collection through `client`
    pub fn new(client: Client) -> Self {
        Api {
            client,
            _phantom: std::iter::empty(),
        }
    }

    /// Consume self and return the [`Client`]
    pub fn into_client(self) -> Client {
        self.client
    }
}
