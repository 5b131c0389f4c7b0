//! Traits binding model types to their wire representation.
use serde::{de::DeserializeOwned, Serialize};

use crate::{kind::Kind, request::Endpoints};

/// A payload that carries a `kind` discriminant on the wire.
///
/// Implementors do not store the discriminant as a field; the
/// [`codec`][crate::codec] injects it on encode and strips it on decode.
pub trait Object: Serialize + DeserializeOwned {
    /// The discriminant value this payload is tagged with
    const KIND: Kind;
}

/// A resource the cluster manages as a named collection.
///
/// Binds a model type to the [`Endpoints`] table describing its HTTP
/// operations, and to the list payload returned when enumerating it.
pub trait Resource: Object + Clone + std::fmt::Debug {
    /// The payload returned when listing this resource
    type List: Object;

    /// The operation table for this resource's collection
    const ENDPOINTS: Endpoints;

    /// The caller-assigned identifier, unique per kind within a cluster
    fn id(&self) -> &str;
}
