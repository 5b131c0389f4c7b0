//! POST/GET/PUT/DELETE abstractions
use k1s_core::{codec, ops, ListParams, ReplicationController, Resource, State, Status};

use crate::{api::Api, Error, Result};

impl<K: Resource> Api<K> {
    /// Submit a new resource and return the server's echo of it.
    ///
    /// The id is caller-assigned; submitting an id that already exists is
    /// rejected by the server (conflict), surfaced as [`Error::Api`].
    pub fn create(&self, data: &K) -> Result<K> {
        let body = codec::encode(data).map_err(Error::Codec)?;
        self.client
            .request_object(K::ENDPOINTS.create, &[], &[], Some(body))
    }

    /// Get a named resource.
    ///
    /// Assumes the object is expected to exist; a 404 surfaces as
    /// [`Error::NotFound`]. Use [`Api::get_opt`] when absence is a normal
    /// outcome.
    pub fn get(&self, id: &str) -> Result<K> {
        self.client
            .request_object(K::ENDPOINTS.get, &[("id", id)], &[], None)
    }

    /// Get a named resource if it exists.
    ///
    /// The read contract for this API: 404 on a get means "not present" and
    /// is returned as `Ok(None)` rather than propagated as an error. All
    /// other failures propagate unchanged.
    pub fn get_opt(&self, id: &str) -> Result<Option<K>> {
        match self.get(id) {
            Ok(obj) => Ok(Some(obj)),
            Err(Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// List the collection, optionally restricted by a label selector
    pub fn list(&self, lp: &ListParams) -> Result<K::List> {
        self.client
            .request_object(K::ENDPOINTS.list, &[], &lp.query_pairs(), None)
    }

    /// Delete a named resource, returning the server's [`Status`].
    ///
    /// Deleting an id that does not exist is [`Error::NotFound`].
    pub fn delete(&self, id: &str) -> Result<Status> {
        self.client
            .request(K::ENDPOINTS.delete, &[("id", id)], &[], None)
    }
}

/// Scale operations on controllers
impl Api<ReplicationController> {
    /// Set the controller's target replica count.
    ///
    /// Read-modify-write: fetches the controller, updates
    /// `desiredState.replicas` and replaces it. The count is validated by
    /// the server, not client-side, so e.g. a negative target surfaces as
    /// [`Error::Api`].
    pub fn resize(&self, id: &str, replicas: i32) -> Result<ReplicationController> {
        let mut controller = self.get(id)?;
        controller
            .desired_state
            .get_or_insert_with(State::default)
            .replicas = Some(replicas);
        let body = codec::encode(&controller).map_err(Error::Codec)?;
        self.client.request_object(
            &ops::UPDATE_REPLICATION_CONTROLLER,
            &[("id", id)],
            &[],
            Some(body),
        )
    }
}
