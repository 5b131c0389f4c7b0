//! The replication controller model.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    kind::Kind,
    pod::State,
    request::{ops, Endpoints},
    resource::{Object, Resource},
};

/// A controller that keeps a target number of pod replicas running.
///
/// The target count lives in `desired_state.replicas`; changing it is done by
/// replacing the whole controller (see `Api::resize` in the client crate).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReplicationController {
    /// Caller-assigned identifier, unique among controllers in the cluster
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Free-form labels used by selectors
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Replica count, selector and pod template to converge on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_state: Option<State>,
    /// The state last observed by the cluster; server-populated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_state: Option<State>,
}

impl ReplicationController {
    /// New named controller with no state
    pub fn new(id: impl Into<String>) -> Self {
        ReplicationController {
            id: id.into(),
            ..ReplicationController::default()
        }
    }

    /// The current target replica count, if a desired state is set
    pub fn replicas(&self) -> Option<i32> {
        self.desired_state.as_ref().and_then(|s| s.replicas)
    }
}

impl Object for ReplicationController {
    const KIND: Kind = Kind::ReplicationController;
}

impl Resource for ReplicationController {
    type List = ReplicationControllerList;

    const ENDPOINTS: Endpoints = Endpoints {
        create: &ops::CREATE_REPLICATION_CONTROLLER,
        get: &ops::GET_REPLICATION_CONTROLLER,
        list: &ops::LIST_REPLICATION_CONTROLLERS,
        delete: &ops::DELETE_REPLICATION_CONTROLLER,
    };

    fn id(&self) -> &str {
        &self.id
    }
}

/// A collection of replication controllers as returned by the list operation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplicationControllerList {
    /// The controllers in the collection
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ReplicationController>,
}

impl Object for ReplicationControllerList {
    const KIND: Kind = Kind::ReplicationControllerList;
}
