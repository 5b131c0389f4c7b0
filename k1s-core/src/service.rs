//! The service model.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    kind::Kind,
    pod::Selector,
    request::{ops, Endpoints},
    resource::{Object, Resource},
};

/// A stable endpoint load-balancing over the pods a selector matches
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Service {
    /// Caller-assigned identifier, unique among services in the cluster
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Human-readable service name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Free-form labels on the service itself
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Port the service listens on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    /// Target port on the selected pods; a number or a named port
    #[serde(skip_serializing_if = "String::is_empty")]
    pub container_port: String,
    /// Selector picking the pods behind the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<Selector>,
}

impl Service {
    /// New named service with no selector
    pub fn new(id: impl Into<String>) -> Self {
        Service {
            id: id.into(),
            ..Service::default()
        }
    }
}

impl Object for Service {
    const KIND: Kind = Kind::Service;
}

impl Resource for Service {
    type List = ServiceList;

    const ENDPOINTS: Endpoints = Endpoints {
        create: &ops::CREATE_SERVICE,
        get: &ops::GET_SERVICE,
        list: &ops::LIST_SERVICES,
        delete: &ops::DELETE_SERVICE,
    };

    fn id(&self) -> &str {
        &self.id
    }
}

/// A collection of services as returned by the list operation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceList {
    /// The services in the collection
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Service>,
}

impl Object for ServiceList {
    const KIND: Kind = Kind::ServiceList;
}
