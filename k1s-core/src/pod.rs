//! The pod model and the state/manifest types shared with controllers.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    kind::Kind,
    request::{ops, Endpoints},
    resource::{Object, Resource},
    volume::Volume,
};

/// A single schedulable unit of one or more containers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pod {
    /// Caller-assigned identifier, unique among pods in the cluster
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Free-form labels used by selectors
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// The state the caller wants the cluster to converge on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_state: Option<State>,
    /// The state last observed by the cluster; server-populated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_state: Option<State>,
}

impl Pod {
    /// New named pod with no state
    pub fn new(id: impl Into<String>) -> Self {
        Pod {
            id: id.into(),
            ..Pod::default()
        }
    }
}

impl Object for Pod {
    const KIND: Kind = Kind::Pod;
}

impl Resource for Pod {
    type List = PodList;

    const ENDPOINTS: Endpoints = Endpoints {
        create: &ops::CREATE_POD,
        get: &ops::GET_POD,
        list: &ops::LIST_PODS,
        delete: &ops::DELETE_POD,
    };

    fn id(&self) -> &str {
        &self.id
    }
}

/// A collection of pods as returned by the list operation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodList {
    /// The pods in the collection
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Pod>,
}

impl PodList {
    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Object for PodList {
    const KIND: Kind = Kind::PodList;
}

/// Desired or observed state of a pod or replication controller.
///
/// The same shape serves both sides of the convergence loop: callers fill in
/// `manifest` (pods) or `replicas`/`replica_selector`/`pod_template`
/// (controllers); the server reports `status`, `host` and per-container
/// `info` on the observed side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct State {
    /// The container manifest to run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Manifest>,
    /// Lifecycle phase, e.g. `Waiting`, `Running`, `Terminated`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Node the pod was scheduled onto
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Address of the scheduled node
    #[serde(rename = "hostIP", skip_serializing_if = "Option::is_none")]
    pub host_ip: Option<String>,
    /// Per-container runtime detail, keyed by container name (plus `net`)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub info: BTreeMap<String, StateInfo>,
    /// Target replica count (controllers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    /// Selector matching the pods the controller owns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_selector: Option<Selector>,
    /// Template stamped out for each replica
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_template: Option<Box<Pod>>,
}

impl State {
    /// Runtime detail for a named container
    pub fn info(&self, container: &str) -> Option<&StateInfo> {
        self.info.get(container)
    }

    /// Runtime detail for the pod network
    pub fn net_info(&self) -> Option<&StateInfo> {
        self.info.get("net")
    }
}

/// Runtime detail the server reports for one container
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateInfo {
    /// Condition name (`running`, `waiting`, ...) to opaque detail
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub state: BTreeMap<String, Value>,
    /// Times the container was restarted
    #[serde(rename = "restartCount", skip_serializing_if = "Option::is_none")]
    pub restart_count: Option<u32>,
}

impl StateInfo {
    /// Detail for a named condition, if the container is in it
    pub fn state(&self, which: &str) -> Option<&Value> {
        self.state.get(which)
    }
}

/// The container manifest carried in a pod's desired state
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Manifest {
    /// Manifest schema version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Manifest identifier, conventionally the pod id
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// The containers to run
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<Container>,
    /// Volumes available to the containers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
}

/// One container within a manifest
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Container {
    /// Container name, unique within the manifest
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Image to run
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    /// Entrypoint command and arguments
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    /// Ports exposed by the container
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
}

/// A port mapping on a container
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Port {
    /// Optional port name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Port the container listens on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_port: Option<i32>,
    /// Port exposed on the host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_port: Option<i32>,
    /// Host address to bind, defaults to all interfaces
    #[serde(rename = "hostIP", skip_serializing_if = "Option::is_none")]
    pub host_ip: Option<String>,
    /// Protocol, `TCP` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl Port {
    /// Map `container_port` on the container to `host_port` on `host_ip`
    pub fn new(container_port: i32, host_port: i32, host_ip: impl Into<String>) -> Self {
        Port {
            container_port: Some(container_port),
            host_port: Some(host_port),
            host_ip: Some(host_ip.into()),
            ..Port::default()
        }
    }
}

/// A named label selector
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selector {
    /// The `name` label value to match
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_state_is_omitted_on_the_wire() {
        let pod = Pod::new("kubernetes-test-pod");
        let json = serde_json::to_value(&pod).unwrap();
        assert_eq!(json, serde_json::json!({"id": "kubernetes-test-pod"}));
    }

    #[test]
    fn observed_state_info_is_reachable_by_container_name() {
        let body = serde_json::json!({
            "status": "Running",
            "host": "node-1",
            "hostIP": "192.168.1.100",
            "info": {
                "master": { "state": { "running": { "startedAt": "2015-01-01T00:00:00Z" } } },
                "net": { "state": { "running": {} } }
            }
        });
        let state: State = serde_json::from_value(body).unwrap();
        assert!(state.info("master").unwrap().state("running").is_some());
        assert!(state.info("master").unwrap().state("waiting").is_none());
        assert!(state.net_info().unwrap().state("running").is_some());
    }

    #[test]
    fn unknown_fields_are_ignored_for_forward_compatibility() {
        let body = serde_json::json!({
            "id": "kubernetes-test-pod",
            "creationTimestamp": "2015-01-01T00:00:00Z",
            "resourceVersion": 17
        });
        let pod: Pod = serde_json::from_value(body).unwrap();
        assert_eq!(pod.id, "kubernetes-test-pod");
    }
}
