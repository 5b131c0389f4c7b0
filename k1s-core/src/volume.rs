//! Volume sources attachable to a manifest.
use serde::{Deserialize, Serialize};

/// A named volume made available to the containers of a manifest
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    /// Volume name referenced by container mounts
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Where the volume's contents come from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<VolumeSource>,
}

/// The backing source of a [`Volume`].
///
/// Exactly one member should be set; `hostDir` is the only source this API
/// generation supports.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeSource {
    /// A directory on the host node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_dir: Option<HostDir>,
}

/// A host directory volume source
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostDir {
    /// Absolute path on the host
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // the hostDir casing is load-bearing for the server
    #[test]
    fn host_dir_volume_serializes_with_wire_casing() {
        let volume = Volume {
            name: "volname".into(),
            source: Some(VolumeSource {
                host_dir: Some(HostDir {
                    path: "/mnt/mountpoint".into(),
                }),
            }),
        };
        let tree = serde_json::to_value(&volume).unwrap();
        assert_eq!(tree["source"]["hostDir"]["path"], "/mnt/mountpoint");
    }
}
