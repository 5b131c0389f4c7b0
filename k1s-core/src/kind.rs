//! The resource kind discriminant.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to parse kind: {0}")]
/// Failed to parse a kind discriminant.
pub struct ParseKindError(pub String);

/// The discriminant carried by every wire payload in its `kind` field.
///
/// The value space is closed: a payload whose `kind` is not one of these
/// variants cannot be decoded (see [`codec`][crate::codec]).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A single pod
    Pod,
    /// A collection of pods
    PodList,
    /// A replication controller
    ReplicationController,
    /// A collection of replication controllers
    ReplicationControllerList,
    /// A service
    Service,
    /// A collection of services
    ServiceList,
}

impl Kind {
    /// The exact wire string for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Pod => "Pod",
            Kind::PodList => "PodList",
            Kind::ReplicationController => "ReplicationController",
            Kind::ReplicationControllerList => "ReplicationControllerList",
            Kind::Service => "Service",
            Kind::ServiceList => "ServiceList",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "Pod" => Ok(Kind::Pod),
            "PodList" => Ok(Kind::PodList),
            "ReplicationController" => Ok(Kind::ReplicationController),
            "ReplicationControllerList" => Ok(Kind::ReplicationControllerList),
            "Service" => Ok(Kind::Service),
            "ServiceList" => Ok(Kind::ServiceList),
            other => Err(ParseKindError(other.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Kind;

    #[test]
    fn roundtrips_through_display_and_fromstr() {
        for kind in [Kind::Pod, Kind::ReplicationControllerList, Kind::Service] {
            assert_eq!(kind.to_string().parse::<Kind>().unwrap(), kind);
        }
        assert!("Widget".parse::<Kind>().is_err());
    }

    #[test]
    fn serializes_as_the_wire_string() {
        assert_eq!(serde_json::to_string(&Kind::Pod).unwrap(), "\"Pod\"");
        let k: Kind = serde_json::from_str("\"ReplicationController\"").unwrap();
        assert_eq!(k, Kind::ReplicationController);
    }
}
