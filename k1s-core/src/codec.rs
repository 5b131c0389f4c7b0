//! JSON codec resolving the `kind` discriminant.
//!
//! Model structs do not carry their discriminant as a field. [`encode`]
//! injects it into the serialized object and [`decode`] inspects it before
//! deserializing, so a payload of the wrong kind fails loudly instead of
//! producing a defaulted object. A missing discriminant and an unrecognized
//! one are distinct errors: the former is a malformed payload, the latter may
//! be a forward-compatibility gap.
use serde_json::Value;
use thiserror::Error;

use crate::{
    controller::ReplicationController, kind::Kind, pod::Pod, resource::Object, service::Service,
};

/// Possible errors when encoding or decoding payloads
#[derive(Debug, Error)]
pub enum Error {
    /// The payload has no `kind` discriminant
    #[error("payload is missing its \"kind\" discriminant")]
    MissingKind,

    /// The payload's `kind` is not one the expected family accepts
    #[error("payload kind {0:?} does not match any expected kind")]
    UnknownKind(String),

    /// The payload body did not match the shape its kind implies
    #[error("failed to interpret payload: {0}")]
    Json(#[source] serde_json::Error),
}

/// Serialize a resource, always emitting its `kind` discriminant
pub fn encode<K: Object>(resource: &K) -> Result<Vec<u8>, Error> {
    let value = serde_json::to_value(resource).map_err(Error::Json)?;
    let Value::Object(mut obj) = value else {
        // all Object impls are structs; anything else cannot carry a kind
        return Err(Error::MissingKind);
    };
    obj.insert("kind".into(), Value::String(K::KIND.to_string()));
    serde_json::to_vec(&Value::Object(obj)).map_err(Error::Json)
}

/// Deserialize a payload after verifying its `kind` discriminant
pub fn decode<K: Object>(data: &[u8]) -> Result<K, Error> {
    let mut value: Value = serde_json::from_slice(data).map_err(Error::Json)?;
    let kind = take_kind(&mut value)?;
    if kind != K::KIND.as_str() {
        return Err(Error::UnknownKind(kind));
    }
    serde_json::from_value(value).map_err(Error::Json)
}

/// A creatable resource decoded without foreknowledge of its kind
#[derive(Clone, Debug, PartialEq)]
pub enum AnyResource {
    /// A pod
    Pod(Pod),
    /// A replication controller
    ReplicationController(ReplicationController),
    /// A service
    Service(Service),
}

impl AnyResource {
    /// The discriminant of the wrapped resource
    pub fn kind(&self) -> Kind {
        match self {
            AnyResource::Pod(_) => Kind::Pod,
            AnyResource::ReplicationController(_) => Kind::ReplicationController,
            AnyResource::Service(_) => Kind::Service,
        }
    }

    /// The wrapped resource's identifier
    pub fn id(&self) -> &str {
        match self {
            AnyResource::Pod(p) => &p.id,
            AnyResource::ReplicationController(rc) => &rc.id,
            AnyResource::Service(s) => &s.id,
        }
    }
}

/// Decode a payload into whichever creatable resource its `kind` names
pub fn decode_any(data: &[u8]) -> Result<AnyResource, Error> {
    let mut value: Value = serde_json::from_slice(data).map_err(Error::Json)?;
    let kind = take_kind(&mut value)?;
    match kind.parse::<Kind>() {
        Ok(Kind::Pod) => serde_json::from_value(value)
            .map(AnyResource::Pod)
            .map_err(Error::Json),
        Ok(Kind::ReplicationController) => serde_json::from_value(value)
            .map(AnyResource::ReplicationController)
            .map_err(Error::Json),
        Ok(Kind::Service) => serde_json::from_value(value)
            .map(AnyResource::Service)
            .map_err(Error::Json),
        _ => Err(Error::UnknownKind(kind)),
    }
}

/// Serialize a resource of runtime-determined kind
pub fn encode_any(resource: &AnyResource) -> Result<Vec<u8>, Error> {
    match resource {
        AnyResource::Pod(p) => encode(p),
        AnyResource::ReplicationController(rc) => encode(rc),
        AnyResource::Service(s) => encode(s),
    }
}

fn take_kind(value: &mut Value) -> Result<String, Error> {
    let obj = value.as_object_mut().ok_or(Error::MissingKind)?;
    match obj.remove("kind") {
        Some(Value::String(kind)) if !kind.is_empty() => Ok(kind),
        Some(Value::Null) | None => Err(Error::MissingKind),
        Some(other) => Err(Error::UnknownKind(other.to_string())),
    }
}
