//! Core types and traits for talking to a v1beta1-era cluster orchestration API
//!
//! This crate is I/O free: it defines the wire-level resource model, the
//! endpoint descriptor table, and the JSON codec that resolves the `kind`
//! discriminant. Requests are built as [`http::Request`] values and handed to
//! a transport (see the `k1s-client` crate) for submission.

pub mod codec;
pub use codec::AnyResource;

mod kind;
pub use kind::{Kind, ParseKindError};

pub mod params;
pub use params::ListParams;

pub mod request;
pub use request::{ops, Endpoint, Endpoints};

mod resource;
pub use resource::{Object, Resource};

pub mod response;
pub use response::Status;

mod controller;
mod pod;
mod service;
mod volume;

pub use controller::{ReplicationController, ReplicationControllerList};
pub use pod::{Container, Manifest, Pod, PodList, Port, Selector, State, StateInfo};
pub use service::{Service, ServiceList};
pub use volume::{HostDir, Volume, VolumeSource};
