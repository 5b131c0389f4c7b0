//! Blocking client for a v1beta1-era cluster orchestration API
//!
//! The crate splits along the same seam as the core/client pairing it is
//! built on: [`k1s_core`] describes the wire (resources, endpoint
//! descriptors, codec) while this crate owns the transport. A [`Config`]
//! carries credentials and trust material, a [`Client`] dispatches requests
//! over a pooled HTTPS connection with preemptive basic auth, and [`Api`]
//! exposes the typed create/get/list/delete surface per resource kind.
//!
//! ```no_run
//! use k1s_client::{Api, Client, Config};
//! use k1s_core::Pod;
//!
//! # fn run() -> Result<(), k1s_client::Error> {
//! let config = Config::new("https://192.168.1.100:8443/api/v1beta1", "vagrant", "vagrant");
//! let client = Client::try_from(config)?;
//! let pods: Api<Pod> = Api::new(client);
//! if let Some(pod) = pods.get_opt("kubernetes-test-pod")? {
//!     println!("found {}", pod.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub use api::Api;

pub mod client;
pub use client::Client;

pub mod config;
pub use config::Config;

mod error;
pub use error::{ConfigError, Error};

pub use k1s_core as core;

/// Convenient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
