//! A basic API client for dispatching endpoint calls.
//!
//! The [`Client`] owns the pooled transport and the dispatch/error-mapping
//! logic. It can be used on its own with the descriptor tables in
//! [`k1s_core::ops`], or through the typed [`Api`][crate::Api] surface.
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use http::StatusCode;
use serde::de::DeserializeOwned;

use k1s_core::{codec, request::Endpoint, response::Status, Object};

use crate::{config::Config, error::ConfigError, Error, Result};

mod tls;

/// Client for connecting with the cluster API.
///
/// Construct one from a [`Config`] via `TryFrom`. The client is cheap to
/// clone: clones share the same connection pool and the same dispatch gate,
/// which are the only state shared between concurrent calls and are
/// internally synchronized. At most `pool_size` calls are in flight at once
/// across all clones; further callers block until a slot frees. Pooled
/// connections are released when the last clone is dropped.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::blocking::Client,
    base_path: String,
    timeout: Option<Duration>,
    gate: Arc<Gate>,
}

impl Client {
    /// Override the request timeout for calls made through this handle.
    ///
    /// Operates on a clone, so a caller can hold one client and derive
    /// per-call deadlines from it. On expiry the in-flight request is
    /// aborted and surfaces as [`Error::Transport`].
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Dispatch one call described by `endpoint` and return the raw body.
    ///
    /// Renders the descriptor's path template with `path_params`, appends
    /// `query`, and submits exactly one request; there are no internal
    /// retries. Blocks while `pool_size` calls are already in flight. Any
    /// status code outside the descriptor's success set is mapped to a typed
    /// error, never returned as data.
    pub fn invoke(
        &self,
        endpoint: &Endpoint,
        path_params: &[(&str, &str)],
        query: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<String> {
        let req = endpoint
            .request(path_params, query, body)
            .map_err(Error::BuildRequest)?;
        let (parts, body) = req.into_parts();
        let url = format!("{}{}", self.base_path, parts.uri);
        tracing::debug!(method = %parts.method, %url, "requesting");

        let mut req = self
            .http
            .request(parts.method, &url)
            .headers(parts.headers)
            .body(body);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        // held until the body is consumed, matching the connection lease
        let _permit = self.gate.acquire();
        let res = req.send().map_err(Error::Transport)?;
        let code = res.status();
        let text = res.text().map_err(Error::Transport)?;
        handle_api_errors(endpoint, code, &text)?;
        Ok(text)
    }

    /// Dispatch a call and parse the response into some known type
    pub fn request<T>(
        &self,
        endpoint: &Endpoint,
        path_params: &[(&str, &str)],
        query: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let text = self.invoke(endpoint, path_params, query, body)?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("{}, {:?}", text, e);
            Error::SerdeError(e)
        })
    }

    /// Dispatch a call and decode the response through the kind-checking
    /// codec
    pub fn request_object<K>(
        &self,
        endpoint: &Endpoint,
        path_params: &[(&str, &str)],
        query: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<K>
    where
        K: Object,
    {
        let text = self.invoke(endpoint, path_params, query, body)?;
        codec::decode(text.as_bytes()).map_err(|e| {
            tracing::warn!("{}, {:?}", text, e);
            Error::Codec(e)
        })
    }
}

/// Counting gate bounding leased connections.
///
/// Shared by every clone of a [`Client`]. A caller past the limit parks on
/// the condvar until an earlier call releases its permit, the behavior of a
/// pooled connection manager with a fixed lease limit.
#[derive(Debug)]
struct Gate {
    available: Mutex<usize>,
    freed: Condvar,
}

impl Gate {
    fn new(permits: usize) -> Self {
        Gate {
            available: Mutex::new(permits),
            freed: Condvar::new(),
        }
    }

    fn acquire(&self) -> Permit<'_> {
        let mut available = lock(&self.available);
        while *available == 0 {
            available = self
                .freed
                .wait(available)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *available -= 1;
        Permit { gate: self }
    }
}

/// Returns its slot on drop, covering every exit path of a dispatch
struct Permit<'a> {
    gate: &'a Gate,
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        *lock(&self.gate.available) += 1;
        self.gate.freed.notify_one();
    }
}

// a poisoned counter is still a valid counter
fn lock(m: &Mutex<usize>) -> MutexGuard<'_, usize> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Server returned error handling
///
/// A response outside the descriptor's success set either carries a decodable
/// [`Status`] payload, or something we could not parse as one (an empty body,
/// a proxy's HTML page). In either case exactly one typed error reaches the
/// caller; 404 keeps its own variant so reads can treat absence as data.
fn handle_api_errors(endpoint: &Endpoint, code: StatusCode, text: &str) -> Result<()> {
    if endpoint.accepts(code.as_u16()) {
        return Ok(());
    }
    let status = parse_status(text);
    if code == StatusCode::NOT_FOUND {
        tracing::debug!("not found: {:?}", status);
        return Err(Error::NotFound { status });
    }
    match &status {
        Some(s) => tracing::debug!("unsuccessful: {:?}", s),
        None => tracing::warn!("unsuccessful, undecodable error body: {}", text),
    }
    Err(Error::Api {
        code: code.as_u16(),
        status,
    })
}

/// Decode an error body as a [`Status`] if it plausibly is one.
///
/// The server does not tag every failure body with a kind, so any JSON
/// object carrying at least one status field counts; everything else yields
/// `None` and the caller keeps the raw code.
fn parse_status(text: &str) -> Option<Status> {
    let v: serde_json::Value = serde_json::from_str(text).ok()?;
    let obj = v.as_object()?;
    if !["code", "status", "message"].iter().any(|k| obj.contains_key(*k)) {
        return None;
    }
    serde_json::from_value(v).ok()
}

impl TryFrom<Config> for Client {
    type Error = Error;

    /// Build a pooled client from a [`Config`].
    ///
    /// Validates the pool size (zero is rejected, not clamped), pre-stages
    /// the basic-auth header on every request, and installs the pinning
    /// verifier when the config carries trust material.
    fn try_from(config: Config) -> Result<Self> {
        if config.pool_size == 0 {
            return Err(Error::Config(ConfigError::InvalidPoolSize(config.pool_size)));
        }

        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            config.basic_auth_header().map_err(Error::Config)?,
        );

        let mut builder = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(config.pool_size);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(der) = config.pinned_der() {
            let tls = tls::pinned_client_config(der.to_vec()).map_err(Error::Config)?;
            builder = builder.use_preconfigured_tls(tls);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Config(ConfigError::BuildClient(e)))?;

        Ok(Client {
            http,
            base_path: config.base_path,
            timeout: None,
            gate: Arc::new(Gate::new(config.pool_size)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k1s_core::ops;

    fn config() -> Config {
        Config::new("https://192.168.1.100:8443/api/v1beta1", "vagrant", "vagrant")
    }

    #[test]
    fn zero_pool_size_is_rejected_at_construction() {
        let err = Client::try_from(config().pool_size(0)).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidPoolSize(0))
        ));
    }

    #[test]
    fn positive_pool_sizes_build() {
        for n in [1, 4, 20] {
            assert!(Client::try_from(config().pool_size(n)).is_ok());
        }
    }

    #[test]
    fn a_pinned_client_builds() {
        let config = config()
            .pinned_certificate(crate::config::tests::TEST_CERT)
            .unwrap();
        assert!(Client::try_from(config).is_ok());
    }

    #[test]
    fn in_flight_dispatch_is_bounded_by_the_pool_size() {
        let gate = Gate::new(1);
        let held = gate.acquire();
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::scope(|s| {
            s.spawn(|| {
                let _permit = gate.acquire();
                tx.send(()).unwrap();
            });
            // the second caller stays parked while the permit is held
            assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
            drop(held);
            assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
        });
    }

    #[test]
    fn permits_are_returned_on_drop() {
        let gate = Gate::new(2);
        let first = gate.acquire();
        let second = gate.acquire();
        assert_eq!(*lock(&gate.available), 0);
        drop(first);
        drop(second);
        assert_eq!(*lock(&gate.available), 2);
    }

    #[test]
    fn clones_share_one_dispatch_gate() {
        let client = Client::try_from(config().pool_size(1)).unwrap();
        let derived = client.clone().with_timeout(Duration::from_secs(1));
        assert!(Arc::ptr_eq(&client.gate, &derived.gate));
    }

    #[test]
    fn not_found_maps_to_its_own_error_regardless_of_body() {
        for body in ["", "plain text", r#"{"code":404,"message":"pod not found"}"#] {
            let err = handle_api_errors(&ops::GET_POD, StatusCode::NOT_FOUND, body).unwrap_err();
            assert!(err.is_not_found());
        }
    }

    #[test]
    fn not_found_keeps_a_decodable_status() {
        let body = r#"{"kind":"Status","status":"Failure","code":404,"message":"not found"}"#;
        let err = handle_api_errors(&ops::GET_POD, StatusCode::NOT_FOUND, body).unwrap_err();
        assert_eq!(err.status().unwrap().code, 404);
    }

    #[test]
    fn conflict_with_status_body_is_decoded() {
        let body = r#"{"code":409,"message":"already exists"}"#;
        let err = handle_api_errors(&ops::CREATE_POD, StatusCode::CONFLICT, body).unwrap_err();
        match err {
            Error::Api { code: 409, status: Some(status) } => {
                assert_eq!(status.code, 409);
                assert_eq!(status.message, "already exists");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn undecodable_error_body_keeps_the_raw_code() {
        let body = "<html>Internal Server Error</html>";
        let err =
            handle_api_errors(&ops::GET_POD, StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
        assert!(err.status().is_none());
        match err {
            Error::Api { code: 500, status: None } => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn success_codes_outside_the_descriptor_set_are_rejected() {
        let err = handle_api_errors(&ops::GET_POD, StatusCode::NO_CONTENT, "").unwrap_err();
        assert!(matches!(err, Error::Api { code: 204, .. }));
    }

    #[test]
    fn success_codes_in_the_descriptor_set_pass_through() {
        assert!(handle_api_errors(&ops::CREATE_POD, StatusCode::ACCEPTED, "{}").is_ok());
        assert!(handle_api_errors(&ops::GET_POD, StatusCode::OK, "{}").is_ok());
    }
}
