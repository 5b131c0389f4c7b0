//! Credentials and trust material for a client.
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use http::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::ConfigError;

/// Pool limit used when the caller does not pick one
pub const DEFAULT_POOL_SIZE: usize = 4;

/// Connection settings for a [`Client`][crate::Client].
///
/// Immutable once the client is built: credentials and trust material cannot
/// be swapped mid-life, only by constructing a new client. Building a
/// `Config` performs no network I/O.
#[derive(Clone)]
pub struct Config {
    /// Base path of the API, e.g. `https://host:8443/api/v1beta1`
    pub base_path: String,
    /// Username for basic authentication
    pub username: String,
    password: SecretString,
    pinned_certificate: Option<Vec<u8>>,
    /// Maximum concurrently leased connections; calls past the limit block.
    /// Validated at client construction
    pub pool_size: usize,
    /// Whole-request timeout; the transport default (30s) when unset
    pub timeout: Option<Duration>,
}

impl Config {
    /// Configure a client for `base_url` with basic-auth credentials.
    ///
    /// A trailing slash on `base_url` is normalized away; endpoint paths all
    /// start with one.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Config {
            base_path: base_url.trim_end_matches('/').to_string(),
            username: username.into(),
            password: SecretString::from(password.into()),
            pinned_certificate: None,
            pool_size: DEFAULT_POOL_SIZE,
            timeout: None,
        }
    }

    /// Pin the server certificate to the one in `pem`.
    ///
    /// Parses a single X.509 certificate from the PEM text immediately; an
    /// empty or malformed input is a [`ConfigError`], never a silent
    /// fallback to the platform trust roots. The payload is parsed as DER
    /// too, so a certificate-framed block wrapping other data fails here
    /// rather than at handshake time. Connections will accept exactly this
    /// certificate and nothing else (no chain building).
    pub fn pinned_certificate(mut self, pem: &str) -> Result<Self, ConfigError> {
        let mut reader = pem.as_bytes();
        let der = match rustls_pemfile::certs(&mut reader).next() {
            Some(Ok(der)) => {
                rustls::server::ParsedCertificate::try_from(&der)
                    .map_err(|e| ConfigError::InvalidCertificate(e.to_string()))?;
                der.as_ref().to_vec()
            }
            Some(Err(e)) => return Err(ConfigError::ParseCertificate(e)),
            None => return Err(ConfigError::MissingCertificate),
        };
        self.pinned_certificate = Some(der);
        Ok(self)
    }

    /// Set the connection-pool limit, bounding both in-flight calls and
    /// idle kept-alive connections
    #[must_use]
    pub fn pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Set the whole-request timeout applied to every call
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The preemptive `Authorization` header for these credentials.
    ///
    /// Attached to every request up front rather than waiting for a server
    /// challenge, which saves the unauthorized round trip of reactive basic
    /// auth.
    pub(crate) fn basic_auth_header(&self) -> Result<HeaderValue, ConfigError> {
        let encoded = BASE64.encode(format!(
            "{}:{}",
            self.username,
            self.password.expose_secret()
        ));
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|_| ConfigError::InvalidCredentials)?;
        value.set_sensitive(true);
        Ok(value)
    }

    pub(crate) fn pinned_der(&self) -> Option<&[u8]> {
        self.pinned_certificate.as_deref()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_path", &self.base_path)
            .field("username", &self.username)
            .field("pinned", &self.pinned_certificate.is_some())
            .field("pool_size", &self.pool_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    // self-signed fixture also used by the client tests
    pub(crate) const TEST_CERT: &str = "-----BEGIN CERTIFICATE-----
MIIBjjCCATOgAwIBAgIUPl27MGEhEYmvKvsIo7iw+6RwOEUwCgYIKoZIzj0EAwIw
HDEaMBgGA1UEAwwRa3ViZXJuZXRlcy1tYXN0ZXIwHhcNMjYwODI5MDk0NzAyWhcN
MzYwODI2MDk0NzAyWjAcMRowGAYDVQQDDBFrdWJlcm5ldGVzLW1hc3RlcjBZMBMG
ByqGSM49AgEGCCqGSM49AwEHA0IABH9fjGdIuDmK2PxdEDXesY1sUVKAPDt6vs/T
EDrgFF4pbHqMx67nBObjWDYxwjS0EbK2X43ts7avdRZiJPelatajUzBRMB0GA1Ud
DgQWBBTO0zhxMRSaXGiKD8RMX5KHYLfbnDAfBgNVHSMEGDAWgBTO0zhxMRSaXGiK
D8RMX5KHYLfbnDAPBgNVHRMBAf8EBTADAQH/MAoGCCqGSM49BAMCA0kAMEYCIQC4
vUpVx3EQSZWcmxw7LNr8Hvn6pr9ff/wdcit3LbEsTAIhAMvkYdp3GCGdAlgTKF2+
PwWKYa1b5grmd+l6A806rqh6
-----END CERTIFICATE-----
";

    fn config() -> Config {
        Config::new("http://192.168.1.100:8080/api/v1beta1/", "vagrant", "vagrant")
    }

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(config().base_path, "http://192.168.1.100:8080/api/v1beta1");
    }

    #[test]
    fn basic_auth_header_is_preemptive_and_sensitive() {
        let header = config().basic_auth_header().unwrap();
        assert!(header.is_sensitive());
        // "vagrant:vagrant"
        assert_eq!(header.to_str().unwrap(), "Basic dmFncmFudDp2YWdyYW50");
    }

    #[test]
    fn a_valid_pem_certificate_is_accepted() {
        let config = config().pinned_certificate(TEST_CERT).unwrap();
        assert!(config.pinned_der().is_some());
    }

    #[test]
    fn empty_pem_input_is_a_configuration_error() {
        let err = config().pinned_certificate("").unwrap_err();
        assert!(matches!(err, ConfigError::MissingCertificate));
    }

    #[test]
    fn truncated_pem_input_is_a_configuration_error() {
        let truncated = &TEST_CERT[..200];
        let err = config().pinned_certificate(truncated).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ParseCertificate(_) | ConfigError::MissingCertificate
        ));
    }

    #[test]
    fn garbage_pem_input_is_a_configuration_error() {
        assert!(config().pinned_certificate("not a certificate").is_err());
    }

    #[test]
    fn certificate_framing_around_a_non_certificate_payload_is_rejected() {
        // well-formed PEM, but the base64 decodes to three zero bytes
        let pem = "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n";
        let err = config().pinned_certificate(pem).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCertificate(_)));
    }
}
