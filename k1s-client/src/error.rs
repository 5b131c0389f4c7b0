//! Error handling in [`k1s_client`][crate]
use thiserror::Error;

pub use k1s_core::response::Status;

/// Possible errors when working with [`k1s_client`][crate]
#[derive(Error, Debug)]
pub enum Error {
    /// The server rejected the request with a non-success code.
    ///
    /// `status` carries the server's decoded [`Status`] when the response
    /// body contained one; `code` is always the raw HTTP status.
    #[error("server rejected request (http {code})")]
    Api {
        /// The HTTP status code of the rejection
        code: u16,
        /// The server's status payload, when it sent a decodable one
        status: Option<Status>,
    },

    /// The server responded 404.
    ///
    /// Kept apart from [`Error::Api`] so callers can treat "resource absent"
    /// differently from "request rejected"; see `Api::get_opt`.
    #[error("the server could not find the requested resource")]
    NotFound {
        /// The server's status payload, when it sent a decodable one
        status: Option<Status>,
    },

    /// No usable response: connection failure, TLS negotiation failure
    /// (including a pinned-certificate mismatch) or timeout
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// A payload could not be encoded, or a response body did not carry the
    /// expected kind discriminant
    #[error("codec error: {0}")]
    Codec(#[source] k1s_core::codec::Error),

    /// Common error case when parsing a response into own structs
    #[error("error deserializing response: {0}")]
    SerdeError(#[source] serde_json::Error),

    /// Failed to build request
    #[error("failed to build request: {0}")]
    BuildRequest(#[source] k1s_core::request::Error),

    /// Client construction was misconfigured
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// The server's [`Status`] for this error, when one was decoded.
    ///
    /// Lets callers inspect the server's code/message without parsing
    /// display text.
    pub fn status(&self) -> Option<&Status> {
        match self {
            Error::Api { status, .. } | Error::NotFound { status } => status.as_ref(),
            _ => None,
        }
    }

    /// Whether this error is a 404 from the server
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

#[derive(Error, Debug)]
/// Possible errors when building a [`Config`][crate::Config] or
/// [`Client`][crate::Client]
pub enum ConfigError {
    /// The pooled-connection limit must be at least 1
    #[error("invalid connection pool size: {0}")]
    InvalidPoolSize(usize),

    /// The supplied PEM text contained no X.509 certificate
    #[error("no X.509 certificate found in the provided PEM input")]
    MissingCertificate,

    /// The supplied PEM text could not be parsed as a certificate
    #[error("failed to parse the provided PEM certificate: {0}")]
    ParseCertificate(#[source] std::io::Error),

    /// The PEM payload was not a parseable X.509 certificate
    #[error("invalid X.509 certificate in the provided PEM input: {0}")]
    InvalidCertificate(String),

    /// The username or password cannot be carried in an http header
    #[error("credentials are not representable as a basic auth header")]
    InvalidCredentials,

    /// An error with configuring SSL occured
    #[error("SslError: {0}")]
    SslError(String),

    /// The underlying http client could not be initialized
    #[error("failed to initialize http client: {0}")]
    BuildClient(#[source] reqwest::Error),
}
