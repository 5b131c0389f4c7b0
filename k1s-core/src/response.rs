//! Generic api response types
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A status object produced by the server.
///
/// Returned as the body of failure responses and by delete operations; never
/// fabricated by the client. On failures, `code` mirrors the HTTP status and
/// `message`/`reason`/`details` explain the rejection.
#[derive(Error, Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[error("{message}: {reason}")]
#[serde(default)]
pub struct Status {
    /// Overall outcome, `Success` or `Failure`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Suggested HTTP return code (0 if unset)
    #[serde(skip_serializing_if = "is_u16_zero")]
    pub code: u16,
    /// A human-readable description of the status of this operation
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// A machine-readable description of why the operation failed
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
    /// Extended data associated with the reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<StatusDetails>,
}

/// Structured cause detail on a [`Status`]
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StatusDetails {
    /// Identifier of the resource the status describes
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Kind of the resource the status describes
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// More detail associated with the failure
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<StatusCause>,
}

/// One cause of a failure [`Status`]
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StatusCause {
    /// A machine-readable description of the cause
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
    /// A human-readable description of the cause
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// The field of the resource that caused the error, if any
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
}

fn is_u16_zero(&v: &u16) -> bool {
    v == 0
}

#[cfg(test)]
mod tests {
    use super::Status;

    #[test]
    fn conflict_status_deserializes() {
        let body = r#"{"kind":"Status","apiVersion":"v1beta1","status":"Failure","message":"pod \"kubernetes-test-pod\" already exists","reason":"AlreadyExists","code":409,"details":{"id":"kubernetes-test-pod","kind":"pods"}}"#;
        let status: Status = serde_json::from_str(body).unwrap();
        assert_eq!(status.code, 409);
        assert_eq!(status.details.unwrap().id, "kubernetes-test-pod");
    }

    #[test]
    fn delete_success_status_deserializes_without_a_code() {
        let body = r#"{"kind":"Status","apiVersion":"v1beta1","status":"Success"}"#;
        let status: Status = serde_json::from_str(body).unwrap();
        assert_eq!(status.status, "Success");
        assert_eq!(status.code, 0);
    }
}
