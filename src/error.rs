//! Error types for the Casdoor provider.

use thiserror::Error;

use crate::schema::Diagnostic;
use crate::types::InstanceState;

/// Errors that can occur while managing Casdoor resources.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An identifier or import string did not have the expected shape.
    #[error("Invalid identifier: expected format \"{expected}\", got \"{actual}\"")]
    InvalidIdentifier {
        /// The format the caller should have used.
        expected: &'static str,
        /// The string that was received.
        actual: String,
    },

    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A validation error occurred.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A configuration error occurred.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested resource type is unknown.
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// The HTTP request could not be completed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote system could not be reached.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The remote system answered with something other than an API response.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The remote system processed the request and refused it.
    #[error("Operation {operation} rejected for {resource}: {message}")]
    Rejected {
        /// The API operation, e.g. `add-user`.
        operation: String,
        /// The `owner/name` of the object.
        resource: String,
        /// The reason reported by the remote system.
        message: String,
    },

    /// The mutation was applied but the object could not be read back.
    ///
    /// `state` holds what is known about the object (at least its
    /// identifier) so the caller can record it instead of creating it again.
    #[error("{operation} {resource} but could not confirm its state: {reason}")]
    Unconfirmed {
        /// Past-tense operation, e.g. `Created`.
        operation: &'static str,
        /// The `owner/name` of the object.
        resource: String,
        /// Why the read-back failed.
        reason: String,
        /// Partial state to persist.
        state: Box<serde_json::Value>,
    },
}

impl ProviderError {
    /// Build an [`ProviderError::InvalidIdentifier`].
    pub fn invalid_identifier(expected: &'static str, actual: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            expected,
            actual: actual.into(),
        }
    }

    /// Build a [`ProviderError::Rejected`].
    pub fn rejected(
        operation: impl Into<String>,
        resource: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Rejected {
            operation: operation.into(),
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Whether the remote call itself failed to complete.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Unavailable(_) | Self::Protocol(_)
        )
    }

    /// The lifecycle state an instance is left in when an operation fails
    /// with this error.
    ///
    /// Only [`ProviderError::Unconfirmed`] changes anything remotely; every
    /// other failure leaves the instance where it was.
    pub fn instance_state(&self) -> Option<InstanceState> {
        match self {
            Self::Unconfirmed { .. } => Some(InstanceState::Inconsistent),
            _ => None,
        }
    }

    /// The partial state carried by [`ProviderError::Unconfirmed`].
    pub fn partial_state(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Unconfirmed { state, .. } => Some(state),
            _ => None,
        }
    }
}

impl From<ProviderError> for Diagnostic {
    fn from(err: ProviderError) -> Self {
        let detail = match &err {
            ProviderError::InvalidIdentifier { expected, actual } => Some(format!(
                "Import IDs for this resource must look like \"{expected}\"; received \"{actual}\"."
            )),
            ProviderError::Rejected { .. } => Some(
                "The request reached Casdoor and was refused. Check the resource configuration."
                    .to_string(),
            ),
            ProviderError::Unconfirmed { .. } => Some(
                "The change was applied in Casdoor. Do not re-create the resource; \
                 refresh it once Casdoor is reachable again."
                    .to_string(),
            ),
            _ if err.is_transport() => {
                Some("The request did not complete; no retry was attempted.".to_string())
            }
            _ => None,
        };

        let diagnostic = Diagnostic::error(err.to_string());
        match detail {
            Some(detail) => diagnostic.with_detail(detail),
            None => diagnostic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DiagnosticSeverity;

    #[test]
    fn test_error_display() {
        let err = ProviderError::NotFound("built-in/r1".to_string());
        assert_eq!(format!("{}", err), "Resource not found: built-in/r1");

        let err = ProviderError::invalid_identifier("owner/name", "r1");
        assert_eq!(
            format!("{}", err),
            "Invalid identifier: expected format \"owner/name\", got \"r1\""
        );

        let err = ProviderError::rejected("add-user", "built-in/alice", "name already exists");
        assert_eq!(
            format!("{}", err),
            "Operation add-user rejected for built-in/alice: name already exists"
        );
    }

    #[test]
    fn test_unconfirmed_display_and_state() {
        let err = ProviderError::Unconfirmed {
            operation: "Created",
            resource: "built-in/r1".to_string(),
            reason: "Service unavailable: connection refused".to_string(),
            state: Box::new(serde_json::json!({"id": "built-in/r1"})),
        };
        assert!(err.to_string().starts_with("Created built-in/r1 but could not confirm"));
        assert_eq!(err.instance_state(), Some(InstanceState::Inconsistent));
        assert_eq!(err.partial_state().unwrap()["id"], "built-in/r1");
    }

    #[test]
    fn test_transport_classification() {
        assert!(ProviderError::Unavailable("down".to_string()).is_transport());
        assert!(ProviderError::Protocol("HTTP 502".to_string()).is_transport());
        assert!(!ProviderError::rejected("add-role", "o/r", "no").is_transport());
        assert!(!ProviderError::Validation("bad".to_string()).is_transport());
    }

    #[test]
    fn test_error_to_diagnostic() {
        let diag: Diagnostic = ProviderError::invalid_identifier("owner/name", "r1").into();
        assert_eq!(diag.severity, DiagnosticSeverity::Error);
        assert!(diag.detail.unwrap().contains("\"owner/name\""));

        let diag: Diagnostic = ProviderError::Unavailable("down".to_string()).into();
        assert!(diag.detail.unwrap().contains("no retry"));

        let diag: Diagnostic = ProviderError::Configuration("missing".to_string()).into();
        assert_eq!(diag.summary, "Configuration error: missing");
        assert!(diag.detail.is_none());
    }
}
