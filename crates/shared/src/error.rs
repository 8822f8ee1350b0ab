//! Error taxonomy shared by the gateway and the session layer.

/// Input rejected at the form boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

/// Failure of a single oracle-backed operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("No Gemini API key configured (set GEMINI_API_KEY or add one in Settings)")]
    MissingCredential,

    #[error("Oracle request failed: {0}")]
    Transport(String),

    #[error("Oracle returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not parse oracle response: {0}")]
    Parse(String),

    #[error("Background request stopped unexpectedly: {0}")]
    Join(String),
}

impl GatewayError {
    /// Network, availability and credential problems
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GatewayError::MissingCredential
                | GatewayError::Transport(_)
                | GatewayError::Status { .. }
        )
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, GatewayError::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(GatewayError::MissingCredential.is_transport());
        assert!(GatewayError::Status {
            status: 503,
            body: String::new()
        }
        .is_transport());
        assert!(GatewayError::Parse("bad".into()).is_parse());
        assert!(!GatewayError::Join("panic".into()).is_transport());
    }

    #[test]
    fn test_validation_message() {
        let err = ValidationError::MissingField { field: "industry" };
        assert_eq!(err.to_string(), "industry is required");
    }
}
