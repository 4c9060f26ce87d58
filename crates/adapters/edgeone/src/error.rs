//! EdgeOne-specific error type.

use purgehub_domain::error::{ProviderError, PurgeHubError};

/// Errors raised while talking to the EdgeOne API.
#[derive(Debug, thiserror::Error)]
pub enum EdgeOneError {
    /// The configured endpoint is not an absolute URL with a host.
    #[error("invalid endpoint `{0}`")]
    Endpoint(String),

    /// The request could not be sent or the reply could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request body could not be encoded.
    #[error("cannot encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// An HMAC key was rejected.
    #[error("cannot sign request")]
    Signing(#[from] hmac::digest::InvalidLength),

    /// EdgeOne answered with an error object.
    #[error("{code}: {message}")]
    Api { code: String, message: String },
}

impl From<EdgeOneError> for PurgeHubError {
    fn from(err: EdgeOneError) -> Self {
        match err {
            EdgeOneError::Api { code, message } => ProviderError::Rejected { code, message }.into(),
            other => ProviderError::Transport(other.to_string()).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_provider_message_for_api_errors() {
        let err: PurgeHubError = EdgeOneError::Api {
            code: "AuthFailure.SignatureFailure".to_string(),
            message: "signature mismatch".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            PurgeHubError::Provider(ProviderError::Rejected { ref code, .. }) if code == "AuthFailure.SignatureFailure"
        ));
        assert_eq!(err.to_string(), "provider error: signature mismatch");
    }

    #[test]
    fn should_treat_other_failures_as_transport() {
        let err: PurgeHubError = EdgeOneError::Endpoint("nope".to_string()).into();
        assert!(matches!(
            err,
            PurgeHubError::Provider(ProviderError::Transport(_))
        ));
    }
}
