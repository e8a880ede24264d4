use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API key is required. Please configure your API key in settings.")]
    MissingCredential,

    #[error("API request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("No response from AI provider")]
    EmptyResponse,

    #[error("Failed to communicate with AI provider: {0}")]
    CommunicationFailure(String),
}

/// Discriminant of [`ApiError`], carried by connection reports so callers
/// do not have to parse message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    MissingCredential,
    RequestFailed,
    EmptyResponse,
    CommunicationFailure,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::MissingCredential => ApiErrorKind::MissingCredential,
            ApiError::RequestFailed { .. } => ApiErrorKind::RequestFailed,
            ApiError::EmptyResponse => ApiErrorKind::EmptyResponse,
            ApiError::CommunicationFailure(_) => ApiErrorKind::CommunicationFailure,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::CommunicationFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        let err = ApiError::RequestFailed {
            status: 429,
            message: "Rate limit exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "API request failed (429): Rate limit exceeded");
        assert!(ApiError::MissingCredential.to_string().starts_with("API key is required"));
        assert_eq!(
            ApiError::CommunicationFailure("connection reset".to_string()).to_string(),
            "Failed to communicate with AI provider: connection reset"
        );
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(ApiError::EmptyResponse.kind(), ApiErrorKind::EmptyResponse);
        assert_eq!(
            ApiError::RequestFailed { status: 500, message: String::new() }.kind(),
            ApiErrorKind::RequestFailed
        );
    }
}
