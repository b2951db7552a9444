use std::fmt;
use thiserror::Error;

/// Remote translation backend a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    OpenAi,
    GoogleTranslate,
    DeepL,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::OpenAi => "OpenAI",
            Backend::GoogleTranslate => "Google Translate",
            Backend::DeepL => "DeepL",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Invalid model_id: {model_id}. Available models: {available}")]
    ModelNotFound { model_id: String, available: String },

    #[error("{backend} is not configured: {reason}")]
    AdapterNotConfigured { backend: Backend, reason: String },

    #[error("Cannot reach {backend}: {message}")]
    BackendUnreachable { backend: Backend, message: String },

    #[error("{backend} rejected '{subject}': {message}")]
    BackendRejected {
        backend: Backend,
        subject: String,
        message: String,
    },

    #[error("{backend} rejected the configured API key")]
    BackendUnauthorized { backend: Backend },

    #[error("{backend} translation failed: {message}")]
    BackendTranslationFailed { backend: Backend, message: String },
}

impl TranslateError {
    /// Stable snake_case identifier for the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            TranslateError::ModelNotFound { .. } => "model_not_found",
            TranslateError::AdapterNotConfigured { .. } => "adapter_not_configured",
            TranslateError::BackendUnreachable { .. } => "backend_unreachable",
            TranslateError::BackendRejected { .. } => "backend_rejected",
            TranslateError::BackendUnauthorized { .. } => "backend_unauthorized",
            TranslateError::BackendTranslationFailed { .. } => "backend_translation_failed",
        }
    }

    pub(crate) fn failed(backend: Backend, message: impl Into<String>) -> Self {
        TranslateError::BackendTranslationFailed {
            backend,
            message: message.into(),
        }
    }

    /// Classify a transport-level failure from reqwest
    pub(crate) fn from_transport(backend: Backend, error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            TranslateError::BackendUnreachable {
                backend,
                message: error.to_string(),
            }
        } else {
            TranslateError::failed(backend, error.to_string())
        }
    }

    /// Classify a non-success HTTP response.
    ///
    /// `subject` is the model or language the request was about, echoed back
    /// when the backend rejects it.
    pub(crate) fn from_status(
        backend: Backend,
        status: reqwest::StatusCode,
        body: &str,
        subject: &str,
    ) -> Self {
        let code = status.as_u16();
        if code == 401 || code == 403 {
            return TranslateError::BackendUnauthorized { backend };
        }
        if code == 400 || code == 404 || body.to_lowercase().contains("not found") {
            return TranslateError::BackendRejected {
                backend,
                subject: subject.to_string(),
                message: format!("({}): {}", status, body),
            };
        }
        TranslateError::failed(backend, format!("({}): {}", status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_backend_display() {
        assert_eq!(Backend::OpenAi.to_string(), "OpenAI");
        assert_eq!(Backend::GoogleTranslate.to_string(), "Google Translate");
        assert_eq!(Backend::DeepL.to_string(), "DeepL");
    }

    #[test]
    fn test_status_404_is_rejected_with_subject() {
        let error = TranslateError::from_status(
            Backend::OpenAi,
            StatusCode::NOT_FOUND,
            "The model `gpt-9` does not exist",
            "gpt-9",
        );
        match error {
            TranslateError::BackendRejected { subject, .. } => assert_eq!(subject, "gpt-9"),
            other => panic!("Expected BackendRejected, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found_body_is_rejected_regardless_of_status() {
        let error = TranslateError::from_status(
            Backend::OpenAi,
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "NOT_FOUND"}"#,
            "gpt-4o",
        );
        assert_eq!(error.kind(), "backend_rejected");
    }

    #[test]
    fn test_status_401_and_403_are_unauthorized() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let error = TranslateError::from_status(Backend::DeepL, status, "", "KO");
            assert!(matches!(
                error,
                TranslateError::BackendUnauthorized {
                    backend: Backend::DeepL
                }
            ));
        }
    }

    #[test]
    fn test_other_status_is_translation_failed_with_body() {
        let error = TranslateError::from_status(
            Backend::GoogleTranslate,
            StatusCode::BAD_GATEWAY,
            "upstream exploded",
            "ko",
        );
        assert_eq!(error.kind(), "backend_translation_failed");
        let message = error.to_string();
        assert!(message.contains("502"));
        assert!(message.contains("upstream exploded"));
    }

    #[test]
    fn test_model_not_found_message_lists_models() {
        let error = TranslateError::ModelNotFound {
            model_id: "gpt-9".to_string(),
            available: "gpt-4o, deepl-nmt".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("gpt-9"));
        assert!(message.contains("gpt-4o, deepl-nmt"));
    }
}
