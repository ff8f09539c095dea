// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required. Please log in again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Every failure the controller layer can observe. Nothing past the
/// controllers sees these as errors; they end up as a failed request state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Http {
        status: u16,
        message: Option<String>,
    },

    /// The server answered 2xx but reported `success: false`.
    #[error("request rejected by server")]
    Rejected { message: Option<String> },

    /// HTTP 401.
    #[error("authentication required")]
    Auth,

    /// Checked locally before any remote call.
    #[error("{0}")]
    Validation(String),

    /// A 2xx body that does not match the expected shape.
    #[error("decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } | Self::Rejected { message } => message
                .as_deref()
                .map(str::trim)
                .filter(|message| !message.is_empty()),
            _ => None,
        }
    }

    /// Display-ready text: the server's own message when it sent one,
    /// otherwise the operation's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_owned(),
            Self::Auth => AUTH_REQUIRED_MESSAGE.to_owned(),
            Self::Validation(message) => message.clone(),
            Self::Http { .. } | Self::Rejected { .. } => self
                .server_message()
                .map_or_else(|| fallback.to_owned(), str::to_owned),
            Self::Decode(_) => fallback.to_owned(),
        }
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Auth => Some(401),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn http_error_prefers_server_message() {
        let error = ApiError::Http {
            status: 400,
            message: Some("Fee value required".to_owned()),
        };
        assert_eq!(error.user_message("Failed to create fee"), "Fee value required");
        assert_eq!(error.status(), Some(400));
    }

    #[test]
    fn blank_server_message_uses_fallback() {
        let error = ApiError::Rejected {
            message: Some("   ".to_owned()),
        };
        assert_eq!(error.user_message("Failed to delete fee"), "Failed to delete fee");
    }

    #[test]
    fn auth_and_network_have_fixed_messages() {
        assert_eq!(
            ApiError::Auth.user_message("ignored"),
            "Authentication required. Please log in again."
        );
        assert_eq!(
            ApiError::Network("connection refused".to_owned()).user_message("ignored"),
            "Network error"
        );
    }
}
