//! Error types for the dotocr-client library.
//!
//! Every failure the client can hit maps onto [`DotOcrError`]. The variants
//! fall into three families that callers usually treat differently:
//!
//! * **Service errors**: the server answered, but not with a 2xx.
//!   [`DotOcrError::Validation`] covers HTTP 422 and carries the first
//!   validation message; [`DotOcrError::Http`] covers everything else and
//!   always leads with the status code.
//!
//! * **Transport errors**: the request never produced a usable response
//!   ([`DotOcrError::Network`], [`DotOcrError::Decode`], download failures).
//!
//! * **Local errors**: the request was never sent (missing prompt, bad
//!   file, unsupported extension, config problems).
//!
//! None of them are retried. The orchestrator turns any of them into a
//! user-facing notification via [`DotOcrError::user_message`].

use std::path::PathBuf;
use thiserror::Error;

/// Fallback shown when a 422 body has no usable `detail[0].msg`.
pub const VALIDATION_FALLBACK: &str = "Validation error";

/// All errors returned by the dotocr-client library.
#[derive(Debug, Error)]
pub enum DotOcrError {
    // ── Service errors ────────────────────────────────────────────────────
    /// Any non-2xx response other than 422.
    ///
    /// `detail` holds the server's `{"detail": "..."}` string when present;
    /// it is informational and never replaces the status line.
    #[error("HTTP error! status: {status}{}", reason_suffix(.status_text))]
    Http {
        status: u16,
        status_text: String,
        detail: Option<String>,
    },

    /// HTTP 422 with the first validation issue's message (or a fallback).
    #[error("{message}")]
    Validation { message: String },

    /// A 2xx parse response with `"success": false`.
    #[error("The service could not parse the document")]
    ParseUnsuccessful,

    // ── Transport errors ──────────────────────────────────────────────────
    /// Connection refused, DNS failure, TLS failure, ...
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body of a 2xx response did not match the expected shape.
    #[error("Failed to decode {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    // ── Local errors ──────────────────────────────────────────────────────
    /// The caller tried to submit without both a file and a prompt.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is neither a readable path nor an HTTP/HTTPS URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// The file extension is not on the upload allow-list.
    #[error("Unsupported extension {extension:?} for '{name}'. Allowed: {allowed}")]
    UnsupportedFileType {
        name: String,
        extension: String,
        allowed: String,
    },

    /// Writing a download or preview file failed.
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The clipboard sink refused the text.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DotOcrError {
    /// Text suitable for a transient notification.
    ///
    /// Returns `fallback` when the error renders to an empty string (e.g. a
    /// 422 whose first `msg` was `""`).
    pub fn user_message(&self, fallback: &str) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            fallback.to_string()
        } else {
            msg
        }
    }

    /// HTTP status code for service errors, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            DotOcrError::Http { status, .. } => Some(*status),
            DotOcrError::Validation { .. } => Some(422),
            DotOcrError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn reason_suffix(status_text: &str) -> String {
    if status_text.is_empty() {
        String::new()
    } else {
        format!(" {status_text}")
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DotOcrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_display_contains_status() {
        let e = DotOcrError::Http {
            status: 503,
            status_text: "Service Unavailable".into(),
            detail: None,
        };
        let msg = e.to_string();
        assert!(msg.contains("503"), "got: {msg}");
        assert!(msg.contains("Service Unavailable"), "got: {msg}");
    }

    #[test]
    fn http_detail_does_not_replace_status() {
        let e = DotOcrError::Http {
            status: 400,
            status_text: "Bad Request".into(),
            detail: Some("Prompt 'x' not found".into()),
        };
        assert_eq!(e.to_string(), "HTTP error! status: 400 Bad Request");
    }

    #[test]
    fn http_without_reason_has_no_trailing_space() {
        let e = DotOcrError::Http {
            status: 599,
            status_text: String::new(),
            detail: None,
        };
        assert_eq!(e.to_string(), "HTTP error! status: 599");
    }

    #[test]
    fn parse_unsuccessful_has_message() {
        let e = DotOcrError::ParseUnsuccessful;
        assert!(!e.user_message("fallback").is_empty());
        assert_eq!(e.status(), None);
    }

    #[test]
    fn validation_display_is_bare_message() {
        let e = DotOcrError::Validation {
            message: "field required".into(),
        };
        assert_eq!(e.to_string(), "field required");
        assert_eq!(e.status(), Some(422));
    }

    #[test]
    fn user_message_falls_back_when_empty() {
        let e = DotOcrError::Validation {
            message: String::new(),
        };
        assert_eq!(e.user_message("fallback"), "fallback");
    }

    #[test]
    fn user_message_keeps_real_text() {
        let e = DotOcrError::InvalidRequest("no file selected".into());
        assert_eq!(
            e.user_message("fallback"),
            "Invalid request: no file selected"
        );
        assert_eq!(e.status(), None);
    }
}
