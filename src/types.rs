//! Wire types exchanged with the DotOCR service.
//!
//! Field names follow the service's JSON exactly (note the camelCase
//! `rawText` next to snake_case metadata keys); serde renames keep the Rust
//! side idiomatic.

use serde::{Deserialize, Serialize};

/// A server-defined profile selecting how a document should be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Body of `GET /api/v1/prompts/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptList {
    pub prompts: Vec<Prompt>,
}

/// Extracted content of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseData {
    pub markdown: String,
    #[serde(rename = "rawText")]
    pub raw_text: String,
}

/// Auxiliary information about a completed parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseMetadata {
    pub storage_key: String,
    pub model: String,
    pub processing_time_ms: u64,
    pub request_id: String,
    pub file_size_kb: f64,
}

/// Body of `POST /api/v1/parse/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    pub success: bool,
    pub data: ParseData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ParseMetadata>,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// One entry of a 422 `detail` list. Only `msg` is read; `loc`, `type`, ...
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationIssue {
    #[serde(default)]
    pub msg: Option<String>,
}

/// The `detail` field of an error body.
///
/// 422 responses carry a list of issues; 400/500 responses carry a plain
/// string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Issues(Vec<ValidationIssue>),
    Message(String),
}

/// Error body shape shared by every non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

impl ErrorBody {
    /// `detail[0].msg` for list-shaped bodies.
    pub fn first_issue_message(&self) -> Option<&str> {
        match &self.detail {
            Some(ErrorDetail::Issues(issues)) => issues.first().and_then(|i| i.msg.as_deref()),
            _ => None,
        }
    }

    /// The plain-string `detail`, if that is what the server sent.
    pub fn detail_message(&self) -> Option<&str> {
        match &self.detail {
            Some(ErrorDetail::Message(m)) => Some(m.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_response_uses_service_field_names() {
        let json = r##"{
            "success": true,
            "data": {"markdown": "# Hi", "rawText": "Hi"},
            "metadata": {
                "storage_key": "20240101_ab12cd34_scan.pdf",
                "model": "mistral-ocr-latest",
                "processing_time_ms": 1532,
                "request_id": "ocr_1a2b3c4d",
                "file_size_kb": 12.5
            }
        }"##;
        let resp: ParseResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.raw_text, "Hi");
        let meta = resp.metadata.unwrap();
        assert_eq!(meta.processing_time_ms, 1532);
        assert_eq!(meta.file_size_kb, 12.5);
    }

    #[test]
    fn parse_response_without_metadata() {
        let json = r#"{"success": true, "data": {"markdown": "", "rawText": ""}}"#;
        let resp: ParseResponse = serde_json::from_str(json).unwrap();
        assert!(resp.metadata.is_none());
    }

    #[test]
    fn error_body_list_detail() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail": [{"loc": ["body", "promptId"], "msg": "field required", "type": "missing"}]}"#,
        )
        .unwrap();
        assert_eq!(body.first_issue_message(), Some("field required"));
        assert_eq!(body.detail_message(), None);
    }

    #[test]
    fn error_body_string_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "Prompt 'x' not found"}"#).unwrap();
        assert_eq!(body.first_issue_message(), None);
        assert_eq!(body.detail_message(), Some("Prompt 'x' not found"));
    }

    #[test]
    fn error_body_empty_and_absent_detail() {
        let empty: ErrorBody = serde_json::from_str(r#"{"detail": []}"#).unwrap();
        assert_eq!(empty.first_issue_message(), None);
        let absent: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.first_issue_message(), None);
    }

    #[test]
    fn health_status_ok() {
        let h: HealthStatus =
            serde_json::from_str(r#"{"status": "ok", "message": "Welcome to the DotOCR API"}"#)
                .unwrap();
        assert!(h.is_ok());
    }
}
