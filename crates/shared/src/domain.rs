use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the document service. The service is free to hand
/// out numeric or string ids; the client treats both as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Number(i64),
    Text(String),
}

impl DocumentId {
    /// Parses a user-supplied id, preferring the numeric form when the whole
    /// input is an integer.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => DocumentId::Number(n),
            Err(_) => DocumentId::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Number(n) => write!(f, "{n}"),
            DocumentId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for DocumentId {
    fn from(value: i64) -> Self {
        DocumentId::Number(value)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        DocumentId::Text(value.to_string())
    }
}

/// A persisted file record as the document service serializes it. Every
/// document the client observes already exists server-side, so `id` is always
/// present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filetype: Option<String>,
    #[serde(default, rename = "fileUrl", skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl Document {
    pub fn new(id: impl Into<DocumentId>, filename: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            content: None,
            title: None,
            filetype: None,
            file_url: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_id_accepts_numeric_and_string_json() {
        let numeric: DocumentId = serde_json::from_str("7").expect("numeric id");
        assert_eq!(numeric, DocumentId::Number(7));

        let text: DocumentId = serde_json::from_str("\"a1b2\"").expect("string id");
        assert_eq!(text, DocumentId::Text("a1b2".into()));
    }

    #[test]
    fn document_tolerates_missing_optional_fields() {
        let doc: Document =
            serde_json::from_str(r#"{"id": 3, "filename": "notes.txt"}"#).expect("document");
        assert_eq!(doc.id, DocumentId::Number(3));
        assert_eq!(doc.filename, "notes.txt");
        assert_eq!(doc.content, None);
        assert_eq!(doc.file_url, None);
    }

    #[test]
    fn document_round_trips_service_field_names() {
        let doc: Document = serde_json::from_str(
            r#"{"id": "d-9", "filename": "a.txt", "content": "body", "fileUrl": "uploads/a.txt"}"#,
        )
        .expect("document");
        assert_eq!(doc.file_url.as_deref(), Some("uploads/a.txt"));

        let json = serde_json::to_value(&doc).expect("serialize");
        assert_eq!(json["fileUrl"], "uploads/a.txt");
        assert!(json.get("filetype").is_none());
    }

    #[test]
    fn parse_prefers_numeric_ids() {
        assert_eq!(DocumentId::parse("42"), DocumentId::Number(42));
        assert_eq!(DocumentId::parse("42x"), DocumentId::Text("42x".into()));
    }
}
