//! Wire types shared with the backend.

use serde::{Deserialize, Serialize};

/// One uploaded PDF document as reported by the backend.
///
/// The `filename` is unique within the upload store and acts as the
/// identifier everywhere else in the contract. The client never mutates
/// these fields; it replaces the whole list on refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfFile {
    pub filename: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Modification time as a unix timestamp (seconds, fractional).
    #[serde(default)]
    pub mtime: f64,
    /// Whether a vector index exists for this document.
    #[serde(default)]
    pub vectorized: bool,
}

/// Per-stage timing breakdown reported with an answer, in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerTiming {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_build: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieval: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_generation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// Structured answer produced for one question. Immutable once received.
///
/// The backend uses camelCase keys and may omit any field; omitted fields
/// fall back to their defaults so a partial payload still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Answer {
    pub step_by_step_reasoning: String,
    pub reasoning_summary: String,
    /// Source pages cited for the answer, in backend order.
    pub related_pages: Vec<u32>,
    pub final_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<AnswerTiming>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_parses_camel_case_payload() {
        let raw = r#"{
            "stepByStepReasoning": "1. look at page 3",
            "reasoningSummary": "checked the intro",
            "relatedPages": [3, 7],
            "finalAnswer": "42",
            "timing": {"retrieval": 0.12, "llm_generation": 1.5, "total": 1.7}
        }"#;

        let answer: Answer = serde_json::from_str(raw).unwrap();
        assert_eq!(answer.final_answer, "42");
        assert_eq!(answer.related_pages, vec![3, 7]);
        let timing = answer.timing.unwrap();
        assert_eq!(timing.retrieval, Some(0.12));
        assert_eq!(timing.index_build, None);
    }

    #[test]
    fn answer_defaults_missing_fields() {
        let answer: Answer = serde_json::from_str(r#"{"finalAnswer": "ok"}"#).unwrap();
        assert_eq!(answer.final_answer, "ok");
        assert!(answer.step_by_step_reasoning.is_empty());
        assert!(answer.related_pages.is_empty());
        assert!(answer.timing.is_none());
    }

    #[test]
    fn pdf_file_parses_backend_listing() {
        let raw = r#"{"filename": "report.pdf", "size": 1024, "mtime": 1735689600.5, "vectorized": true}"#;
        let file: PdfFile = serde_json::from_str(raw).unwrap();
        assert_eq!(file.filename, "report.pdf");
        assert_eq!(file.size, 1024);
        assert!(file.vectorized);
    }
}
