//! Terminal run outcomes and their persisted report shape.

use serde::{Deserialize, Serialize};
use vivino_core::WineRecord;

/// How a run ended. Every variant carries the records accumulated up to
/// that point; only `Done` records have been filtered.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// A page came back empty: the listing is exhausted.
    Done { records: Vec<WineRecord> },
    /// A page failed with a non-retryable status, or 429 past the retry budget.
    HttpError {
        records: Vec<WineRecord>,
        http_status: u16,
        page_index: u32,
    },
    /// Anything else: negotiation failure, transport error, unreadable page.
    Exception {
        records: Vec<WineRecord>,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Done,
    HttpError,
    Exception,
}

impl RunOutcome {
    #[must_use]
    pub fn status(&self) -> RunStatus {
        match self {
            Self::Done { .. } => RunStatus::Done,
            Self::HttpError { .. } => RunStatus::HttpError,
            Self::Exception { .. } => RunStatus::Exception,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[WineRecord] {
        match self {
            Self::Done { records }
            | Self::HttpError { records, .. }
            | Self::Exception { records, .. } => records,
        }
    }

    #[must_use]
    pub fn into_report(self) -> RunReport {
        match self {
            Self::Done { records } => RunReport {
                vinos: records,
                status: RunStatus::Done,
                http_status: None,
                page_index: None,
                message: None,
            },
            Self::HttpError {
                records,
                http_status,
                page_index,
            } => RunReport {
                vinos: records,
                status: RunStatus::HttpError,
                http_status: Some(http_status),
                page_index: Some(page_index),
                message: Some(format!("request failed with status {http_status}")),
            },
            Self::Exception { records, message } => RunReport {
                vinos: records,
                status: RunStatus::Exception,
                http_status: None,
                page_index: None,
                message: Some(message),
            },
        }
    }
}

/// The JSON document written once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub vinos: Vec<WineRecord>,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn one_wine() -> Vec<WineRecord> {
        vec![WineRecord {
            name: Some("Malbec".to_owned()),
            ratings: 3,
            ..WineRecord::default()
        }]
    }

    #[test]
    fn done_report_omits_diagnostics() {
        let report = RunOutcome::Done { records: one_wine() }.into_report();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "DONE");
        assert_eq!(value["vinos"][0]["name"], "Malbec");
        assert!(value.get("http_status").is_none());
        assert!(value.get("page_index").is_none());
        assert!(value.get("message").is_none());
    }

    #[test]
    fn http_error_report_keeps_status_and_page() {
        let report = RunOutcome::HttpError {
            records: Vec::new(),
            http_status: 503,
            page_index: 4,
        }
        .into_report();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "vinos": [],
                "status": "HTTP_ERROR",
                "http_status": 503,
                "page_index": 4,
                "message": "request failed with status 503"
            })
        );
    }

    #[test]
    fn exception_report_keeps_partial_records_and_message() {
        let outcome = RunOutcome::Exception {
            records: one_wine(),
            message: "connection reset".to_owned(),
        };
        assert_eq!(outcome.status(), RunStatus::Exception);
        assert_eq!(outcome.records().len(), 1);
        let value = serde_json::to_value(outcome.into_report()).unwrap();
        assert_eq!(value["status"], "EXCEPTION");
        assert_eq!(value["message"], "connection reset");
        assert_eq!(value["vinos"].as_array().unwrap().len(), 1);
    }
}
