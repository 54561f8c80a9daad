use serde::Serialize;

use crate::{error::TagError, model::TrackingId};

#[derive(Serialize, Clone, Debug)]
pub struct JsonDiagnostic {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

impl JsonDiagnostic {
    pub fn from_message(message: String, source_path: Option<String>) -> Self {
        JsonDiagnostic {
            message,
            source_path,
        }
    }
}

/// Machine-readable payload emitted by `gtag-inject check --json`.
#[derive(Serialize, Clone, Debug)]
pub struct CheckJsonOutput {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonDiagnostic>,
}

impl CheckJsonOutput {
    pub fn success(tracking_id: &TrackingId) -> Self {
        CheckJsonOutput {
            ok: true,
            tracking_id: Some(tracking_id.as_str().to_string()),
            errors: Vec::new(),
        }
    }

    pub fn error(err: &TagError, source_path: Option<String>) -> Self {
        CheckJsonOutput {
            ok: false,
            tracking_id: None,
            errors: vec![JsonDiagnostic::from_message(err.to_string(), source_path)],
        }
    }

    pub fn into_string(self) -> String {
        serde_json::to_string(&self).expect("check output serialization")
    }
}
