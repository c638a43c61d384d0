//! Wire types for the recognition service.
//!
//! The JSON shapes here are fixed by the remote service and reproduced
//! exactly. Server versions disagree on whether the matched identity
//! comes back as `person` or `name`; a serde alias absorbs that.

use serde::{Deserialize, Serialize};

/// Body of `POST /recognize`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RecognizeRequest<'a> {
    pub image: &'a str,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub image: &'a str,
}

/// Response of `POST /recognize`, before client-side resolution.
///
/// Carries either a pre-resolved `(person, confidence)` pair or a raw
/// per-class `scores` vector, depending on the server build.
#[derive(Debug, Clone, Deserialize)]
pub struct RecognizeResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, alias = "name")]
    pub person: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Raw per-class scores in catalog order, present when the server
    /// skips resolution.
    #[serde(default)]
    pub scores: Option<Vec<f64>>,
}

/// Result of `POST /register`, passed through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegistrationResult {
    pub(crate) fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Result of `POST /train`.
///
/// Training runs server-side and can take minutes; this only reports
/// whether the run was accepted or finished, with summary numbers when
/// the server completes synchronously.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_images: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_percent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrainingResult {
    pub(crate) fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            total_images: None,
            accuracy_percent: None,
            error: Some(error.into()),
        }
    }
}

/// Result of `GET /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeList {
    pub success: bool,
    /// Entries are opaque to this client; the server controls their shape.
    #[serde(default)]
    pub employees: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EmployeeList {
    pub(crate) fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            employees: Vec::new(),
            error: Some(error.into()),
        }
    }
}
