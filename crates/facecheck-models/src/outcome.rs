//! UI-ready recognition outcomes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::LabelCatalog;
use crate::scoring;

/// Display label used when no identity clears the threshold.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Failure classification carried inside a failed outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad caller input: empty image or label, malformed score vector.
    Validation,
    /// Transport failure: DNS, connection refused, timeout.
    Connectivity,
    /// Non-2xx response or a body missing the expected fields.
    Remote,
}

/// What went wrong, kept as data so the recognition path never throws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecognitionFailure {
    pub kind: ErrorKind,
    pub message: String,
}

/// Per-class confidence entry, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassScore {
    pub label: String,
    pub score: f64,
    /// Score as a display percentage, e.g. `"95.00%"`.
    pub percentage: String,
}

impl ClassScore {
    fn new(label: &str, score: f64) -> Self {
        Self {
            label: label.to_string(),
            score,
            percentage: format!("{:.2}%", score * 100.0),
        }
    }
}

/// A score vector that cannot be resolved against the catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreResolveError {
    #[error("Score vector has {got} entries, catalog has {expected}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("Empty score vector")]
    Empty,
}

/// Result of one recognition round trip.
///
/// Constructed fresh per request and never mutated afterwards. A failed
/// request still produces a fully-shaped outcome: zero confidence, no
/// match, a zeroed catalog-length breakdown, and the failure recorded in
/// `error` instead of being raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RecognitionOutcome {
    pub success: bool,
    /// Matched identity, `None` below the threshold or on failure.
    pub matched_label: Option<String>,
    /// Confidence of the best class, in `[0, 1]`.
    pub confidence: f64,
    /// One entry per catalog label, in catalog order.
    pub per_class_scores: Vec<ClassScore>,
    /// Wall-clock time from request start to response parse completion.
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RecognitionFailure>,
}

impl RecognitionOutcome {
    /// Resolve a raw per-class score vector against the catalog.
    ///
    /// Applies softmax normalization when the vector looks like logits,
    /// picks the arg-max class (ties go to the lowest catalog index) and
    /// classifies success with an inclusive threshold comparison.
    pub fn from_scores(
        catalog: &LabelCatalog,
        raw: &[f64],
        threshold: f64,
        latency_ms: u64,
    ) -> Result<Self, ScoreResolveError> {
        if raw.len() != catalog.len() {
            return Err(ScoreResolveError::LengthMismatch {
                expected: catalog.len(),
                got: raw.len(),
            });
        }

        let probs = scoring::normalize(raw);
        let (best, confidence) = scoring::arg_max(&probs).ok_or(ScoreResolveError::Empty)?;
        let success = confidence >= threshold;

        Ok(Self {
            success,
            matched_label: if success {
                catalog.get(best).map(str::to_string)
            } else {
                None
            },
            confidence,
            per_class_scores: catalog
                .iter()
                .zip(&probs)
                .map(|(label, &p)| ClassScore::new(label, p))
                .collect(),
            latency_ms,
            error: None,
        })
    }

    /// Resolve a server-side `(name, confidence)` pair.
    ///
    /// The per-class breakdown is reconstructed from the catalog: the
    /// resolved name's slot carries the confidence, every other slot is
    /// zero. Confidence outside `[0, 1]` is clamped.
    pub fn from_resolved(
        catalog: &LabelCatalog,
        name: &str,
        confidence: f64,
        threshold: f64,
        latency_ms: u64,
    ) -> Self {
        let confidence = confidence.clamp(0.0, 1.0);
        let success = confidence >= threshold;
        let matched = catalog.position(name);

        Self {
            success,
            matched_label: success.then(|| name.to_string()),
            confidence,
            per_class_scores: catalog
                .iter()
                .enumerate()
                .map(|(index, label)| {
                    let score = if Some(index) == matched { confidence } else { 0.0 };
                    ClassScore::new(label, score)
                })
                .collect(),
            latency_ms,
            error: None,
        }
    }

    /// Failure outcome carrying the error kind as data.
    pub fn failure(
        catalog: &LabelCatalog,
        kind: ErrorKind,
        message: impl Into<String>,
        latency_ms: u64,
    ) -> Self {
        Self {
            success: false,
            matched_label: None,
            confidence: 0.0,
            per_class_scores: catalog.iter().map(|label| ClassScore::new(label, 0.0)).collect(),
            latency_ms,
            error: Some(RecognitionFailure {
                kind,
                message: message.into(),
            }),
        }
    }

    /// Label for display: the match when there is one, otherwise the
    /// "unknown" sentinel.
    pub fn display_label(&self) -> &str {
        self.matched_label.as_deref().unwrap_or(UNKNOWN_LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> LabelCatalog {
        LabelCatalog::from_names(["jered", "gracia", "Ben", "Leo"])
    }

    #[test]
    fn test_high_confidence_match() {
        let outcome =
            RecognitionOutcome::from_scores(&roster(), &[0.95, 0.03, 0.01, 0.01], 0.70, 42)
                .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.matched_label.as_deref(), Some("jered"));
        assert_eq!(outcome.confidence, 0.95);
        assert_eq!(outcome.per_class_scores[0].percentage, "95.00%");
        assert_eq!(outcome.latency_ms, 42);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_below_threshold_keeps_breakdown() {
        let outcome =
            RecognitionOutcome::from_scores(&roster(), &[0.60, 0.20, 0.15, 0.05], 0.70, 0)
                .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.matched_label, None);
        assert_eq!(outcome.display_label(), UNKNOWN_LABEL);
        // The near-miss is never suppressed.
        assert_eq!(outcome.confidence, 0.60);
        assert_eq!(outcome.per_class_scores.len(), 4);
        assert_eq!(outcome.per_class_scores[0].percentage, "60.00%");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let outcome = RecognitionOutcome::from_scores(&roster(), &[0.70, 0.1, 0.1, 0.1], 0.70, 0)
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.matched_label.as_deref(), Some("jered"));
    }

    #[test]
    fn test_tie_breaks_to_first_catalog_entry() {
        let outcome =
            RecognitionOutcome::from_scores(&roster(), &[0.5, 0.5, 0.0, 0.0], 0.40, 0).unwrap();
        assert_eq!(outcome.matched_label.as_deref(), Some("jered"));
    }

    #[test]
    fn test_logits_get_softmaxed() {
        let outcome = RecognitionOutcome::from_scores(&roster(), &[8.0, 2.0, 1.0, 0.5], 0.70, 0)
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.matched_label.as_deref(), Some("jered"));
        let sum: f64 = outcome.per_class_scores.iter().map(|c| c.score).sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let err = RecognitionOutcome::from_scores(&roster(), &[0.9, 0.1], 0.70, 0).unwrap_err();
        assert_eq!(err, ScoreResolveError::LengthMismatch { expected: 4, got: 2 });
    }

    #[test]
    fn test_empty_vector_is_rejected() {
        let err =
            RecognitionOutcome::from_scores(&LabelCatalog::default(), &[], 0.70, 0).unwrap_err();
        assert_eq!(err, ScoreResolveError::Empty);
    }

    #[test]
    fn test_resolved_pair_places_confidence_in_catalog_slot() {
        let outcome = RecognitionOutcome::from_resolved(&roster(), "ben", 0.91, 0.70, 10);
        assert!(outcome.success);
        assert_eq!(outcome.matched_label.as_deref(), Some("ben"));
        assert_eq!(outcome.per_class_scores.len(), 4);
        assert_eq!(outcome.per_class_scores[2].score, 0.91);
        assert_eq!(outcome.per_class_scores[2].percentage, "91.00%");
        assert_eq!(outcome.per_class_scores[0].score, 0.0);
    }

    #[test]
    fn test_resolved_pair_clamps_confidence() {
        let outcome = RecognitionOutcome::from_resolved(&roster(), "Leo", 1.7, 0.70, 0);
        assert_eq!(outcome.confidence, 1.0);
    }

    #[test]
    fn test_resolved_name_outside_catalog() {
        let outcome = RecognitionOutcome::from_resolved(&roster(), "stranger", 0.99, 0.70, 0);
        assert!(outcome.success);
        assert_eq!(outcome.matched_label.as_deref(), Some("stranger"));
        assert!(outcome.per_class_scores.iter().all(|c| c.score == 0.0));
    }

    #[test]
    fn test_failure_is_fully_shaped() {
        let outcome =
            RecognitionOutcome::failure(&roster(), ErrorKind::Connectivity, "refused", 31);
        assert!(!outcome.success);
        assert_eq!(outcome.matched_label, None);
        assert_eq!(outcome.confidence, 0.0);
        assert_eq!(outcome.per_class_scores.len(), 4);
        assert_eq!(outcome.per_class_scores[1].percentage, "0.00%");
        let failure = outcome.error.unwrap();
        assert_eq!(failure.kind, ErrorKind::Connectivity);
        assert_eq!(failure.message, "refused");
    }
}
