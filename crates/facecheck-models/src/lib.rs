//! Shared data models for the FaceCheck client.
//!
//! This crate provides Serde-serializable types for:
//! - The identity label catalog
//! - Recognition outcomes and per-class score breakdowns
//! - Connection status reporting
//!
//! plus the pure scoring logic (softmax normalization, arg-max selection,
//! confidence thresholding) that turns a raw score vector into an outcome.
//! Nothing here performs IO; the transport lives in `facecheck-client`.

pub mod catalog;
pub mod outcome;
pub mod scoring;
pub mod status;

// Re-export common types
pub use catalog::LabelCatalog;
pub use outcome::{
    ClassScore, ErrorKind, RecognitionFailure, RecognitionOutcome, ScoreResolveError,
    UNKNOWN_LABEL,
};
pub use status::ConnectionStatus;
