//! HTTP client for the remote face recognition service.
//!
//! The service exposes a small JSON protocol: one endpoint classifies a
//! captured face image against a fixed identity roster, another stores
//! labeled samples, a third triggers a server-side training run. This
//! crate owns that contract end to end: request encoding, response
//! resolution (softmax normalization, confidence thresholding), and
//! connection-status tracking. No operation lets an error escape as a
//! panic or `Err`; every failure mode comes back inside the typed result
//! the UI renders.

pub mod client;
pub mod error;
pub mod image;
pub mod types;

pub use client::{ClientConfig, RecognitionClient};
pub use error::{ClientError, ClientResult};
pub use image::ImagePayload;
pub use types::{EmployeeList, RecognizeResponse, RegistrationResult, TrainingResult};
