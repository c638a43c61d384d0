//! Captured image payloads.

use base64::{engine::general_purpose::STANDARD, Engine};

/// One captured image, ready for transport.
///
/// Produced by the capture layer and consumed by exactly one request;
/// nothing is persisted. The payload arrives either as base64 text (the
/// common case on mobile capture paths) or as raw encoded image bytes;
/// `as_base64` yields the wire form for both.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    data: ImageData,
    content_type: String,
}

#[derive(Debug, Clone)]
enum ImageData {
    Base64(String),
    Bytes(Vec<u8>),
}

impl ImagePayload {
    /// Payload from base64 text, passed through to the wire untouched.
    pub fn from_base64(data: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            data: ImageData::Base64(data.into()),
            content_type: content_type.into(),
        }
    }

    /// Payload from raw encoded image bytes (e.g. a JPEG read from disk).
    pub fn from_bytes(data: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            data: ImageData::Bytes(data),
            content_type: content_type.into(),
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn is_empty(&self) -> bool {
        match &self.data {
            ImageData::Base64(text) => text.trim().is_empty(),
            ImageData::Bytes(bytes) => bytes.is_empty(),
        }
    }

    /// Wire form of the payload.
    pub fn as_base64(&self) -> String {
        match &self.data {
            ImageData::Base64(text) => text.clone(),
            ImageData::Bytes(bytes) => STANDARD.encode(bytes),
        }
    }
}
