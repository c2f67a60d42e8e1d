// src/errors.rs
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WardrobeError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures talking to the detection facility. These never reach an HTTP
/// client from the analysis endpoints; the analyzer logs them and degrades
/// to the mock record.
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("timed out after {0}s")]
    Timeout(u64),
}

impl VisionError {
    /// Worth retrying: network trouble, rate limiting, server-side errors.
    pub fn is_transient(&self) -> bool {
        match self {
            VisionError::Transport(_) => true,
            VisionError::Api { status, .. } => *status == 429 || *status >= 500,
            VisionError::Malformed(_) | VisionError::Timeout(_) => false,
        }
    }
}

impl ResponseError for WardrobeError {
    fn error_response(&self) -> HttpResponse {
        match self {
            WardrobeError::Validation(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Validation error",
                "message": self.to_string()
            })),
            WardrobeError::ImageProcessing(_) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "Image processing error",
                    "message": self.to_string()
                }))
            }
            WardrobeError::Config(_) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Configuration error",
                    "message": self.to_string()
                }))
            }
        }
    }
}
