// src/services/mod.rs
pub mod analyzer;
pub mod image_processor;
pub mod vision_client;

pub use analyzer::{AnalyzerSettings, ClothingAnalyzer};
pub use image_processor::ImageProcessor;
pub use vision_client::{GoogleVisionClient, VisionClient, VisionCredential};
