// src/models.rs
use crate::errors::WardrobeError;
use serde::{Deserialize, Serialize};

/// Request body naming the image to analyze. Exactly one field must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub gcs_uri: Option<String>,
    #[serde(default)]
    pub http_url: Option<String>,
    #[serde(default)]
    pub base64: Option<String>,
}

impl AnalysisRequest {
    pub fn to_input(&self) -> Result<AnalysisInput, WardrobeError> {
        let mut supplied = [
            self.gcs_uri.as_deref().map(AnalysisInput::gcs_uri),
            self.http_url.as_deref().map(AnalysisInput::http_url),
            self.base64.as_deref().map(AnalysisInput::base64),
        ]
        .into_iter()
        .flatten()
        .filter(|input| !input.is_empty());

        match (supplied.next(), supplied.next()) {
            (None, _) => Err(WardrobeError::Validation("No image provided".to_string())),
            (Some(input), None) => Ok(input),
            (Some(_), Some(_)) => Err(WardrobeError::Validation(
                "Supply exactly one of gcsUri, httpUrl or base64".to_string(),
            )),
        }
    }
}

/// A single image reference handed to the detection facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisInput {
    /// Inline image content, base64 without any `data:` URL prefix.
    Base64(String),
    HttpUrl(String),
    GcsUri(String),
}

impl AnalysisInput {
    pub fn base64(content: &str) -> Self {
        AnalysisInput::Base64(strip_data_url(content).to_string())
    }

    pub fn http_url(url: &str) -> Self {
        AnalysisInput::HttpUrl(url.trim().to_string())
    }

    pub fn gcs_uri(uri: &str) -> Self {
        AnalysisInput::GcsUri(uri.trim().to_string())
    }

    /// Classifies a bare image string by its scheme.
    pub fn from_reference(reference: &str) -> Self {
        let trimmed = reference.trim();
        if trimmed.starts_with("gs://") {
            Self::gcs_uri(trimmed)
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::http_url(trimmed)
        } else {
            Self::base64(trimmed)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AnalysisInput::Base64(s) | AnalysisInput::HttpUrl(s) | AnalysisInput::GcsUri(s) => {
                s.is_empty()
            }
        }
    }
}

/// Strips a leading `data:image/<kind>;base64,` prefix if present.
pub fn strip_data_url(content: &str) -> &str {
    let trimmed = content.trim();
    match trimmed.strip_prefix("data:image/") {
        Some(rest) => match rest.find(";base64,") {
            Some(idx) => &rest[idx + ";base64,".len()..],
            None => trimmed,
        },
        None => trimmed,
    }
}

// Raw detection results

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub description: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Rgb {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominantColor {
    pub rgb: Rgb,
    pub score: f64,
    pub pixel_fraction: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebDetection {
    pub best_guess_labels: Vec<String>,
}

/// The five result sets returned for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionBundle {
    pub labels: Vec<Label>,
    pub colors: Vec<DominantColor>,
    pub logos: Vec<String>,
    pub web: WebDetection,
    pub text: String,
}

// Analysis record

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingAnalysis {
    pub summary: Summary,
    pub details: Details,
    pub pricing: Pricing,
    pub meta: AnalysisMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "type")]
    pub item_type: String,
    pub category: Category,
    pub colors: Vec<String>,
    pub style: Style,
    pub season: Season,
    pub occasion: Occasion,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub brand: String,
    pub material: String,
    pub size: String,
    pub condition: Condition,
    pub year: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub estimated_value: u32,
    pub market_price: u32,
    pub retail_price: u32,
    pub range: (u32, u32),
    pub trend: Trend,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMeta {
    #[serde(rename = "tsISO")]
    pub ts_iso: String,
    pub used_vision: bool,
    pub features_used: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Top,
    Bottom,
    OnePiece,
    Footwear,
    Accessory,
    Outerwear,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Style {
    Casual,
    Formal,
    Sport,
    Streetwear,
    Business,
    Evening,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    AllSeasons,
    Summer,
    Winter,
    Spring,
    Autumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Occasion {
    Casual,
    Formal,
    Sport,
    Work,
    Evening,
    Party,
    #[serde(rename = "Unknown")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    New,
    Excellent,
    Good,
    Fair,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Stable,
    Up,
    Down,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Stable => "Stable",
            Trend::Up => "Up",
            Trend::Down => "Down",
        }
    }
}
