// src/services/vision_client.rs
use crate::errors::VisionError;
use crate::models::*;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// One method per detection facility. Each call is an independent read of
/// the same image so the analyzer can run them concurrently.
#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn label_detection(&self, image: &AnalysisInput) -> Result<Vec<Label>, VisionError>;

    async fn image_properties(
        &self,
        image: &AnalysisInput,
    ) -> Result<Vec<DominantColor>, VisionError>;

    async fn logo_detection(&self, image: &AnalysisInput) -> Result<Vec<String>, VisionError>;

    async fn web_detection(&self, image: &AnalysisInput) -> Result<WebDetection, VisionError>;

    async fn text_detection(&self, image: &AnalysisInput) -> Result<String, VisionError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisionCredential {
    ApiKey(String),
    AccessToken(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Labels,
    ImageProperties,
    Logos,
    Web,
    Text,
}

impl Feature {
    pub fn api_name(&self) -> &'static str {
        match self {
            Feature::Labels => "LABEL_DETECTION",
            Feature::ImageProperties => "IMAGE_PROPERTIES",
            Feature::Logos => "LOGO_DETECTION",
            Feature::Web => "WEB_DETECTION",
            Feature::Text => "TEXT_DETECTION",
        }
    }

    fn max_results(&self) -> u32 {
        match self {
            Feature::Labels => 20,
            Feature::ImageProperties => 10,
            Feature::Logos => 5,
            Feature::Web => 10,
            Feature::Text => 1,
        }
    }
}

/// Google Cloud Vision over its REST `images:annotate` endpoint.
pub struct GoogleVisionClient {
    credential: VisionCredential,
    endpoint: String,
    client: Client,
}

impl GoogleVisionClient {
    pub fn new(
        credential: VisionCredential,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, VisionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VisionError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            credential,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn annotate(
        &self,
        image: &AnalysisInput,
        feature: Feature,
    ) -> Result<AnnotateImageResponse, VisionError> {
        let url = format!("{}/v1/images:annotate", self.endpoint);
        let request = self.client.post(&url).json(&request_body(image, feature));
        let request = match &self.credential {
            VisionCredential::ApiKey(key) => request.query(&[("key", key)]),
            VisionCredential::AccessToken(token) => request.bearer_auth(token),
        };

        debug!("Requesting {} from {}", feature.api_name(), url);

        let response = request
            .send()
            .await
            .map_err(|e| VisionError::Transport(format!("Vision request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(VisionError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let batch: BatchAnnotateResponse = response
            .json()
            .await
            .map_err(|e| VisionError::Malformed(format!("Failed to parse Vision response: {}", e)))?;

        batch.into_single()
    }
}

#[async_trait]
impl VisionClient for GoogleVisionClient {
    async fn label_detection(&self, image: &AnalysisInput) -> Result<Vec<Label>, VisionError> {
        Ok(self.annotate(image, Feature::Labels).await?.labels())
    }

    async fn image_properties(
        &self,
        image: &AnalysisInput,
    ) -> Result<Vec<DominantColor>, VisionError> {
        Ok(self
            .annotate(image, Feature::ImageProperties)
            .await?
            .dominant_colors())
    }

    async fn logo_detection(&self, image: &AnalysisInput) -> Result<Vec<String>, VisionError> {
        Ok(self.annotate(image, Feature::Logos).await?.logos())
    }

    async fn web_detection(&self, image: &AnalysisInput) -> Result<WebDetection, VisionError> {
        Ok(self.annotate(image, Feature::Web).await?.web())
    }

    async fn text_detection(&self, image: &AnalysisInput) -> Result<String, VisionError> {
        Ok(self.annotate(image, Feature::Text).await?.full_text())
    }
}

pub fn request_body(image: &AnalysisInput, feature: Feature) -> serde_json::Value {
    let image = match image {
        AnalysisInput::Base64(content) => json!({ "content": content }),
        AnalysisInput::HttpUrl(uri) | AnalysisInput::GcsUri(uri) => {
            json!({ "source": { "imageUri": uri } })
        }
    };

    json!({
        "requests": [{
            "image": image,
            "features": [{
                "type": feature.api_name(),
                "maxResults": feature.max_results()
            }]
        }]
    })
}

// Wire format. Vision omits empty fields and zero-valued color channels.

#[derive(Debug, Deserialize)]
pub struct BatchAnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

impl BatchAnnotateResponse {
    fn into_single(self) -> Result<AnnotateImageResponse, VisionError> {
        let response = self
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| VisionError::Malformed("No responses in Vision reply".to_string()))?;

        // per-image failures come back inside a 200
        if let Some(error) = &response.error {
            return Err(VisionError::Api {
                status: error.http_status(),
                message: error.message.clone(),
            });
        }

        Ok(response)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    logo_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    image_properties_annotation: Option<ImageProperties>,
    #[serde(default)]
    web_detection: Option<WebDetectionWire>,
    #[serde(default)]
    full_text_annotation: Option<TextAnnotation>,
    #[serde(default)]
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageProperties {
    #[serde(default)]
    dominant_colors: Option<ColorList>,
}

#[derive(Debug, Deserialize)]
struct ColorList {
    #[serde(default)]
    colors: Vec<ColorInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColorInfo {
    #[serde(default)]
    color: WireColor,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    pixel_fraction: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireColor {
    red: f64,
    green: f64,
    blue: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebDetectionWire {
    #[serde(default)]
    best_guess_labels: Vec<BestGuessLabel>,
}

#[derive(Debug, Deserialize)]
struct BestGuessLabel {
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl Status {
    /// Maps the google.rpc code onto the HTTP status it travels as.
    fn http_status(&self) -> u16 {
        match self.code {
            3 | 9 | 11 => 400,
            16 => 401,
            7 => 403,
            5 => 404,
            8 => 429,
            4 => 504,
            14 => 503,
            _ => 500,
        }
    }
}

impl AnnotateImageResponse {
    pub fn labels(self) -> Vec<Label> {
        self.label_annotations
            .into_iter()
            .map(|a| Label {
                description: a.description,
                score: a.score,
            })
            .collect()
    }

    pub fn dominant_colors(self) -> Vec<DominantColor> {
        self.image_properties_annotation
            .and_then(|p| p.dominant_colors)
            .map(|list| {
                list.colors
                    .into_iter()
                    .map(|c| DominantColor {
                        rgb: Rgb::new(c.color.red, c.color.green, c.color.blue),
                        score: c.score,
                        pixel_fraction: c.pixel_fraction,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn logos(self) -> Vec<String> {
        self.logo_annotations
            .into_iter()
            .map(|a| a.description)
            .filter(|d| !d.is_empty())
            .collect()
    }

    pub fn web(self) -> WebDetection {
        WebDetection {
            best_guess_labels: self
                .web_detection
                .map(|w| w.best_guess_labels.into_iter().map(|b| b.label).collect())
                .unwrap_or_default(),
        }
    }

    pub fn full_text(self) -> String {
        self.full_text_annotation.map(|t| t.text).unwrap_or_default()
    }
}
