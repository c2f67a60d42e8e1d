// src/handlers.rs
use crate::{AppState, errors::WardrobeError, models::*, views};
use actix_multipart::Multipart;
use actix_web::{Error, HttpResponse, web};
use base64::{Engine as _, engine::general_purpose};
use bytes::BytesMut;
use futures_util::TryStreamExt;
use log::info;
use serde::Deserialize;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

fn analysis_response(request_id: Uuid, body: impl serde::Serialize) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((REQUEST_ID_HEADER, request_id.to_string()))
        .json(body)
}

fn log_outcome(request_id: Uuid, analysis: &ClothingAnalysis) {
    info!(
        "[{}] {} / {} (usedVision={})",
        request_id, analysis.summary.item_type, analysis.details.brand, analysis.meta.used_vision
    );
}

/// Inline images are downsized before leaving the service. Offline there is
/// nothing to send, and unreadable content goes out as-is: either way the
/// analyzer answers with the mock record rather than an error.
fn prepare_inline(data: &AppState, content: String) -> String {
    if data.analyzer.uses_vision() {
        data.image_processor.prepare_inline_or_raw(content)
    } else {
        content
    }
}

pub async fn analyze(
    data: web::Data<AppState>,
    body: web::Json<AnalysisRequest>,
) -> Result<HttpResponse, Error> {
    let request_id = Uuid::new_v4();
    let mut request = body.into_inner();
    request.base64 = request.base64.map(|content| prepare_inline(&data, content));

    info!("[{}] Analyzing {}", request_id, describe_request(&request));
    let analysis = data.analyzer.analyze(&request).await?;
    log_outcome(request_id, &analysis);

    Ok(analysis_response(request_id, &analysis))
}

pub async fn upload_image(
    mut payload: Multipart,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let request_id = Uuid::new_v4();

    let mut field = payload
        .try_next()
        .await?
        .ok_or_else(|| WardrobeError::Validation("No image provided".to_string()))?;

    let filename = field
        .content_disposition()
        .get_filename()
        .unwrap_or("upload")
        .to_string();

    // Collect image data
    let mut image_data = BytesMut::new();
    while let Some(chunk) = field.try_next().await? {
        image_data.extend_from_slice(&chunk);
    }

    if image_data.is_empty() {
        return Err(WardrobeError::Validation("Uploaded image is empty".to_string()).into());
    }

    let content = if data.analyzer.uses_vision() {
        data.image_processor.prepare_bytes_or_raw(&image_data)
    } else {
        general_purpose::STANDARD.encode(&image_data)
    };

    info!(
        "[{}] Analyzing upload {} ({} bytes)",
        request_id,
        filename,
        image_data.len()
    );
    let analysis = data
        .analyzer
        .analyze_input(&AnalysisInput::Base64(content))
        .await;
    log_outcome(request_id, &analysis);

    Ok(analysis_response(request_id, &analysis))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionAnalyzeRequest {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub analysis_type: Option<String>,
}

/// Single-string image reference answered with one of the view shapes.
pub async fn vision_analyze(
    data: web::Data<AppState>,
    body: web::Json<VisionAnalyzeRequest>,
) -> Result<HttpResponse, Error> {
    let request_id = Uuid::new_v4();
    let kind = views::AnalysisType::parse(body.analysis_type.as_deref());

    let reference = match body.image.as_deref().map(str::trim) {
        Some(image) if !image.is_empty() => image,
        _ => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Image data is required"
            })));
        }
    };

    let input = match AnalysisInput::from_reference(reference) {
        AnalysisInput::Base64(content) => AnalysisInput::Base64(prepare_inline(&data, content)),
        other => other,
    };

    info!("[{}] Analyzing {} ({:?} view)", request_id, describe(&input), kind);
    let analysis = data.analyzer.analyze_input(&input).await;
    log_outcome(request_id, &analysis);

    Ok(analysis_response(request_id, views::render(&analysis, kind)))
}

pub async fn health_check(data: web::Data<AppState>) -> HttpResponse {
    let vision = if data.analyzer.uses_vision() {
        "configured"
    } else {
        "mock"
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "vision": vision
    }))
}

fn describe_request(request: &AnalysisRequest) -> String {
    match request.to_input() {
        Ok(input) => describe(&input),
        Err(_) => "request without a single image".to_string(),
    }
}

fn describe(input: &AnalysisInput) -> String {
    match input {
        AnalysisInput::Base64(content) => format!("inline image ({} base64 chars)", content.len()),
        AnalysisInput::HttpUrl(url) => format!("url {}", url),
        AnalysisInput::GcsUri(uri) => format!("storage object {}", uri),
    }
}
