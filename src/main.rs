// src/main.rs
use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use log::{info, warn};
use std::sync::Arc;

mod config;
mod errors;
mod fusion;
mod handlers;
mod models;
mod services;
mod views;

use crate::config::Config;
use crate::handlers::{analyze, health_check, upload_image, vision_analyze};
use crate::services::{ClothingAnalyzer, GoogleVisionClient, ImageProcessor, VisionClient};

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<ClothingAnalyzer>,
    image_processor: Arc<ImageProcessor>,
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/analyze", web::post().to(analyze))
            .route("/upload", web::post().to(upload_image)),
    )
    .route("/api/vision-analyze", web::post().to(vision_analyze))
    .route("/health", web::get().to(health_check));
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting wardrobe-vision service...");

    let config = Config::from_env().context("invalid configuration")?;

    // Initialize services
    let client: Option<Arc<dyn VisionClient>> = match &config.vision_credential {
        Some(credential) => {
            let client = GoogleVisionClient::new(
                credential.clone(),
                config.vision_endpoint.clone(),
                config.vision_timeout,
            )
            .context("failed to build vision client")?;
            info!("Google Vision client configured ({})", config.vision_endpoint);
            Some(Arc::new(client) as Arc<dyn VisionClient>)
        }
        None => {
            warn!("Google Vision credentials not found, every analysis will use mock data");
            None
        }
    };

    let app_state = AppState {
        analyzer: Arc::new(ClothingAnalyzer::new(client, config.analyzer_settings())),
        image_processor: Arc::new(ImageProcessor::new(config.max_image_dimension)),
    };

    info!("Starting HTTP server on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind(&config.bind_addr)
    .with_context(|| format!("failed to bind {}", config.bind_addr))?
    .run()
    .await?;

    Ok(())
}
