// src/services/analyzer.rs
use crate::errors::{VisionError, WardrobeError};
use crate::fusion::{self, BrandCatalog};
use crate::models::*;
use crate::services::vision_client::VisionClient;
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    /// Bounds all five detection calls together.
    pub timeout: Duration,
    /// Extra attempts per call for transient failures.
    pub max_retries: u32,
    /// Attach the raw detection bundle to `meta.raw`.
    pub include_raw: bool,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            max_retries: 0,
            include_raw: false,
        }
    }
}

/// Runs the detection facilities for one image and fuses the results.
///
/// Without a client the analyzer works offline and always answers with the
/// mock record. With one, any failed call or an expired timeout also yields
/// the mock record: callers never see real and mock fields mixed.
pub struct ClothingAnalyzer {
    client: Option<Arc<dyn VisionClient>>,
    catalog: BrandCatalog,
    settings: AnalyzerSettings,
    clock: Arc<dyn Clock>,
}

impl ClothingAnalyzer {
    pub fn new(client: Option<Arc<dyn VisionClient>>, settings: AnalyzerSettings) -> Self {
        Self {
            client,
            catalog: BrandCatalog::default(),
            settings,
            clock: Arc::new(SystemClock),
        }
    }

    #[cfg(test)]
    pub fn offline() -> Self {
        Self::new(None, AnalyzerSettings::default())
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn uses_vision(&self) -> bool {
        self.client.is_some()
    }

    /// Fails only when the request names no usable image.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<ClothingAnalysis, WardrobeError> {
        let input = request.to_input()?;
        Ok(self.analyze_input(&input).await)
    }

    pub async fn analyze_input(&self, input: &AnalysisInput) -> ClothingAnalysis {
        let Some(client) = self.client.as_deref() else {
            info!("Vision credentials not configured, returning mock analysis");
            return fusion::mock_analysis(self.clock.now());
        };

        let start = Instant::now();
        match self.detect(client, input).await {
            Ok(bundle) => {
                let mut analysis = fusion::fuse(&bundle, &self.catalog, self.clock.now());
                if self.settings.include_raw {
                    analysis.meta.raw = serde_json::to_value(&bundle).ok();
                }
                info!(
                    "Analyzed {} ({:?}, confidence {:.2}) in {}ms",
                    analysis.summary.item_type,
                    analysis.summary.category,
                    analysis.summary.confidence,
                    start.elapsed().as_millis()
                );
                analysis
            }
            Err(e) => {
                error!("Vision API error, returning mock analysis: {}", e);
                fusion::mock_analysis(self.clock.now())
            }
        }
    }

    async fn detect(
        &self,
        client: &dyn VisionClient,
        input: &AnalysisInput,
    ) -> Result<DetectionBundle, VisionError> {
        let retries = self.settings.max_retries;

        let calls = async {
            let (labels, colors, logos, web, text) = tokio::try_join!(
                with_retries("labelDetection", retries, || client.label_detection(input)),
                with_retries("imageProperties", retries, || client.image_properties(input)),
                with_retries("logoDetection", retries, || client.logo_detection(input)),
                with_retries("webDetection", retries, || client.web_detection(input)),
                with_retries("textDetection", retries, || client.text_detection(input)),
            )?;

            Ok::<_, VisionError>(DetectionBundle {
                labels,
                colors,
                logos,
                web,
                text,
            })
        };

        tokio::time::timeout(self.settings.timeout, calls)
            .await
            .map_err(|_| VisionError::Timeout(self.settings.timeout.as_secs()))?
    }
}

async fn with_retries<T, F, Fut>(feature: &str, max_retries: u32, mut call: F) -> Result<T, VisionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, VisionError>>,
{
    let mut attempt = 0;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < max_retries => {
                attempt += 1;
                warn!("{} failed ({}), retry {}/{}", feature, e, attempt, max_retries);
                tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
            }
            Err(e) => return Err(e),
        }
    }
}
