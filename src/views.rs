// src/views.rs
// Narrow response shapes served by the legacy /api/vision-analyze endpoint.
use crate::models::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    Basic,
    Details,
    Pricing,
    Summary,
}

impl AnalysisType {
    /// Absent means basic; unrecognised names get the bare summary.
    pub fn parse(name: Option<&str>) -> Self {
        match name {
            None | Some("basic") => AnalysisType::Basic,
            Some("details") => AnalysisType::Details,
            Some("pricing") => AnalysisType::Pricing,
            Some(_) => AnalysisType::Summary,
        }
    }
}

fn source(analysis: &ClothingAnalysis) -> &'static str {
    if analysis.meta.used_vision {
        "google-vision"
    } else {
        "mock"
    }
}

fn percent(confidence: f64) -> u32 {
    (confidence * 100.0).round() as u32
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicView {
    #[serde(rename = "type")]
    pub item_type: String,
    pub category: Category,
    pub colors: Vec<String>,
    pub style: Style,
    pub season: Vec<Season>,
    pub occasion: Vec<Occasion>,
    pub confidence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_vision: Option<bool>,
}

impl BasicView {
    pub fn summary(analysis: &ClothingAnalysis) -> Self {
        let s = &analysis.summary;
        Self {
            item_type: s.item_type.clone(),
            category: s.category,
            colors: s.colors.clone(),
            style: s.style,
            season: vec![s.season],
            occasion: vec![s.occasion],
            confidence: percent(s.confidence),
            notes: None,
            last_updated: None,
            source: None,
            used_vision: None,
        }
    }

    pub fn basic(analysis: &ClothingAnalysis) -> Self {
        let notes = if analysis.meta.used_vision {
            format!(
                "Analyzed using Google Vision API with {} features",
                analysis.meta.features_used.len()
            )
        } else {
            "Vision analysis unavailable - showing placeholder data".to_string()
        };

        Self {
            notes: Some(notes),
            last_updated: Some(analysis.meta.ts_iso.clone()),
            source: Some(source(analysis)),
            used_vision: Some(analysis.meta.used_vision),
            ..Self::summary(analysis)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DetailsView {
    pub details: Details,
}

impl DetailsView {
    pub fn new(analysis: &ClothingAnalysis) -> Self {
        let mut details = analysis.details.clone();
        if details.model.is_empty() {
            let first_color = analysis.summary.colors.first().map(String::as_str).unwrap_or("");
            details.model = format!("{} {}", analysis.summary.item_type, first_color)
                .trim()
                .to_string();
        }
        Self { details }
    }
}

#[derive(Debug, Serialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAnalysis {
    pub estimated_price: u32,
    pub market_price: u32,
    pub retail_price: u32,
    pub source: &'static str,
    pub last_updated: String,
    pub price_range: PriceRange,
    pub trending: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingView {
    pub price_analysis: PriceAnalysis,
}

impl PricingView {
    pub fn new(analysis: &ClothingAnalysis) -> Self {
        let p = &analysis.pricing;
        let source = if analysis.meta.used_vision {
            "Google Vision + Market Analysis"
        } else {
            "Estimated"
        };

        Self {
            price_analysis: PriceAnalysis {
                estimated_price: p.estimated_value,
                market_price: p.market_price,
                retail_price: p.retail_price,
                source,
                last_updated: analysis.meta.ts_iso.clone(),
                price_range: PriceRange {
                    min: p.range.0,
                    max: p.range.1,
                },
                trending: p.trend.as_str().to_lowercase(),
            },
        }
    }
}

pub fn render(analysis: &ClothingAnalysis, kind: AnalysisType) -> serde_json::Value {
    let value = match kind {
        AnalysisType::Basic => serde_json::to_value(BasicView::basic(analysis)),
        AnalysisType::Details => serde_json::to_value(DetailsView::new(analysis)),
        AnalysisType::Pricing => serde_json::to_value(PricingView::new(analysis)),
        AnalysisType::Summary => serde_json::to_value(BasicView::summary(analysis)),
    };
    // plain structs of strings and numbers always serialize
    value.unwrap_or(serde_json::Value::Null)
}
