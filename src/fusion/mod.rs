// src/fusion/mod.rs
// Turns the five raw detection result sets into one ClothingAnalysis.
pub mod brand;
pub mod classifier;
pub mod colors;
pub mod pricing;
pub mod style;
pub mod text;

pub use brand::BrandCatalog;

use crate::models::*;
use chrono::{DateTime, Datelike, SecondsFormat, Utc};

pub const FEATURES: [&str; 5] = [
    "labelDetection",
    "imageProperties",
    "logoDetection",
    "webDetection",
    "textDetection",
];

pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Label descriptions followed by the web best guesses, space separated.
fn descriptive_text(bundle: &DetectionBundle) -> String {
    let labels = bundle
        .labels
        .iter()
        .map(|l| l.description.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} {}", labels, bundle.web.best_guess_labels.join(" "))
}

pub fn fuse(bundle: &DetectionBundle, catalog: &BrandCatalog, now: DateTime<Utc>) -> ClothingAnalysis {
    let ocr = text::normalize_ocr(&bundle.text);

    let classification = classifier::classify(&bundle.labels);
    let color_names = colors::top_colors(&bundle.colors);
    let brand = catalog.resolve(&bundle.logos, &bundle.web, &ocr);
    let profile = style::profile(&descriptive_text(bundle), &color_names);
    let condition = text::condition_from(&ocr);

    let colors: Vec<String> = color_names.iter().map(|c| c.as_str().to_string()).collect();

    let year = text::year_from(&ocr).unwrap_or_else(|| now.year().to_string());
    let model = text::model_from(&ocr).unwrap_or_else(|| {
        if classification.item_type == "Unknown" {
            String::new()
        } else {
            format!("{} {}", classification.item_type, colors[0]).trim().to_string()
        }
    });

    let pricing = pricing::estimate(catalog, &brand, classification.category, condition);

    ClothingAnalysis {
        summary: Summary {
            item_type: classification.item_type,
            category: classification.category,
            colors,
            style: profile.style,
            season: profile.season,
            occasion: profile.occasion,
            confidence: classification.confidence,
        },
        details: Details {
            brand,
            material: text::material_from(&ocr),
            size: text::size_from(&ocr),
            condition,
            year,
            model,
        },
        pricing,
        meta: AnalysisMeta {
            ts_iso: timestamp(now),
            used_vision: true,
            features_used: FEATURES.iter().map(|f| f.to_string()).collect(),
            raw: None,
        },
    }
}

/// The fixed record returned whenever real analysis is unavailable.
pub fn mock_analysis(now: DateTime<Utc>) -> ClothingAnalysis {
    ClothingAnalysis {
        summary: Summary {
            item_type: "T-Shirt".to_string(),
            category: Category::Top,
            colors: vec!["Gray".to_string(), "Blue".to_string()],
            style: Style::Casual,
            season: Season::AllSeasons,
            occasion: Occasion::Casual,
            confidence: 0.85,
        },
        details: Details {
            brand: "Mock Brand".to_string(),
            material: "Cotton".to_string(),
            size: "M".to_string(),
            condition: Condition::Good,
            year: "2023".to_string(),
            model: "Mock Model T-Shirt".to_string(),
        },
        pricing: Pricing {
            estimated_value: 45,
            market_price: 30,
            retail_price: 60,
            range: (25, 55),
            trend: Trend::Stable,
            currency: pricing::CURRENCY.to_string(),
        },
        meta: AnalysisMeta {
            ts_iso: timestamp(now),
            used_vision: false,
            features_used: vec!["mock-analysis".to_string()],
            raw: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap()
    }

    fn nike_bundle() -> DetectionBundle {
        DetectionBundle {
            labels: vec![Label {
                description: "sneakers".into(),
                score: 0.91,
            }],
            colors: vec![DominantColor {
                rgb: Rgb::new(10.0, 10.0, 12.0),
                score: 0.8,
                pixel_fraction: 0.6,
            }],
            logos: vec![],
            web: WebDetection::default(),
            text: "Nike Men's Dri-FIT size L 100% Polyester, New with tags".into(),
        }
    }

    #[test]
    fn nike_sneaker_scenario() {
        let a = fuse(&nike_bundle(), &BrandCatalog::default(), now());

        assert_eq!(a.summary.item_type, "Sneakers");
        assert_eq!(a.summary.category, Category::Footwear);
        assert!((a.summary.confidence - 0.91).abs() < 1e-9);
        assert_eq!(a.summary.colors, vec!["Black"]);
        assert_eq!(a.summary.season, Season::Winter);
        assert_eq!(a.details.brand, "Nike");
        assert_eq!(a.details.material, "Polyester");
        assert_eq!(a.details.size, "L");
        assert_eq!(a.details.condition, Condition::New);
        assert_eq!(a.pricing.market_price, 187);
        assert_eq!(a.pricing.estimated_value, 281);
        assert_eq!(a.pricing.retail_price, 374);
        assert_eq!(a.pricing.range, (150, 337));
        assert!(a.meta.used_vision);
        assert_eq!(a.meta.features_used.len(), 5);
    }

    #[test]
    fn empty_bundle_scenario() {
        let a = fuse(&DetectionBundle::default(), &BrandCatalog::default(), now());

        assert_eq!(a.summary.item_type, "Unknown");
        assert_eq!(a.summary.category, Category::Unknown);
        assert_eq!(a.summary.confidence, 0.65);
        assert_eq!(a.summary.colors, vec!["Mixed"]);
        assert_eq!(a.summary.style, Style::Casual);
        assert_eq!(a.summary.season, Season::AllSeasons);
        assert_eq!(a.summary.occasion, Occasion::Casual);
        assert_eq!(a.details.brand, "Unknown Brand");
        assert_eq!(a.details.material, "Mixed Materials");
        assert_eq!(a.details.size, "Unknown");
        assert_eq!(a.details.condition, Condition::Good);
        assert_eq!(a.details.year, "2026");
        assert_eq!(a.details.model, "");
        // 45 x 1.0 x 0.85
        assert_eq!(a.pricing.market_price, 38);
    }

    #[test]
    fn model_defaults_to_type_and_first_color() {
        let mut bundle = nike_bundle();
        bundle.text = "ADIDAS 2021".into();
        let a = fuse(&bundle, &BrandCatalog::default(), now());
        assert_eq!(a.details.model, "Sneakers Black");
        assert_eq!(a.details.year, "2021");
        assert_eq!(a.details.brand, "Adidas");
    }

    #[test]
    fn style_reads_web_best_guesses() {
        let bundle = DetectionBundle {
            labels: vec![Label {
                description: "Jacket".into(),
                score: 0.8,
            }],
            web: WebDetection {
                best_guess_labels: vec!["Business blazer".into()],
            },
            ..Default::default()
        };
        let a = fuse(&bundle, &BrandCatalog::default(), now());
        assert_eq!(a.summary.style, Style::Business);
        assert_eq!(a.summary.occasion, Occasion::Work);
    }

    #[test]
    fn fusion_is_deterministic() {
        let catalog = BrandCatalog::default();
        let first = serde_json::to_string(&fuse(&nike_bundle(), &catalog, now())).unwrap();
        let second = serde_json::to_string(&fuse(&nike_bundle(), &catalog, now())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn mock_record_is_fixed() {
        let a = mock_analysis(now());
        assert_eq!(a.summary.item_type, "T-Shirt");
        assert_eq!(a.summary.colors, vec!["Gray", "Blue"]);
        assert_eq!(a.details.brand, "Mock Brand");
        assert_eq!(a.pricing.range, (25, 55));
        assert!(!a.meta.used_vision);
        assert_eq!(a.meta.features_used, vec!["mock-analysis"]);
        assert_eq!(a.meta.ts_iso, "2026-10-14T09:30:00.000Z");
        assert_eq!(a, mock_analysis(now()));
    }
}
