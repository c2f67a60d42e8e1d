// src/fusion/classifier.rs
use crate::models::{Category, Label};

/// Confidence reported when no label names a known garment.
pub const DEFAULT_CONFIDENCE: f64 = 0.65;

/// Lowercase garment noun -> (type, category). Scanned in this order.
pub const CLOTHING_MAP: &[(&str, &str, Category)] = &[
    ("shirt", "Shirt", Category::Top),
    ("t-shirt", "T-Shirt", Category::Top),
    ("blouse", "Blouse", Category::Top),
    ("top", "Top", Category::Top),
    ("trousers", "Trousers", Category::Bottom),
    ("pants", "Pants", Category::Bottom),
    ("jeans", "Jeans", Category::Bottom),
    ("shorts", "Shorts", Category::Bottom),
    ("skirt", "Skirt", Category::Bottom),
    ("dress", "Dress", Category::OnePiece),
    ("jacket", "Jacket", Category::Outerwear),
    ("hoodie", "Hoodie", Category::Outerwear),
    ("coat", "Coat", Category::Outerwear),
    ("sweater", "Sweater", Category::Top),
    ("shoe", "Shoes", Category::Footwear),
    ("sneakers", "Sneakers", Category::Footwear),
    ("belt", "Belt", Category::Accessory),
    ("bag", "Bag", Category::Accessory),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub item_type: String,
    pub category: Category,
    pub confidence: f64,
}

/// Picks the highest-scoring label that contains a garment noun.
///
/// A later hit only wins with a strictly greater score, so ties keep the
/// first label and, within one label, the first key in `CLOTHING_MAP`.
pub fn classify(labels: &[Label]) -> Classification {
    let mut best: Option<(&str, Category, f64)> = None;

    for label in labels {
        let text = label.description.to_lowercase();
        for (key, item_type, category) in CLOTHING_MAP {
            if !text.contains(key) {
                continue;
            }
            let best_score = best.map(|(_, _, score)| score).unwrap_or(0.0);
            if label.score > best_score {
                best = Some((*item_type, *category, label.score));
            }
        }
    }

    match best {
        Some((item_type, category, confidence)) => Classification {
            item_type: item_type.to_string(),
            category,
            confidence,
        },
        None => Classification {
            item_type: "Unknown".to_string(),
            category: Category::Unknown,
            confidence: DEFAULT_CONFIDENCE,
        },
    }
}
