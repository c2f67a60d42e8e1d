// src/fusion/text.rs
// Attribute extraction from OCR text.
use crate::models::Condition;
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIXED_MATERIALS: &str = "Mixed Materials";
pub const UNKNOWN_SIZE: &str = "Unknown";

const MATERIALS: &[&str] = &[
    "cotton", "polyester", "wool", "silk", "linen", "leather", "denim", "nylon", "spandex",
    "viscose", "rayon", "acrylic", "cashmere", "satin", "suede", "modal", "elastane", "hemp",
    "bamboo", "tencel", "lyocell",
];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

static SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(XXS|XS|S|M|L|XL|XXL|2XL|3XL|EU\s?\d{2}|US\s?\d{1,2}|UK\s?\d{1,2}|[34]\d)\b",
    )
    .expect("valid size pattern")
});

static CONDITION_RULES: Lazy<Vec<(Regex, Condition)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"(?i)\b(new|unworn|with tags)\b").expect("valid condition pattern"),
            Condition::New,
        ),
        (
            Regex::new(r"(?i)\b(excellent|like new)\b").expect("valid condition pattern"),
            Condition::Excellent,
        ),
    ]
});

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(20\d{2}|19\d{2})\b").expect("valid year pattern"));

static MODEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(model|style|fit)\s*[:\-]?\s*([A-Za-z0-9\- ]{2,25})")
        .expect("valid model pattern")
});

/// Collapses runs of whitespace (OCR line breaks included) to single spaces.
pub fn normalize_ocr(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

pub fn material_from(text: &str) -> String {
    let lower = text.to_lowercase();
    if let Some(material) = MATERIALS.iter().find(|m| lower.contains(*m)) {
        return capitalize(material);
    }
    // explicit blends and unlabeled garments read the same
    MIXED_MATERIALS.to_string()
}

pub fn size_from(text: &str) -> String {
    SIZE.find_iter(text)
        // the "s" of a possessive ("Men's") is not a size
        .find(|m| !text[..m.start()].ends_with(&['\'', '’'][..]))
        .map(|m| m.as_str().to_uppercase())
        .unwrap_or_else(|| UNKNOWN_SIZE.to_string())
}

/// Only New, Excellent and Good are reachable from tag keywords.
pub fn condition_from(text: &str) -> Condition {
    CONDITION_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, condition)| *condition)
        .unwrap_or(Condition::Good)
}

pub fn year_from(text: &str) -> Option<String> {
    YEAR.find(text).map(|m| m.as_str().to_string())
}

pub fn model_from(text: &str) -> Option<String> {
    MODEL
        .captures(text)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().trim().to_string())
        .filter(|m| !m.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NIKE_TAG: &str = "Nike Men's Dri-FIT size L 100% Polyester, New with tags";

    #[test]
    fn normalizes_whitespace() {
        assert_eq!(normalize_ocr("  NIKE\n\nDri-FIT\t L  "), "NIKE Dri-FIT L");
    }

    #[test]
    fn material_first_listed_fabric_wins() {
        assert_eq!(material_from(NIKE_TAG), "Polyester");
        assert_eq!(material_from("60% POLYESTER 40% COTTON"), "Cotton");
        assert_eq!(material_from("wool blend"), "Wool");
    }

    #[test]
    fn material_defaults_to_mixed() {
        assert_eq!(material_from("fabric blend"), MIXED_MATERIALS);
        assert_eq!(material_from(""), MIXED_MATERIALS);
    }

    #[test]
    fn blend_words_are_not_fabrics() {
        // "mixed" and "blend" describe a composition, never a fabric name
        assert_eq!(material_from("poly blend"), MIXED_MATERIALS);
        assert_eq!(material_from("MIXED FIBRES"), MIXED_MATERIALS);
        assert!(!MATERIALS.contains(&"mixed"));
        assert!(!MATERIALS.contains(&"blend"));
    }

    #[test]
    fn size_skips_possessive_s() {
        assert_eq!(size_from(NIKE_TAG), "L");
    }

    #[test]
    fn size_tokens() {
        assert_eq!(size_from("Taille / Size: xl"), "XL");
        assert_eq!(size_from("EU 42 made in Portugal"), "EU 42");
        assert_eq!(size_from("us10"), "US10");
        assert_eq!(size_from("waist 34"), "34");
        assert_eq!(size_from("100% cotton"), UNKNOWN_SIZE);
        assert_eq!(size_from(""), UNKNOWN_SIZE);
    }

    #[test]
    fn condition_keywords() {
        assert_eq!(condition_from(NIKE_TAG), Condition::New);
        assert_eq!(condition_from("UNWORN"), Condition::New);
        assert_eq!(condition_from("excellent shape"), Condition::Excellent);
        // "like new" hits the New rule first
        assert_eq!(condition_from("like new"), Condition::New);
        assert_eq!(condition_from("renewed"), Condition::Good);
        assert_eq!(condition_from(""), Condition::Good);
    }

    #[test]
    fn fair_and_unknown_conditions_are_unreachable() {
        let samples = [
            NIKE_TAG,
            "fair condition",
            "unknown",
            "worn, some pilling",
            "excellent",
            "",
        ];
        for sample in samples {
            let condition = condition_from(sample);
            assert_ne!(condition, Condition::Fair, "{sample}");
            assert_ne!(condition, Condition::Unknown, "{sample}");
        }
    }

    #[test]
    fn year_and_model() {
        assert_eq!(year_from("SS 2019 collection"), Some("2019".into()));
        assert_eq!(year_from("RN 12345"), None);
        assert_eq!(model_from("Model: Air Max 90"), Some("Air Max 90".into()));
        assert_eq!(model_from("100% cotton"), None);
    }
}
