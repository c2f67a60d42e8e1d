// src/fusion/brand.rs
use crate::models::WebDetection;

pub const UNKNOWN_BRAND: &str = "Unknown Brand";

const BRAND_HINTS: &[&str] = &[
    "Nike", "Adidas", "Puma", "Zara", "H&M", "Uniqlo", "Gucci", "Prada", "Louis Vuitton",
    "Hermès", "Chanel", "Balenciaga", "Calvin Klein", "Tommy Hilfiger", "Levi", "Levi's",
    "Ralph Lauren", "New Balance", "Asics", "Reebok", "Fendi", "Burberry", "Moncler",
    "Stone Island", "The North Face", "Patagonia", "Under Armour", "Off-White", "Bape",
    "Carhartt", "Diesel", "Guess", "Lacoste",
];

const LUXURY: &[&str] = &[
    "Gucci", "Prada", "Louis Vuitton", "Chanel", "Hermès", "Fendi", "Burberry", "Moncler",
];

const ATHLETIC: &[&str] = &[
    "Nike", "Adidas", "Puma", "New Balance", "Reebok", "Asics", "The North Face", "Patagonia",
    "Stone Island",
];

const MASS_MARKET: &[&str] = &[
    "Zara", "H&M", "Uniqlo", "Levi", "Levi's", "Calvin Klein", "Tommy Hilfiger", "Lacoste",
    "Diesel", "Guess", "Carhartt",
];

#[derive(Debug, Clone, PartialEq)]
pub struct BrandTier {
    pub name: String,
    pub brands: Vec<String>,
    pub base_price: f64,
}

/// Known apparel brands and their price tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandCatalog {
    /// Matched against web and OCR text in this order.
    pub hints: Vec<String>,
    /// Checked in this order; a brand's first tier wins.
    pub tiers: Vec<BrandTier>,
    pub unknown_brand_price: f64,
    pub default_price: f64,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl Default for BrandCatalog {
    fn default() -> Self {
        Self {
            hints: owned(BRAND_HINTS),
            tiers: vec![
                BrandTier {
                    name: "luxury".to_string(),
                    brands: owned(LUXURY),
                    base_price: 250.0,
                },
                BrandTier {
                    name: "athletic".to_string(),
                    brands: owned(ATHLETIC),
                    base_price: 120.0,
                },
                BrandTier {
                    name: "mass-market".to_string(),
                    brands: owned(MASS_MARKET),
                    base_price: 80.0,
                },
            ],
            unknown_brand_price: 45.0,
            default_price: 95.0,
        }
    }
}

impl BrandCatalog {
    /// First catalog brand contained in `text`, case-insensitively.
    pub fn find_in(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.hints
            .iter()
            .find(|brand| lower.contains(&brand.to_lowercase()))
            .map(String::as_str)
    }

    /// Base price for an exact brand name.
    pub fn base_price(&self, brand: &str) -> f64 {
        self.tiers
            .iter()
            .find(|tier| tier.brands.iter().any(|b| b == brand))
            .map(|tier| tier.base_price)
            .unwrap_or(if brand == UNKNOWN_BRAND {
                self.unknown_brand_price
            } else {
                self.default_price
            })
    }

    /// Logo first, then web best guess, then OCR text. No merging.
    pub fn resolve(&self, logos: &[String], web: &WebDetection, text: &str) -> String {
        if let Some(logo) = logos.iter().find(|l| !l.is_empty()) {
            return logo.clone();
        }

        if let Some(brand) = web
            .best_guess_labels
            .first()
            .and_then(|guess| self.find_in(guess))
        {
            return brand.to_string();
        }

        self.find_in(text)
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_BRAND.to_string())
    }
}
