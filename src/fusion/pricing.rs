// src/fusion/pricing.rs
//! Heuristic price estimate: brand tier base x category factor x condition
//! factor. There is no market data source, so the trend is always stable.

use crate::fusion::brand::BrandCatalog;
use crate::models::{Category, Condition, Pricing, Trend};

pub const CURRENCY: &str = "USD";
const MIN_RANGE_LOW: u32 = 10;

pub fn category_factor(category: Category) -> f64 {
    match category {
        Category::Outerwear => 1.5,
        Category::Footwear => 1.3,
        Category::OnePiece => 1.2,
        Category::Bottom => 1.0,
        Category::Top => 0.9,
        Category::Accessory => 0.8,
        Category::Unknown => 1.0,
    }
}

pub fn condition_factor(condition: Condition) -> f64 {
    match condition {
        Condition::New => 1.2,
        Condition::Excellent => 1.0,
        Condition::Good => 0.85,
        Condition::Fair => 0.6,
        Condition::Unknown => 0.85,
    }
}

fn round(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

pub fn estimate(
    catalog: &BrandCatalog,
    brand: &str,
    category: Category,
    condition: Condition,
) -> Pricing {
    let base = catalog.base_price(brand);
    let market_price = round(base * category_factor(category) * condition_factor(condition));
    let market = market_price as f64;

    // the floor only binds for sub-10 prices, keep it under the market price
    let low = round(market * 0.8).max(MIN_RANGE_LOW).min(market_price);
    let high = round(market * 1.8).max(market_price);

    Pricing {
        estimated_value: round(market * 1.5),
        market_price,
        retail_price: round(market * 2.0),
        range: (low, high),
        trend: Trend::Stable,
        currency: CURRENCY.to_string(),
    }
}
