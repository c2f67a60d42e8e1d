// src/fusion/style.rs
use crate::fusion::colors::ColorName;
use crate::models::{Occasion, Season, Style};

/// Keyword groups checked in order against the lowercased label text.
const STYLE_RULES: &[(&[&str], Style)] = &[
    (&["formal"], Style::Formal),
    (&["sport", "athletic"], Style::Sport),
    (&["street", "hoodie"], Style::Streetwear),
    (&["business"], Style::Business),
    (&["evening"], Style::Evening),
];

fn is_winter(text: &str, colors: &[ColorName]) -> bool {
    colors.contains(&ColorName::Black) || text.contains("wool") || text.contains("coat")
}

fn is_summer(text: &str, colors: &[ColorName]) -> bool {
    text.contains("linen") || colors.contains(&ColorName::Beige) || colors.contains(&ColorName::White)
}

/// Winter is checked first: a black linen shirt resolves to WINTER.
const SEASON_RULES: &[(fn(&str, &[ColorName]) -> bool, Season)] = &[
    (is_winter, Season::Winter),
    (is_summer, Season::Summer),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleProfile {
    pub style: Style,
    pub season: Season,
    pub occasion: Occasion,
}

pub fn infer_style(text: &str) -> Style {
    STYLE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, style)| *style)
        .unwrap_or(Style::Casual)
}

pub fn infer_season(text: &str, colors: &[ColorName]) -> Season {
    SEASON_RULES
        .iter()
        .find(|(matches, _)| matches(text, colors))
        .map(|(_, season)| *season)
        .unwrap_or(Season::AllSeasons)
}

/// Occasion follows the style; it is never inferred on its own.
pub fn occasion_for(style: Style) -> Occasion {
    match style {
        Style::Formal => Occasion::Formal,
        Style::Sport => Occasion::Sport,
        Style::Business => Occasion::Work,
        Style::Evening => Occasion::Evening,
        Style::Casual | Style::Streetwear | Style::Unknown => Occasion::Casual,
    }
}

pub fn profile(text: &str, colors: &[ColorName]) -> StyleProfile {
    let text = text.to_lowercase();
    let style = infer_style(&text);
    StyleProfile {
        style,
        season: infer_season(&text, colors),
        occasion: occasion_for(style),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_rules_in_order() {
        assert_eq!(infer_style("formal business suit"), Style::Formal);
        assert_eq!(infer_style("athletic shoe"), Style::Sport);
        assert_eq!(infer_style("sportswear street fashion"), Style::Sport);
        assert_eq!(infer_style("hoodie"), Style::Streetwear);
        assert_eq!(infer_style("business casual"), Style::Business);
        assert_eq!(infer_style("evening gown"), Style::Evening);
        assert_eq!(infer_style("t-shirt"), Style::Casual);
    }

    #[test]
    fn profile_lowercases_text() {
        let p = profile("Formal Wear Blazer", &[ColorName::Blue]);
        assert_eq!(p.style, Style::Formal);
        assert_eq!(p.occasion, Occasion::Formal);
        assert_eq!(p.season, Season::AllSeasons);
    }

    #[test]
    fn black_linen_is_winter() {
        assert_eq!(infer_season("linen shirt", &[ColorName::Black]), Season::Winter);
        assert_eq!(infer_season("linen shirt", &[ColorName::Blue]), Season::Summer);
    }

    #[test]
    fn season_rules() {
        assert_eq!(infer_season("wool coat", &[ColorName::White]), Season::Winter);
        assert_eq!(infer_season("dress", &[ColorName::Blue, ColorName::Beige]), Season::Summer);
        assert_eq!(infer_season("dress", &[ColorName::Red]), Season::AllSeasons);
        assert_eq!(infer_season("", &[ColorName::Mixed]), Season::AllSeasons);
    }

    #[test]
    fn occasion_mirrors_style() {
        assert_eq!(occasion_for(Style::Business), Occasion::Work);
        assert_eq!(occasion_for(Style::Sport), Occasion::Sport);
        assert_eq!(occasion_for(Style::Evening), Occasion::Evening);
        assert_eq!(occasion_for(Style::Streetwear), Occasion::Casual);
        assert_eq!(occasion_for(Style::Unknown), Occasion::Casual);
    }
}
