// src/fusion/colors.rs
use crate::models::{DominantColor, Rgb};

pub const MAX_COLORS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorName {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Beige,
    Purple,
    Mixed,
}

impl ColorName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::Black => "Black",
            ColorName::White => "White",
            ColorName::Red => "Red",
            ColorName::Green => "Green",
            ColorName::Blue => "Blue",
            ColorName::Yellow => "Yellow",
            ColorName::Beige => "Beige",
            ColorName::Purple => "Purple",
            ColorName::Mixed => "Mixed",
        }
    }
}

fn spread(c: &Rgb) -> (f64, f64) {
    let max = c.red.max(c.green).max(c.blue);
    let min = c.red.min(c.green).min(c.blue);
    (max, min)
}

fn is_black(c: &Rgb) -> bool {
    let (max, min) = spread(c);
    max - min < 25.0 && max < 60.0
}

fn is_white(c: &Rgb) -> bool {
    let (max, min) = spread(c);
    max - min < 25.0 && max > 200.0
}

fn is_red(c: &Rgb) -> bool {
    c.red > 150.0 && c.green < 100.0 && c.blue < 100.0
}

fn is_green(c: &Rgb) -> bool {
    c.green > 150.0 && c.red < 120.0
}

fn is_blue(c: &Rgb) -> bool {
    c.blue > 150.0 && c.red < 120.0
}

fn is_yellow(c: &Rgb) -> bool {
    c.red > 200.0 && c.green > 200.0 && c.blue < 120.0
}

fn is_beige(c: &Rgb) -> bool {
    c.red > 200.0 && c.green > 150.0 && c.blue < 140.0
}

fn is_purple(c: &Rgb) -> bool {
    c.red > 160.0 && c.blue > 160.0 && c.green < 140.0
}

/// Evaluated top to bottom; several rules overlap (a bright cyan is both
/// green and blue), so the order decides.
pub const COLOR_RULES: &[(fn(&Rgb) -> bool, ColorName)] = &[
    (is_black, ColorName::Black),
    (is_white, ColorName::White),
    (is_red, ColorName::Red),
    (is_green, ColorName::Green),
    (is_blue, ColorName::Blue),
    (is_yellow, ColorName::Yellow),
    (is_beige, ColorName::Beige),
    (is_purple, ColorName::Purple),
];

pub fn name_color(rgb: &Rgb) -> ColorName {
    COLOR_RULES
        .iter()
        .find(|(matches, _)| matches(rgb))
        .map(|(_, name)| *name)
        .unwrap_or(ColorName::Mixed)
}

/// Names the (up to) three most prevalent colors. Never empty.
pub fn top_colors(colors: &[DominantColor]) -> Vec<ColorName> {
    let mut ranked: Vec<&DominantColor> = colors.iter().collect();
    // stable, so equal fractions keep the facility's order
    ranked.sort_by(|a, b| b.pixel_fraction.total_cmp(&a.pixel_fraction));

    let names: Vec<ColorName> = ranked
        .into_iter()
        .take(MAX_COLORS)
        .map(|c| name_color(&c.rgb))
        .collect();

    if names.is_empty() {
        vec![ColorName::Mixed]
    } else {
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dominant(r: f64, g: f64, b: f64, fraction: f64) -> DominantColor {
        DominantColor {
            rgb: Rgb::new(r, g, b),
            score: fraction,
            pixel_fraction: fraction,
        }
    }

    #[test]
    fn names_primary_colors() {
        assert_eq!(name_color(&Rgb::new(10.0, 10.0, 12.0)), ColorName::Black);
        assert_eq!(name_color(&Rgb::new(240.0, 238.0, 235.0)), ColorName::White);
        assert_eq!(name_color(&Rgb::new(200.0, 30.0, 40.0)), ColorName::Red);
        assert_eq!(name_color(&Rgb::new(40.0, 180.0, 60.0)), ColorName::Green);
        assert_eq!(name_color(&Rgb::new(30.0, 60.0, 200.0)), ColorName::Blue);
        assert_eq!(name_color(&Rgb::new(230.0, 220.0, 50.0)), ColorName::Yellow);
        assert_eq!(name_color(&Rgb::new(225.0, 180.0, 130.0)), ColorName::Beige);
        assert_eq!(name_color(&Rgb::new(180.0, 60.0, 190.0)), ColorName::Purple);
        assert_eq!(name_color(&Rgb::new(128.0, 128.0, 128.0)), ColorName::Mixed);
    }

    #[test]
    fn rule_order_resolves_overlaps() {
        // cyan satisfies both the green and blue rules; green is checked first
        assert_eq!(name_color(&Rgb::new(20.0, 200.0, 210.0)), ColorName::Green);
        // bright yellow also satisfies beige
        assert_eq!(name_color(&Rgb::new(250.0, 240.0, 60.0)), ColorName::Yellow);
        // near-white grey with slight warmth is still white before beige
        assert_eq!(name_color(&Rgb::new(230.0, 220.0, 210.0)), ColorName::White);
    }

    #[test]
    fn keeps_three_most_prevalent() {
        let colors = vec![
            dominant(30.0, 60.0, 200.0, 0.10),
            dominant(10.0, 10.0, 10.0, 0.50),
            dominant(200.0, 30.0, 40.0, 0.05),
            dominant(240.0, 240.0, 240.0, 0.30),
        ];
        assert_eq!(
            top_colors(&colors),
            vec![ColorName::Black, ColorName::White, ColorName::Blue]
        );
    }

    #[test]
    fn empty_input_yields_single_marker() {
        assert_eq!(top_colors(&[]), vec![ColorName::Mixed]);
    }

    #[test]
    fn output_length_is_bounded() {
        for n in 1..6 {
            let colors: Vec<_> = (0..n)
                .map(|i| dominant(i as f64 * 40.0, 90.0, 200.0, 0.1 * i as f64))
                .collect();
            let names = top_colors(&colors);
            assert!((1..=MAX_COLORS).contains(&names.len()));
        }
    }
}
