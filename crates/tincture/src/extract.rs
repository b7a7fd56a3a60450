//! Themes from an already extracted color list.
//!
//! Decoding images and clustering pixels happens elsewhere. This module
//! takes the resulting colors (most dominant first), picks a visually diverse
//! subset and turns it into theme drafts with the same contrast rules as the
//! deterministic builder.

use tracing::debug;

use crate::color::Color;
use crate::palette::derive_theme_colors;
use crate::theme::ThemeDraft;

/// Colors darker than this lightness are skipped.
pub const MIN_LIGHTNESS: f64 = 15.0;
/// Colors lighter than this lightness are skipped.
pub const MAX_LIGHTNESS: f64 = 85.0;
/// Minimum Euclidean HSL distance between two selected colors.
pub const MIN_DISTANCE: f64 = 30.0;
/// Palette size used when extracting from an image.
pub const DEFAULT_PALETTE_SIZE: usize = 8;
/// Upper bound on themes produced from one palette.
pub const MAX_EXTRACTED_THEMES: usize = 3;

/// Euclidean distance between two colors in raw HSL coordinates.
///
/// Hue is not treated as circular.
pub fn hsl_distance(a: &Color, b: &Color) -> f64 {
    let (a, b) = (a.hsl(), b.hsl());
    let dh = a.h - b.h;
    let ds = a.s - b.s;
    let dl = a.l - b.l;
    dl.mul_add(dl, dh.mul_add(dh, ds * ds)).sqrt()
}

/// Pick up to `count` mid-lightness colors that are far enough apart.
///
/// Candidates are visited in order, so earlier (more dominant) colors win.
pub fn select_diverse_palette(colors: &[Color], count: usize) -> Vec<Color> {
    let mut selected: Vec<Color> = Vec::with_capacity(count.min(colors.len()));

    for color in colors {
        if selected.len() >= count {
            break;
        }

        let l = color.hsl().l;
        if !(MIN_LIGHTNESS..=MAX_LIGHTNESS).contains(&l) {
            continue;
        }

        if selected
            .iter()
            .all(|chosen| hsl_distance(color, chosen) >= MIN_DISTANCE)
        {
            selected.push(*color);
        }
    }

    debug!(
        extract.candidates = colors.len(),
        extract.selected = selected.len(),
        "Selected diverse palette"
    );
    selected
}

/// Build up to three drafts from an ordered palette.
///
/// Theme `i` uses `colors[i]` as primary and the next two colors (clamped to
/// the last one) as secondary and accent.
pub fn themes_from_extracted(colors: &[Color]) -> Vec<ThemeDraft> {
    let Some(last) = colors.len().checked_sub(1) else {
        return Vec::new();
    };

    (0..colors.len().min(MAX_EXTRACTED_THEMES))
        .map(|i| {
            let primary = &colors[i];
            let secondary = &colors[(i + 1).min(last)];
            let accent = &colors[(i + 2).min(last)];
            ThemeDraft::new(
                format!("Extracted Theme {}", i + 1),
                derive_theme_colors(primary, secondary, accent),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(hex: &str) -> Color {
        Color::parse(hex).unwrap()
    }

    #[test]
    fn test_hsl_distance() {
        let red = c("#ff0000");
        assert_eq!(hsl_distance(&red, &red), 0.0);
        // Same saturation and lightness, hue 0 vs 120.
        let green = c("#00ff00");
        assert!((hsl_distance(&red, &green) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_select_skips_extreme_lightness() {
        let colors = [c("#000000"), c("#ffffff"), c("#fafafa"), c("#3b82f6")];
        assert_eq!(select_diverse_palette(&colors, 8), vec![c("#3b82f6")]);
    }

    #[test]
    fn test_select_skips_near_duplicates() {
        let colors = [c("#3b82f6"), c("#3c83f7"), c("#ef4444")];
        assert_eq!(
            select_diverse_palette(&colors, 8),
            vec![c("#3b82f6"), c("#ef4444")]
        );
    }

    #[test]
    fn test_select_respects_count() {
        let colors = [c("#ff0000"), c("#00ff00"), c("#0000ff")];
        assert_eq!(select_diverse_palette(&colors, 2).len(), 2);
        assert!(select_diverse_palette(&colors, 0).is_empty());
        assert!(select_diverse_palette(&[], 8).is_empty());
    }

    #[test]
    fn test_themes_from_empty_palette() {
        assert!(themes_from_extracted(&[]).is_empty());
    }

    #[test]
    fn test_themes_from_single_color() {
        let blue = c("#3b82f6");
        let drafts = themes_from_extracted(&[blue]);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].name, "Extracted Theme 1");
        assert_eq!(drafts[0].colors(), derive_theme_colors(&blue, &blue, &blue));
    }

    #[test]
    fn test_themes_from_two_colors_clamp_indices() {
        let (a, b) = (c("#3b82f6"), c("#ef4444"));
        let drafts = themes_from_extracted(&[a, b]);
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].colors(), derive_theme_colors(&a, &b, &b));
        assert_eq!(drafts[1].colors(), derive_theme_colors(&b, &b, &b));
    }

    #[test]
    fn test_themes_from_long_palette() {
        let colors = [
            c("#3b82f6"),
            c("#ef4444"),
            c("#10b981"),
            c("#f59e0b"),
            c("#8b5cf6"),
        ];
        let drafts = themes_from_extracted(&colors);
        let names: Vec<&str> = drafts.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            ["Extracted Theme 1", "Extracted Theme 2", "Extracted Theme 3"]
        );
        assert_eq!(
            drafts[2].colors(),
            derive_theme_colors(&colors[2], &colors[3], &colors[4])
        );
    }
}
