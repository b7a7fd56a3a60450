//! WCAG contrast ratio evaluation and enforcement.
//!
//! Ratios follow WCAG 2.1: `(L_lighter + 0.05) / (L_darker + 0.05)` over
//! relative luminance, giving a value in `[1, 21]`.
//!
//! [`ensure_contrast`] nudges a foreground's HSL lightness in steps of two
//! points until it reaches a target ratio against a background. The search is
//! bounded and best effort: it always returns a color, but the color may still
//! fall short of the target for extreme inputs. Callers that need a guarantee
//! must check [`contrast_ratio`] on the result (or use [`adjust_for_contrast`]
//! and read [`ContrastAdjustment::met`]).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::color::{Color, ColorError, Hsl};

/// Normal text, level AA.
pub const AA_NORMAL: f64 = 4.5;
/// Large text and UI components, level AA.
pub const AA_LARGE: f64 = 3.0;
/// Normal text, level AAA.
pub const AAA_NORMAL: f64 = 7.0;
/// Large text, level AAA.
pub const AAA_LARGE: f64 = 4.5;
/// Black on white.
pub const MAX_RATIO: f64 = 21.0;

/// Upper bound on lightness steps taken by the enforcer.
pub const MAX_STEPS: u32 = 50;
/// Lightness change per step, in percentage points.
pub const STEP: f64 = 2.0;

/// Compute the WCAG contrast ratio between two colors.
///
/// Symmetric in its arguments. Returns exactly `1.0` when both colors have
/// the same luminance.
pub fn contrast_ratio(a: &Color, b: &Color) -> f64 {
    ratio_from_luminance(a.luminance(), b.luminance())
}

/// Compute the contrast ratio between two hex strings.
///
/// Unlike the rest of the crate this does not fail on malformed input: if
/// either string is not a valid `#rrggbb` color the conservative ratio `1.0`
/// is returned, so display code and palette logic always get a number.
pub fn contrast_ratio_hex(a: &str, b: &str) -> f64 {
    match (Color::parse(a), Color::parse(b)) {
        (Ok(a), Ok(b)) => contrast_ratio(&a, &b),
        _ => {
            debug!(contrast.a = a, contrast.b = b, "Unparseable color, using ratio 1.0");
            1.0
        }
    }
}

fn ratio_from_luminance(la: f64, lb: f64) -> f64 {
    let lighter = la.max(lb);
    let darker = la.min(lb);
    (lighter + 0.05) / (darker + 0.05)
}

/// Outcome of a contrast search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastAdjustment {
    /// The returned color.
    pub color: Color,
    /// The HSL value the color was rendered from.
    pub hsl: Hsl,
    /// Contrast of `color` against the background.
    pub ratio: f64,
    /// Lightness steps taken (0 when the input already passed).
    pub steps: u32,
    /// Whether `ratio` reached the target.
    pub met: bool,
}

/// Search for the nearest-lightness variant of `foreground` that reaches
/// `target` contrast against `background`.
///
/// Light backgrounds (luminance above 0.5) darken the foreground, dark
/// backgrounds lighten it. Hue and saturation are carried unchanged into
/// every candidate.
pub fn adjust_for_contrast(
    background: &Color,
    foreground: &Color,
    target: f64,
) -> ContrastAdjustment {
    let start = foreground.hsl();
    let ratio = contrast_ratio(background, foreground);
    if ratio >= target {
        trace!(contrast.ratio = ratio, contrast.target = target, "Contrast already met");
        return ContrastAdjustment {
            color: *foreground,
            hsl: start,
            ratio,
            steps: 0,
            met: true,
        };
    }

    let step = if background.is_light() { -STEP } else { STEP };
    let mut hsl = start;
    let mut color = *foreground;
    let mut current = ratio;
    let mut steps = 0;

    while current < target && steps < MAX_STEPS {
        hsl.l = (hsl.l + step).clamp(0.0, 100.0);
        color = Color::from_hsl(hsl);
        current = contrast_ratio(background, &color);
        steps += 1;

        if hsl.l <= 0.0 || hsl.l >= 100.0 {
            break;
        }
    }

    let met = current >= target;
    if met {
        trace!(
            contrast.from = %foreground,
            contrast.to = %color,
            contrast.steps = steps,
            "Contrast adjusted"
        );
    } else {
        debug!(
            contrast.background = %background,
            contrast.foreground = %foreground,
            contrast.result = %color,
            contrast.ratio = current,
            contrast.target = target,
            "Contrast target not reached"
        );
    }

    ContrastAdjustment {
        color,
        hsl,
        ratio: current,
        steps,
        met,
    }
}

/// Return a color close to `foreground` that meets `target` contrast against
/// `background`, on a best-effort basis.
///
/// If the pair already passes, `foreground` is returned unchanged.
pub fn ensure_contrast(background: &Color, foreground: &Color, target: f64) -> Color {
    adjust_for_contrast(background, foreground, target).color
}

/// String form of [`ensure_contrast`].
///
/// # Errors
/// Returns [`ColorError::InvalidFormat`] if either color is malformed.
pub fn ensure_contrast_hex(
    background: &str,
    foreground: &str,
    target: f64,
) -> Result<String, ColorError> {
    let background = Color::parse(background)?;
    let foreground = Color::parse(foreground)?;
    Ok(ensure_contrast(&background, &foreground, target).to_hex())
}

/// WCAG conformance level requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WcagLevel {
    #[default]
    Aa,
    Aaa,
}

impl WcagLevel {
    /// Minimum ratio for normal-size text at this level.
    pub const fn required_ratio(self) -> f64 {
        match self {
            Self::Aa => AA_NORMAL,
            Self::Aaa => AAA_NORMAL,
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aa => f.write_str("AA"),
            Self::Aaa => f.write_str("AAA"),
        }
    }
}

/// Highest WCAG grade a ratio satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WcagGrade {
    /// Below 3:1.
    Fail,
    /// At least 3:1 (large text and UI components).
    AaLarge,
    /// At least 4.5:1.
    Aa,
    /// At least 7:1.
    Aaa,
}

impl WcagGrade {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio >= AAA_NORMAL {
            Self::Aaa
        } else if ratio >= AA_NORMAL {
            Self::Aa
        } else if ratio >= AA_LARGE {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }
}

impl fmt::Display for WcagGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::AaLarge => "AA Large",
            Self::Fail => "Fail",
        };
        f.write_str(label)
    }
}

/// Badge-style verdict for a ratio at a requested level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compliance {
    /// Meets the requested level.
    Compliant,
    /// Misses the level but reaches 3:1.
    Partial,
    /// Below 3:1.
    Poor,
}

impl Compliance {
    pub fn evaluate(ratio: f64, level: WcagLevel) -> Self {
        if ratio >= level.required_ratio() {
            Self::Compliant
        } else if ratio >= AA_LARGE {
            Self::Partial
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for Compliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compliant => f.write_str("Compliant"),
            Self::Partial => f.write_str("Partial"),
            Self::Poor => f.write_str("Poor"),
        }
    }
}

/// Format a ratio the way contrast meters show it, e.g. `4.54:1`.
pub fn format_ratio(ratio: f64) -> String {
    format!("{ratio:.2}:1")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(hex: &str) -> Color {
        Color::parse(hex).unwrap()
    }

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ==================== Contrast ratio ====================

    #[test]
    fn test_contrast_black_white_is_21() {
        let ratio = contrast_ratio(&Color::BLACK, &Color::WHITE);
        assert!(approx_eq(ratio, 21.0, 0.01), "B/W contrast: {ratio}");
    }

    #[test]
    fn test_contrast_same_color_is_1() {
        let x = c("#3b82f6");
        assert_eq!(contrast_ratio(&x, &x), 1.0);
    }

    #[test]
    fn test_contrast_is_symmetric() {
        let a = c("#cc3344");
        let b = c("#1a1a66");
        assert_eq!(contrast_ratio(&a, &b), contrast_ratio(&b, &a));
    }

    #[test]
    fn test_contrast_known_gray() {
        // #767676 is the lightest gray that passes AA on white.
        let ratio = contrast_ratio(&c("#767676"), &Color::WHITE);
        assert!(approx_eq(ratio, 4.54, 0.01), "gray contrast: {ratio}");
    }

    #[test]
    fn test_contrast_hex_matches_typed() {
        let typed = contrast_ratio(&c("#1e293b"), &Color::WHITE);
        assert_eq!(contrast_ratio_hex("#1e293b", "#ffffff"), typed);
    }

    #[test]
    fn test_contrast_hex_falls_back_to_one() {
        assert_eq!(contrast_ratio_hex("blue", "#ffffff"), 1.0);
        assert_eq!(contrast_ratio_hex("#000000", "#zzz"), 1.0);
        assert_eq!(contrast_ratio_hex("", ""), 1.0);
    }

    // ==================== ensure_contrast ====================

    #[test]
    fn test_ensure_contrast_noop_when_passing() {
        let fg = c("#1e293b");
        let adjustment = adjust_for_contrast(&Color::WHITE, &fg, AA_NORMAL);
        assert_eq!(adjustment.color, fg);
        assert_eq!(adjustment.steps, 0);
        assert!(adjustment.met);
    }

    #[test]
    fn test_ensure_contrast_does_not_push_passing_color() {
        // Passes 3.0 but not 7.0; asking for 3.0 must not change it.
        let fg = c("#64748b");
        assert!(contrast_ratio(&Color::WHITE, &fg) < AAA_NORMAL);
        assert_eq!(ensure_contrast(&Color::WHITE, &fg, AA_LARGE), fg);
    }

    #[test]
    fn test_ensure_contrast_light_background_darkens() {
        let fg = c("#eeeeee");
        let start = contrast_ratio(&Color::WHITE, &fg);
        assert!(approx_eq(start, 1.16, 0.01), "start ratio: {start}");

        let result = ensure_contrast(&Color::WHITE, &fg, AA_NORMAL);
        assert!(contrast_ratio(&Color::WHITE, &result) >= AA_NORMAL);
        assert!(result.hsl().l < fg.hsl().l - 20.0, "not darker: {result}");
    }

    #[test]
    fn test_ensure_contrast_dark_background_lightens() {
        let bg = c("#0f172a");
        let fg = c("#1e3a8a");
        let result = ensure_contrast(&bg, &fg, AA_LARGE);
        assert!(contrast_ratio(&bg, &result) >= AA_LARGE);
        assert!(result.hsl().l > fg.hsl().l);
    }

    #[test]
    fn test_ensure_contrast_preserves_hue_and_saturation() {
        let fg = c("#93c5fd");
        let start = fg.hsl();
        let adjustment = adjust_for_contrast(&Color::WHITE, &fg, AA_NORMAL);
        assert!(adjustment.steps > 0);
        assert_eq!(adjustment.hsl.h, start.h);
        assert_eq!(adjustment.hsl.s, start.s);
        assert_eq!(adjustment.color, Color::from_hsl(adjustment.hsl));
    }

    #[test]
    fn test_ensure_contrast_steps_two_points() {
        let fg = c("#eeeeee");
        let adjustment = adjust_for_contrast(&Color::WHITE, &fg, AA_NORMAL);
        let expected = fg.hsl().l - STEP * adjustment.steps as f64;
        assert!(approx_eq(adjustment.hsl.l, expected, 1e-9));
    }

    #[test]
    fn test_ensure_contrast_best_effort_when_unreachable() {
        // Mid-gray background: neither black nor white gets 21:1.
        let bg = c("#777777");
        let adjustment = adjust_for_contrast(&bg, &c("#787878"), MAX_RATIO);
        assert!(!adjustment.met);
        assert!(adjustment.steps <= MAX_STEPS);
        assert_eq!(adjustment.hsl.l, 100.0);
    }

    #[test]
    fn test_ensure_contrast_step_cap() {
        // Walks the whole lightness range from white towards black.
        let adjustment = adjust_for_contrast(&Color::WHITE, &Color::WHITE, MAX_RATIO);
        assert!(adjustment.steps <= MAX_STEPS);
        assert!(adjustment.met || adjustment.hsl.l == 0.0);
    }

    #[test]
    fn test_ensure_contrast_hex() {
        let out = ensure_contrast_hex("#ffffff", "#eeeeee", AA_NORMAL).unwrap();
        assert!(contrast_ratio_hex("#ffffff", &out) >= AA_NORMAL);
        assert!(ensure_contrast_hex("#ffffff", "blue", AA_NORMAL).is_err());
        assert!(ensure_contrast_hex("white", "#000000", AA_NORMAL).is_err());
    }

    // ==================== Grading ====================

    #[test]
    fn test_wcag_grade_thresholds() {
        assert_eq!(WcagGrade::for_ratio(21.0), WcagGrade::Aaa);
        assert_eq!(WcagGrade::for_ratio(7.0), WcagGrade::Aaa);
        assert_eq!(WcagGrade::for_ratio(6.99), WcagGrade::Aa);
        assert_eq!(WcagGrade::for_ratio(4.5), WcagGrade::Aa);
        assert_eq!(WcagGrade::for_ratio(3.0), WcagGrade::AaLarge);
        assert_eq!(WcagGrade::for_ratio(2.99), WcagGrade::Fail);
        assert!(WcagGrade::Aaa > WcagGrade::Fail);
    }

    #[test]
    fn test_compliance_levels() {
        assert_eq!(Compliance::evaluate(4.6, WcagLevel::Aa), Compliance::Compliant);
        assert_eq!(Compliance::evaluate(4.6, WcagLevel::Aaa), Compliance::Partial);
        assert_eq!(Compliance::evaluate(3.0, WcagLevel::Aa), Compliance::Partial);
        assert_eq!(Compliance::evaluate(2.0, WcagLevel::Aaa), Compliance::Poor);
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(21.0), "21.00:1");
        assert_eq!(format_ratio(4.5432), "4.54:1");
        assert_eq!(WcagLevel::Aaa.to_string(), "AAA");
        assert_eq!(WcagGrade::AaLarge.to_string(), "AA Large");
    }
}
