//! Themes and the deterministic theme set builder.
//!
//! A [`Theme`] is a named pair of light/dark palettes plus provenance. Themes
//! are produced in batches of three: [`build_theme_set`] derives the
//! "Modern Professional", "Vibrant Creative" and "Subtle Elegant" variants
//! from a single primary color without calling any external service.
//!
//! # Example
//!
//! ```rust
//! use tincture::theme::{ColorInput, build_theme_set};
//!
//! let themes = build_theme_set(&ColorInput::new("#3b82f6")).unwrap();
//! assert_eq!(themes[0].name(), "Modern Professional");
//! assert_eq!(themes[0].colors().light.background.to_hex(), "#ffffff");
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::color::{Color, ColorError};
use crate::contrast::{AA_NORMAL, AAA_NORMAL, contrast_ratio_hex};
use crate::palette::{
    ColorRoles, Mode, Role, ThemeColors, derive_theme_colors, shift_hue, shift_saturation,
};

/// Provenance tag written by the deterministic builder.
pub const DETERMINISTIC_SOURCE: &str = "deterministic";

/// Errors produced while building themes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("invalid theme input: {0}")]
    InvalidColor(#[from] ColorError),
}

/// How the user seeded a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Color,
    Image,
    Description,
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color => f.write_str("color"),
            Self::Image => f.write_str("image"),
            Self::Description => f.write_str("description"),
        }
    }
}

/// Base colors supplied by the user.
///
/// Values are kept as raw strings and validated when a theme set is built,
/// so malformed input is reported with the offending text. Empty
/// `secondary`/`accent` strings count as absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorInput {
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

impl ColorInput {
    /// Input with only a primary color.
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
            accent: None,
        }
    }

    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary = Some(secondary.into());
        self
    }

    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }

    /// Parse all supplied colors.
    ///
    /// # Errors
    /// Returns [`ColorError::InvalidFormat`] for a malformed primary or a
    /// malformed non-empty secondary/accent.
    pub fn resolve(&self) -> Result<ResolvedInput, ColorError> {
        fn optional(value: Option<&String>) -> Result<Option<Color>, ColorError> {
            match value.map(String::as_str) {
                None | Some("") => Ok(None),
                Some(hex) => Color::parse(hex).map(Some),
            }
        }

        Ok(ResolvedInput {
            primary: Color::parse(&self.primary)?,
            secondary: optional(self.secondary.as_ref())?,
            accent: optional(self.accent.as_ref())?,
        })
    }

    fn provenance(&self, source: &str) -> Value {
        json!({
            "primary": self.primary,
            "secondary": self.secondary,
            "accent": self.accent,
            "generatedBy": source,
        })
    }
}

/// A [`ColorInput`] whose colors have been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedInput {
    pub primary: Color,
    pub secondary: Option<Color>,
    pub accent: Option<Color>,
}

/// The three deterministic recipes, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeVariant {
    ModernProfessional,
    VibrantCreative,
    SubtleElegant,
}

impl ThemeVariant {
    pub const ALL: [Self; 3] = [
        Self::ModernProfessional,
        Self::VibrantCreative,
        Self::SubtleElegant,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::ModernProfessional => "Modern Professional",
            Self::VibrantCreative => "Vibrant Creative",
            Self::SubtleElegant => "Subtle Elegant",
        }
    }

    /// This variant's take on the brand color, applied even when secondary
    /// and accent are supplied.
    pub fn primary(self, primary: &Color) -> Color {
        match self {
            Self::ModernProfessional => *primary,
            Self::VibrantCreative => shift_saturation(primary, 20.0),
            Self::SubtleElegant => shift_saturation(primary, -20.0),
        }
    }

    /// Secondary color used when the caller supplied none.
    pub fn secondary_fallback(self, primary: &Color) -> Color {
        match self {
            Self::ModernProfessional => shift_hue(primary, 30.0),
            Self::VibrantCreative => shift_hue(&shift_saturation(primary, 20.0), 60.0),
            Self::SubtleElegant => shift_hue(&shift_saturation(primary, -20.0), 45.0),
        }
    }

    /// Accent color used when the caller supplied none.
    pub fn accent_fallback(self, primary: &Color) -> Color {
        match self {
            Self::ModernProfessional => shift_hue(primary, -60.0),
            Self::VibrantCreative => shift_hue(primary, -90.0),
            Self::SubtleElegant => shift_hue(primary, 120.0),
        }
    }

    /// Derive this variant's palettes.
    pub fn derive(self, input: &ResolvedInput) -> ThemeDraft {
        let base = input.primary;
        let secondary = input
            .secondary
            .unwrap_or_else(|| self.secondary_fallback(&base));
        let accent = input.accent.unwrap_or_else(|| self.accent_fallback(&base));

        let colors = derive_theme_colors(&self.primary(&base), &secondary, &accent);
        ThemeDraft::new(self.name(), colors)
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A generated but not yet stored theme: a name and both palettes.
///
/// This is the shape every supplier produces, deterministic or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDraft {
    pub name: String,
    pub light: ColorRoles,
    pub dark: ColorRoles,
}

impl ThemeDraft {
    pub fn new(name: impl Into<String>, colors: ThemeColors) -> Self {
        Self {
            name: name.into(),
            light: colors.light,
            dark: colors.dark,
        }
    }

    pub fn colors(&self) -> ThemeColors {
        ThemeColors {
            light: self.light.clone(),
            dark: self.dark.clone(),
        }
    }

    /// Attach provenance, producing something a store can persist.
    pub fn into_new_theme(self, input_type: InputType, input_data: Value) -> NewTheme {
        NewTheme {
            name: self.name,
            colors: ThemeColors {
                light: self.light,
                dark: self.dark,
            },
            input_type,
            input_data,
        }
    }
}

/// Everything needed to create a [`Theme`] except its id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTheme {
    pub name: String,
    pub colors: ThemeColors,
    pub input_type: InputType,
    #[serde(default)]
    pub input_data: Value,
}

/// A stored theme. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    id: String,
    name: String,
    colors: ThemeColors,
    input_type: InputType,
    #[serde(default)]
    input_data: Value,
    created_at: DateTime<Utc>,
}

impl Theme {
    /// Create a theme with a fresh id and the current time.
    pub fn new(new: NewTheme) -> Self {
        let theme = Self {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            colors: new.colors,
            input_type: new.input_type,
            input_data: new.input_data,
            created_at: Utc::now(),
        };
        debug!(theme.id = %theme.id, theme.name = %theme.name, "Theme created");
        theme
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.colors
    }

    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    pub fn input_data(&self) -> &Value {
        &self.input_data
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Contrast ratio between two roles of one mode.
    ///
    /// The shadow role is not a hex color, so pairs involving it report 1.0.
    pub fn contrast_ratio(&self, mode: Mode, fg: Role, bg: Role) -> f64 {
        let roles = self.colors.mode(mode);
        contrast_ratio_hex(&roles.get(fg), &roles.get(bg))
    }

    /// Check if a role pair meets WCAG AA contrast (>= 4.5:1).
    pub fn check_contrast_aa(&self, mode: Mode, fg: Role, bg: Role) -> bool {
        let ratio = self.contrast_ratio(mode, fg, bg);
        let ok = ratio >= AA_NORMAL;
        if !ok {
            warn!(
                theme.contrast_ratio = ratio,
                theme.fg = %fg,
                theme.bg = %bg,
                theme.mode = %mode,
                theme.name = %self.name(),
                "Theme contrast below WCAG AA"
            );
        }
        ok
    }

    /// Check if a role pair meets WCAG AAA contrast (>= 7.0:1).
    pub fn check_contrast_aaa(&self, mode: Mode, fg: Role, bg: Role) -> bool {
        self.contrast_ratio(mode, fg, bg) >= AAA_NORMAL
    }
}

/// Derive the three deterministic drafts.
///
/// # Errors
/// Returns [`ThemeError::InvalidColor`] if any supplied color is malformed.
pub fn build_theme_drafts(input: &ColorInput) -> Result<[ThemeDraft; 3], ThemeError> {
    let resolved = input.resolve()?;
    Ok(ThemeVariant::ALL.map(|variant| variant.derive(&resolved)))
}

/// Build the three deterministic themes for `input`.
///
/// Explicit secondary/accent colors are used by all three variants; missing
/// ones are synthesized per variant from the primary.
///
/// # Errors
/// Returns [`ThemeError::InvalidColor`] if any supplied color is malformed.
pub fn build_theme_set(input: &ColorInput) -> Result<[Theme; 3], ThemeError> {
    let drafts = build_theme_drafts(input)?;
    let provenance = input.provenance(DETERMINISTIC_SOURCE);
    let themes = drafts.map(|draft| {
        Theme::new(draft.into_new_theme(InputType::Color, provenance.clone()))
    });
    info!(
        theme.primary = %input.primary,
        theme.count = themes.len(),
        "Built deterministic theme set"
    );
    Ok(themes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::{AA_LARGE, contrast_ratio, ensure_contrast};
    use crate::palette::{DARK_BACKGROUND, LIGHT_BACKGROUND};

    fn c(hex: &str) -> Color {
        Color::parse(hex).unwrap()
    }

    #[test]
    fn test_theme_set_names_and_order() {
        let themes = build_theme_set(&ColorInput::new("#3b82f6")).unwrap();
        let names: Vec<&str> = themes.iter().map(Theme::name).collect();
        assert_eq!(
            names,
            ["Modern Professional", "Vibrant Creative", "Subtle Elegant"]
        );
    }

    #[test]
    fn test_theme_set_shape() {
        let themes = build_theme_set(&ColorInput::new("#3b82f6")).unwrap();
        for theme in &themes {
            assert_eq!(theme.input_type(), InputType::Color);
            for mode in Mode::ALL {
                let roles = theme.colors().mode(mode);
                for (role, value) in roles.entries() {
                    if role == Role::Shadow {
                        assert!(value.starts_with("rgba("), "{value}");
                    } else {
                        assert!(Color::parse(&value).is_ok(), "{role}: {value}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_theme_set_ids_are_unique() {
        let themes = build_theme_set(&ColorInput::new("#3b82f6")).unwrap();
        assert_ne!(themes[0].id(), themes[1].id());
        assert_ne!(themes[1].id(), themes[2].id());
    }

    #[test]
    fn test_theme_set_is_deterministic() {
        let input = ColorInput::new("#3b82f6");
        let a = build_theme_set(&input).unwrap();
        let b = build_theme_set(&input).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.colors(), y.colors());
            assert_eq!(x.name(), y.name());
        }
    }

    #[test]
    fn test_theme_set_rejects_invalid_primary() {
        for bad in ["blue", "#zzz", "#fff", ""] {
            let err = build_theme_set(&ColorInput::new(bad)).unwrap_err();
            assert!(matches!(
                err,
                ThemeError::InvalidColor(ColorError::InvalidFormat { .. })
            ));
        }
    }

    #[test]
    fn test_theme_set_rejects_invalid_secondary() {
        let input = ColorInput::new("#3b82f6").with_secondary("green");
        assert!(build_theme_set(&input).is_err());
    }

    #[test]
    fn test_empty_optional_colors_count_as_absent() {
        let blank = ColorInput::new("#3b82f6")
            .with_secondary("")
            .with_accent("");
        let plain = ColorInput::new("#3b82f6");
        assert_eq!(
            build_theme_drafts(&blank).unwrap(),
            build_theme_drafts(&plain).unwrap()
        );
    }

    #[test]
    fn test_fallback_recipes() {
        let primary = c("#3b82f6");
        assert_eq!(
            ThemeVariant::ModernProfessional.secondary_fallback(&primary),
            shift_hue(&primary, 30.0)
        );
        assert_eq!(
            ThemeVariant::ModernProfessional.accent_fallback(&primary),
            shift_hue(&primary, -60.0)
        );
        assert_eq!(
            ThemeVariant::VibrantCreative.secondary_fallback(&primary),
            shift_hue(&shift_saturation(&primary, 20.0), 60.0)
        );
        assert_eq!(
            ThemeVariant::VibrantCreative.accent_fallback(&primary),
            shift_hue(&primary, 270.0)
        );
        assert_eq!(
            ThemeVariant::SubtleElegant.secondary_fallback(&primary),
            shift_hue(&shift_saturation(&primary, -20.0), 45.0)
        );
        assert_eq!(
            ThemeVariant::SubtleElegant.accent_fallback(&primary),
            shift_hue(&primary, 120.0)
        );
    }

    #[test]
    fn test_explicit_colors_override_all_variants() {
        let input = ColorInput::new("#3b82f6")
            .with_secondary("#1e40af")
            .with_accent("#047857");
        let drafts = build_theme_drafts(&input).unwrap();
        // Dark enough to pass 3:1 on white unchanged.
        for draft in &drafts {
            assert_eq!(draft.light.secondary.to_hex(), "#1e40af");
            assert_eq!(draft.light.accent.to_hex(), "#047857");
        }
        for draft in &drafts {
            assert_eq!(draft.dark.secondary, drafts[0].dark.secondary);
            assert_eq!(draft.dark.accent, drafts[0].dark.accent);
        }
    }

    #[test]
    fn test_variant_primary_shifts_saturation() {
        let base = c("#6b8cbf");
        let drafts = build_theme_drafts(&ColorInput::new("#6b8cbf")).unwrap();
        assert_eq!(
            drafts[0].light.primary,
            ensure_contrast(&Color::WHITE, &base, AA_LARGE)
        );
        assert_eq!(
            drafts[1].light.primary,
            ensure_contrast(&Color::WHITE, &shift_saturation(&base, 20.0), AA_LARGE)
        );
        assert_eq!(
            drafts[2].light.primary,
            ensure_contrast(&Color::WHITE, &shift_saturation(&base, -20.0), AA_LARGE)
        );
        assert_ne!(drafts[1].light.primary, drafts[2].light.primary);
    }

    #[test]
    fn test_variant_primary_applies_with_explicit_colors() {
        let input = ColorInput::new("#6b8cbf")
            .with_secondary("#1e40af")
            .with_accent("#047857");
        let drafts = build_theme_drafts(&input).unwrap();
        let base = c("#6b8cbf");
        assert_eq!(
            ThemeVariant::VibrantCreative.primary(&base),
            shift_saturation(&base, 20.0)
        );
        assert_ne!(drafts[0].light.primary, drafts[1].light.primary);
        assert_ne!(drafts[0].dark.primary, drafts[2].dark.primary);
    }

    #[test]
    fn test_variants_differ_without_explicit_colors() {
        let drafts = build_theme_drafts(&ColorInput::new("#3b82f6")).unwrap();
        assert_ne!(drafts[0].light.secondary, drafts[1].light.secondary);
        assert_ne!(drafts[1].light.accent, drafts[2].light.accent);
    }

    #[test]
    fn test_brand_colors_meet_ui_contrast() {
        let drafts = build_theme_drafts(&ColorInput::new("#fde68a")).unwrap();
        for draft in &drafts {
            for color in [&draft.light.primary, &draft.light.secondary, &draft.light.accent] {
                assert!(contrast_ratio(&LIGHT_BACKGROUND, color) >= 3.0, "{color}");
            }
            for color in [&draft.dark.primary, &draft.dark.secondary, &draft.dark.accent] {
                assert!(contrast_ratio(&DARK_BACKGROUND, color) >= 3.0, "{color}");
            }
        }
    }

    #[test]
    fn test_provenance() {
        let themes = build_theme_set(&ColorInput::new("#3b82f6").with_accent("#10b981")).unwrap();
        let data = themes[0].input_data();
        assert_eq!(data["primary"], "#3b82f6");
        assert_eq!(data["accent"], "#10b981");
        assert!(data["secondary"].is_null());
        assert_eq!(data["generatedBy"], DETERMINISTIC_SOURCE);
    }

    #[test]
    fn test_theme_contrast_checks() {
        let themes = build_theme_set(&ColorInput::new("#3b82f6")).unwrap();
        let theme = &themes[0];
        assert!(theme.check_contrast_aa(Mode::Light, Role::Text, Role::Background));
        assert!(theme.check_contrast_aa(Mode::Dark, Role::Text, Role::Background));
        assert!(theme.check_contrast_aaa(Mode::Light, Role::Text, Role::Background));
        assert_eq!(
            theme.contrast_ratio(Mode::Light, Role::Shadow, Role::Background),
            1.0
        );
    }

    #[test]
    fn test_theme_json_roundtrip() {
        let themes = build_theme_set(&ColorInput::new("#3b82f6")).unwrap();
        let json = serde_json::to_string(&themes[1]).unwrap();
        assert!(json.contains("\"inputType\":\"color\""));
        assert!(json.contains("\"createdAt\""));
        let back: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, themes[1]);
    }

    #[test]
    fn test_color_input_serde() {
        let input: ColorInput = serde_json::from_str(r##"{"primary":"#3b82f6"}"##).unwrap();
        assert_eq!(input, ColorInput::new("#3b82f6"));
        assert_eq!(
            serde_json::to_string(&input).unwrap(),
            r##"{"primary":"#3b82f6"}"##
        );
    }
}
