//! Role palettes for light and dark modes.
//!
//! A [`ColorRoles`] set maps the nine semantic UI roles to colors. Two of them
//! (light and dark) make up a [`ThemeColors`]. Backgrounds, borders and shadows
//! are fixed per mode; text colors are fixed targets run through the contrast
//! enforcer; primary, secondary and accent come from the caller.
//!
//! The deriver never invents colors: it only arranges the three it is given
//! and enforces contrast against the mode's background. Synthesizing missing
//! secondary/accent colors is the job of [`crate::theme`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Color, ColorError};
use crate::contrast::{AA_LARGE, AA_NORMAL, ensure_contrast};

/// Light-mode page background.
pub const LIGHT_BACKGROUND: Color = Color::new(0xff, 0xff, 0xff);
/// Light-mode secondary surface.
pub const LIGHT_BACKGROUND_SECONDARY: Color = Color::new(0xf8, 0xfa, 0xfc);
/// Light-mode body text target.
pub const LIGHT_TEXT: Color = Color::new(0x1e, 0x29, 0x3b);
/// Light-mode muted text target.
pub const LIGHT_TEXT_SECONDARY: Color = Color::new(0x64, 0x74, 0x8b);
/// Light-mode border.
pub const LIGHT_BORDER: Color = Color::new(0xe2, 0xe8, 0xf0);
/// Light-mode shadow.
pub const LIGHT_SHADOW: &str = "rgba(0, 0, 0, 0.1)";

/// Dark-mode page background.
pub const DARK_BACKGROUND: Color = Color::new(0x0f, 0x17, 0x2a);
/// Dark-mode secondary surface.
pub const DARK_BACKGROUND_SECONDARY: Color = Color::new(0x1e, 0x29, 0x3b);
/// Dark-mode body text target.
pub const DARK_TEXT: Color = Color::new(0xf1, 0xf5, 0xf9);
/// Dark-mode muted text target.
pub const DARK_TEXT_SECONDARY: Color = Color::new(0x94, 0xa3, 0xb8);
/// Dark-mode border.
pub const DARK_BORDER: Color = Color::new(0x33, 0x41, 0x55);
/// Dark-mode shadow.
pub const DARK_SHADOW: &str = "rgba(0, 0, 0, 0.3)";

/// Lightness added to brand colors before dark-mode enforcement.
pub const DARK_MODE_LIFT: f64 = 20.0;

/// Light or dark mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    pub const ALL: [Self; 2] = [Self::Light, Self::Dark];

    /// The fixed page background for this mode.
    pub const fn background(self) -> Color {
        match self {
            Self::Light => LIGHT_BACKGROUND,
            Self::Dark => DARK_BACKGROUND,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

/// The nine semantic roles of a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Background,
    BackgroundSecondary,
    Text,
    TextSecondary,
    Border,
    Shadow,
}

impl Role {
    /// All roles in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Primary,
        Self::Secondary,
        Self::Accent,
        Self::Background,
        Self::BackgroundSecondary,
        Self::Text,
        Self::TextSecondary,
        Self::Border,
        Self::Shadow,
    ];

    /// The camelCase key used in serialized palettes.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::Background => "background",
            Self::BackgroundSecondary => "backgroundSecondary",
            Self::Text => "text",
            Self::TextSecondary => "textSecondary",
            Self::Border => "border",
            Self::Shadow => "shadow",
        }
    }

    /// The kebab-case stem used for CSS custom properties.
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::Background => "background",
            Self::BackgroundSecondary => "background-secondary",
            Self::Text => "text",
            Self::TextSecondary => "text-secondary",
            Self::Border => "border",
            Self::Shadow => "shadow",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Colors for every role of one mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRoles {
    /// Brand color for primary actions and emphasis.
    pub primary: Color,
    /// Secondary actions and less prominent elements.
    pub secondary: Color,
    /// Highlights and indicators.
    pub accent: Color,
    /// Page background.
    pub background: Color,
    /// Cards, panels and other raised surfaces.
    pub background_secondary: Color,
    /// Body text.
    pub text: Color,
    /// Muted text.
    pub text_secondary: Color,
    /// Borders and dividers.
    pub border: Color,
    /// CSS shadow color; usually an `rgba(...)` value rather than hex.
    pub shadow: String,
}

impl ColorRoles {
    /// Returns the serialized value of a role.
    pub fn get(&self, role: Role) -> String {
        match role {
            Role::Primary => self.primary.to_hex(),
            Role::Secondary => self.secondary.to_hex(),
            Role::Accent => self.accent.to_hex(),
            Role::Background => self.background.to_hex(),
            Role::BackgroundSecondary => self.background_secondary.to_hex(),
            Role::Text => self.text.to_hex(),
            Role::TextSecondary => self.text_secondary.to_hex(),
            Role::Border => self.border.to_hex(),
            Role::Shadow => self.shadow.clone(),
        }
    }

    /// Returns the color of a hex-valued role, or `None` for [`Role::Shadow`].
    pub fn color(&self, role: Role) -> Option<&Color> {
        match role {
            Role::Primary => Some(&self.primary),
            Role::Secondary => Some(&self.secondary),
            Role::Accent => Some(&self.accent),
            Role::Background => Some(&self.background),
            Role::BackgroundSecondary => Some(&self.background_secondary),
            Role::Text => Some(&self.text),
            Role::TextSecondary => Some(&self.text_secondary),
            Role::Border => Some(&self.border),
            Role::Shadow => None,
        }
    }

    /// Iterate `(role, value)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (Role, String)> + '_ {
        Role::ALL.into_iter().map(|role| (role, self.get(role)))
    }
}

/// Light and dark palettes of one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub light: ColorRoles,
    pub dark: ColorRoles,
}

impl ThemeColors {
    pub const fn mode(&self, mode: Mode) -> &ColorRoles {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }
}

/// Build the light-mode palette.
pub fn derive_light_colors(primary: &Color, secondary: &Color, accent: &Color) -> ColorRoles {
    let bg = LIGHT_BACKGROUND;
    ColorRoles {
        primary: ensure_contrast(&bg, primary, AA_LARGE),
        secondary: ensure_contrast(&bg, secondary, AA_LARGE),
        accent: ensure_contrast(&bg, accent, AA_LARGE),
        background: bg,
        background_secondary: LIGHT_BACKGROUND_SECONDARY,
        text: ensure_contrast(&bg, &LIGHT_TEXT, AA_NORMAL),
        text_secondary: ensure_contrast(&bg, &LIGHT_TEXT_SECONDARY, AA_LARGE),
        border: LIGHT_BORDER,
        shadow: LIGHT_SHADOW.to_string(),
    }
}

/// Build the dark-mode palette.
///
/// Brand colors are lifted by [`DARK_MODE_LIFT`] lightness points before
/// contrast enforcement.
pub fn derive_dark_colors(primary: &Color, secondary: &Color, accent: &Color) -> ColorRoles {
    let bg = DARK_BACKGROUND;
    let brand =
        |color: &Color| ensure_contrast(&bg, &shift_lightness(color, DARK_MODE_LIFT), AA_LARGE);
    ColorRoles {
        primary: brand(primary),
        secondary: brand(secondary),
        accent: brand(accent),
        background: bg,
        background_secondary: DARK_BACKGROUND_SECONDARY,
        text: ensure_contrast(&bg, &DARK_TEXT, AA_NORMAL),
        text_secondary: ensure_contrast(&bg, &DARK_TEXT_SECONDARY, AA_LARGE),
        border: DARK_BORDER,
        shadow: DARK_SHADOW.to_string(),
    }
}

/// Build both palettes.
pub fn derive_theme_colors(primary: &Color, secondary: &Color, accent: &Color) -> ThemeColors {
    let colors = ThemeColors {
        light: derive_light_colors(primary, secondary, accent),
        dark: derive_dark_colors(primary, secondary, accent),
    };
    debug!(
        palette.primary = %primary,
        palette.light_primary = %colors.light.primary,
        palette.dark_primary = %colors.dark.primary,
        "Derived theme colors"
    );
    colors
}

/// Hex-string form of [`derive_theme_colors`].
///
/// # Errors
/// Returns [`ColorError::InvalidFormat`] if any input is malformed.
pub fn derive_theme_colors_hex(
    primary: &str,
    secondary: &str,
    accent: &str,
) -> Result<ThemeColors, ColorError> {
    Ok(derive_theme_colors(
        &Color::parse(primary)?,
        &Color::parse(secondary)?,
        &Color::parse(accent)?,
    ))
}

// Color shifts

/// Rotate hue by `degrees`, wrapping into `[0, 360)`.
pub fn shift_hue(color: &Color, degrees: f64) -> Color {
    let mut hsl = color.hsl();
    hsl.h = ((hsl.h + degrees + 360.0) % 360.0).rem_euclid(360.0);
    Color::from_hsl(hsl)
}

/// Add `delta` saturation points, clamped to `[0, 100]`.
pub fn shift_saturation(color: &Color, delta: f64) -> Color {
    let mut hsl = color.hsl();
    hsl.s = (hsl.s + delta).clamp(0.0, 100.0);
    Color::from_hsl(hsl)
}

/// Add `delta` lightness points, clamped to `[0, 100]`.
pub fn shift_lightness(color: &Color, delta: f64) -> Color {
    let mut hsl = color.hsl();
    hsl.l = (hsl.l + delta).clamp(0.0, 100.0);
    Color::from_hsl(hsl)
}
