//! Theme exporters: CSS custom properties, component snippets, JSON and TOML.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::{ColorRoles, Mode, ThemeColors};
use crate::theme::{InputType, Theme};

/// Errors produced while rendering an export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML export failed: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Output format of [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Css,
    Toml,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Css => f.write_str("css"),
            Self::Toml => f.write_str("toml"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "css" => Ok(Self::Css),
            "toml" => Ok(Self::Toml),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// CSS selector that scopes a mode's variables.
pub const fn css_selector(mode: Mode) -> &'static str {
    match mode {
        Mode::Light => ":root",
        Mode::Dark => "[data-theme=\"dark\"]",
    }
}

fn css_block(out: &mut String, mode: Mode, roles: &ColorRoles) {
    out.push_str(css_selector(mode));
    out.push_str(" {\n");
    out.push_str(&format!("  /* {} mode colors */\n", capitalize(mode)));
    for (role, value) in roles.entries() {
        out.push_str(&format!("  --{}-color: {value};\n", role.css_name()));
    }
    out.push('}');
}

fn capitalize(mode: Mode) -> &'static str {
    match mode {
        Mode::Light => "Light",
        Mode::Dark => "Dark",
    }
}

/// Render both palettes as CSS custom properties.
///
/// Light colors go on `:root`, dark colors on `[data-theme="dark"]`.
pub fn css_variables(colors: &ThemeColors) -> String {
    let mut out = String::new();
    for (i, mode) in Mode::ALL.into_iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        css_block(&mut out, mode, colors.mode(mode));
    }
    out
}

/// Ready-made component rules built on the variables from [`css_variables`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCss {
    pub primary_button: &'static str,
    pub secondary_button: &'static str,
    pub text_button: &'static str,
    pub input: &'static str,
    pub select: &'static str,
    pub alert_success: &'static str,
    pub alert_info: &'static str,
    pub alert_error: &'static str,
}

impl ComponentCss {
    /// All snippets joined into one stylesheet.
    pub fn stylesheet(&self) -> String {
        [
            self.primary_button,
            self.secondary_button,
            self.text_button,
            self.input,
            self.select,
            self.alert_success,
            self.alert_info,
            self.alert_error,
        ]
        .join("\n\n")
    }
}

const PRIMARY_BUTTON: &str = ".btn-primary {
  background-color: var(--primary-color);
  color: var(--background-color);
  padding: 0.5rem 1rem;
  border-radius: 0.5rem;
  font-weight: 500;
  border: none;
  cursor: pointer;
  transition: opacity 0.2s ease;
}

.btn-primary:hover {
  opacity: 0.9;
}";

const SECONDARY_BUTTON: &str = ".btn-secondary {
  border: 1px solid var(--primary-color);
  color: var(--primary-color);
  background-color: transparent;
  padding: 0.5rem 1rem;
  border-radius: 0.5rem;
  font-weight: 500;
  cursor: pointer;
  transition: all 0.2s ease;
}

.btn-secondary:hover {
  background-color: var(--primary-color);
  color: var(--background-color);
}";

const TEXT_BUTTON: &str = ".btn-text {
  color: var(--primary-color);
  background-color: transparent;
  border: none;
  padding: 0.5rem 1rem;
  border-radius: 0.5rem;
  font-weight: 500;
  cursor: pointer;
  transition: background-color 0.2s ease;
}

.btn-text:hover {
  background-color: color-mix(in srgb, var(--primary-color) 10%, transparent);
}";

const INPUT: &str = ".form-input {
  padding: 0.75rem 1rem;
  border: 1px solid var(--border-color);
  border-radius: 0.5rem;
  background-color: var(--background-color);
  color: var(--text-color);
  font-size: 0.875rem;
  transition: all 0.2s ease;
}

.form-input:focus {
  outline: none;
  border-color: var(--primary-color);
  box-shadow: 0 0 0 3px color-mix(in srgb, var(--primary-color) 20%, transparent);
}";

const SELECT: &str = ".form-select {
  padding: 0.75rem 1rem;
  border: 1px solid var(--border-color);
  border-radius: 0.5rem;
  background-color: var(--background-color);
  color: var(--text-color);
  font-size: 0.875rem;
  cursor: pointer;
  transition: all 0.2s ease;
}

.form-select:focus {
  outline: none;
  border-color: var(--primary-color);
  box-shadow: 0 0 0 3px color-mix(in srgb, var(--primary-color) 20%, transparent);
}";

const ALERT_SUCCESS: &str = ".alert-success {
  padding: 1rem;
  border-radius: 0.5rem;
  background-color: color-mix(in srgb, var(--accent-color) 10%, transparent);
  border: 1px solid color-mix(in srgb, var(--accent-color) 30%, transparent);
  color: var(--accent-color);
  display: flex;
  align-items: center;
  gap: 0.75rem;
}";

const ALERT_INFO: &str = ".alert-info {
  padding: 1rem;
  border-radius: 0.5rem;
  background-color: color-mix(in srgb, var(--primary-color) 10%, transparent);
  border: 1px solid color-mix(in srgb, var(--primary-color) 30%, transparent);
  color: var(--primary-color);
  display: flex;
  align-items: center;
  gap: 0.75rem;
}";

// Error red is fixed; it is not part of the palette.
const ALERT_ERROR: &str = ".alert-error {
  padding: 1rem;
  border-radius: 0.5rem;
  background-color: color-mix(in srgb, #ef4444 10%, transparent);
  border: 1px solid color-mix(in srgb, #ef4444 30%, transparent);
  color: #ef4444;
  display: flex;
  align-items: center;
  gap: 0.75rem;
}";

/// The component snippets. They are theme independent.
pub const fn component_css() -> ComponentCss {
    ComponentCss {
        primary_button: PRIMARY_BUTTON,
        secondary_button: SECONDARY_BUTTON,
        text_button: TEXT_BUTTON,
        input: INPUT,
        select: SELECT,
        alert_success: ALERT_SUCCESS,
        alert_info: ALERT_INFO,
        alert_error: ALERT_ERROR,
    }
}

/// The exported view of a theme. Provenance data is left out and the colors
/// come last so TOML can emit them as tables.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeExport<'a> {
    id: &'a str,
    name: &'a str,
    input_type: InputType,
    created_at: DateTime<Utc>,
    colors: &'a ThemeColors,
}

impl<'a> From<&'a Theme> for ThemeExport<'a> {
    fn from(theme: &'a Theme) -> Self {
        Self {
            id: theme.id(),
            name: theme.name(),
            input_type: theme.input_type(),
            created_at: theme.created_at(),
            colors: theme.colors(),
        }
    }
}

/// Pretty JSON document for one theme.
///
/// # Errors
/// Returns [`ExportError::Json`] if serialization fails.
pub fn theme_json(theme: &Theme) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&ThemeExport::from(theme))?)
}

/// Pretty JSON array for several themes.
///
/// # Errors
/// Returns [`ExportError::Json`] if serialization fails.
pub fn themes_json(themes: &[Theme]) -> Result<String, ExportError> {
    let exports: Vec<ThemeExport<'_>> = themes.iter().map(ThemeExport::from).collect();
    Ok(serde_json::to_string_pretty(&exports)?)
}

/// TOML document for one theme.
///
/// # Errors
/// Returns [`ExportError::Toml`] if serialization fails.
pub fn theme_toml(theme: &Theme) -> Result<String, ExportError> {
    Ok(toml::to_string_pretty(&ThemeExport::from(theme))?)
}

/// TOML document holding several themes as a `[[themes]]` array.
///
/// # Errors
/// Returns [`ExportError::Toml`] if serialization fails.
pub fn themes_toml(themes: &[Theme]) -> Result<String, ExportError> {
    #[derive(Serialize)]
    struct Document<'a> {
        themes: Vec<ThemeExport<'a>>,
    }

    let document = Document {
        themes: themes.iter().map(ThemeExport::from).collect(),
    };
    Ok(toml::to_string_pretty(&document)?)
}

/// Render one theme in `format`.
///
/// # Errors
/// Propagates serialization failures from the JSON and TOML writers.
pub fn render(theme: &Theme, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => theme_json(theme),
        ExportFormat::Css => Ok(css_variables(theme.colors())),
        ExportFormat::Toml => theme_toml(theme),
    }
}

/// Render a whole theme set in `format`.
///
/// CSS output is one variable block pair per theme, each headed by a comment
/// naming the theme.
///
/// # Errors
/// Propagates serialization failures from the JSON and TOML writers.
pub fn render_all(themes: &[Theme], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => themes_json(themes),
        ExportFormat::Toml => themes_toml(themes),
        ExportFormat::Css => Ok(themes
            .iter()
            .map(|theme| format!("/* {} */\n{}", theme.name(), css_variables(theme.colors())))
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}
