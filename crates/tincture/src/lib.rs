#![forbid(unsafe_code)]
// Allow these clippy lints for API ergonomics and color math
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::format_push_string)]

//! # Tincture
//!
//! Accessible color themes from a single brand color.
//!
//! Tincture provides:
//! - **Color math**: hex, RGB and HSL conversion plus WCAG relative luminance
//! - **Contrast**: WCAG 2.1 contrast ratios, grades and a bounded lightness
//!   search that nudges a color until it reaches a target ratio
//! - **Palettes**: light and dark role sets (primary, text, border, ...) with
//!   contrast enforced against each mode's background
//! - **Theme sets**: three named variants derived deterministically from one
//!   primary color
//! - **Storage, export and generation**: an in-memory theme store, CSS/JSON/TOML
//!   exporters and a service that orchestrates pluggable theme suppliers
//!
//! ## Quick Start
//!
//! ```rust
//! use tincture::{ColorInput, build_theme_set, css_variables};
//!
//! let themes = build_theme_set(&ColorInput::new("#3b82f6")).unwrap();
//! for theme in &themes {
//!     println!("{}", theme.name());
//! }
//! println!("{}", css_variables(themes[0].colors()));
//! ```
//!
//! ## Contrast
//!
//! ```rust
//! use tincture::{Color, contrast_ratio, ensure_contrast};
//!
//! let white = Color::WHITE;
//! let yellow = Color::parse("#fde047").unwrap();
//! assert!(contrast_ratio(&white, &yellow) < 3.0);
//!
//! let readable = ensure_contrast(&white, &yellow, 3.0);
//! assert!(contrast_ratio(&white, &readable) >= 3.0);
//! ```

pub mod color;
pub mod contrast;
pub mod export;
pub mod extract;
pub mod palette;
pub mod service;
pub mod store;
pub mod theme;

// Re-exports
pub use color::{
    Color, ColorError, Hsl, Rgb, hex_to_hsl, hex_to_rgb, hsl_to_hex, luminance, rgb_to_hex,
};
pub use contrast::{
    AA_LARGE, AA_NORMAL, AAA_LARGE, AAA_NORMAL, Compliance, ContrastAdjustment, MAX_RATIO,
    WcagGrade, WcagLevel, adjust_for_contrast, contrast_ratio, contrast_ratio_hex,
    ensure_contrast, ensure_contrast_hex, format_ratio,
};
pub use export::{
    ComponentCss, ExportError, ExportFormat, component_css, css_variables, render, render_all,
    theme_json, theme_toml, themes_json, themes_toml,
};
pub use extract::{select_diverse_palette, themes_from_extracted};
pub use palette::{
    ColorRoles, Mode, Role, ThemeColors, derive_dark_colors, derive_light_colors,
    derive_theme_colors, shift_hue, shift_lightness, shift_saturation,
};
pub use service::{
    DeterministicSupplier, DraftSet, Generation, GenerationRequest, ServiceError, SupplierError,
    ThemeService, ThemeSupplier,
};
pub use store::{MemoryThemeStore, StoreError, ThemeStore};
pub use theme::{
    ColorInput, InputType, NewTheme, Theme, ThemeDraft, ThemeError, ThemeVariant,
    build_theme_drafts, build_theme_set,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::color::{Color, ColorError};
    pub use crate::contrast::{WcagGrade, WcagLevel, contrast_ratio, ensure_contrast};
    pub use crate::palette::{ColorRoles, Mode, Role, ThemeColors};
    pub use crate::service::{GenerationRequest, ThemeService, ThemeSupplier};
    pub use crate::store::{MemoryThemeStore, ThemeStore};
    pub use crate::theme::{ColorInput, Theme, ThemeDraft, build_theme_set};
}
