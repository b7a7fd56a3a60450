//! Theme generation service.
//!
//! [`ThemeService`] validates a [`GenerationRequest`], asks a
//! [`ThemeSupplier`] for three drafts and replaces the contents of its
//! [`ThemeStore`] with the result. An optional external supplier (typically a
//! language-model backend) is tried first; when it fails on a request the
//! deterministic builder can answer, the service falls back to
//! [`DeterministicSupplier`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::color::{Color, ColorError};
use crate::store::ThemeStore;
use crate::theme::{
    ColorInput, DETERMINISTIC_SOURCE, InputType, Theme, ThemeDraft, ThemeError,
    build_theme_drafts,
};

/// Number of themes in every generated set.
pub const THEME_SET_SIZE: usize = 3;
/// Shortest accepted description, in characters.
pub const MIN_DESCRIPTION_LEN: usize = 10;
/// Longest accepted description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Errors reported by a [`ThemeSupplier`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupplierError {
    #[error("supplier cannot handle {0} requests")]
    Unsupported(&'static str),

    #[error("supplier unavailable: {0}")]
    Unavailable(String),

    #[error("supplier failed: {0}")]
    Failed(String),
}

/// Errors returned by [`ThemeService::generate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(
        "description must be {MIN_DESCRIPTION_LEN} to {MAX_DESCRIPTION_LEN} characters, got {len}"
    )]
    InvalidDescription { len: usize },

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Supplier(#[from] SupplierError),

    #[error("malformed theme drafts: {0}")]
    MalformedDrafts(String),

    #[error("extracted palette is empty")]
    EmptyPalette,
}

/// What to generate themes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum GenerationRequest {
    /// One to three base colors.
    Colors(ColorInput),
    /// A free-text mood description.
    Description { description: String },
    /// Colors already extracted from an uploaded image, most dominant first.
    #[serde(rename_all = "camelCase")]
    Extracted {
        file_name: String,
        palette: Vec<String>,
    },
}

impl GenerationRequest {
    pub fn colors(input: ColorInput) -> Self {
        Self::Colors(input)
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self::Description {
            description: description.into(),
        }
    }

    pub fn extracted(file_name: impl Into<String>, palette: Vec<String>) -> Self {
        Self::Extracted {
            file_name: file_name.into(),
            palette,
        }
    }

    /// The input type recorded on stored themes.
    pub const fn input_type(&self) -> InputType {
        match self {
            Self::Colors(_) => InputType::Color,
            Self::Description { .. } => InputType::Description,
            Self::Extracted { .. } => InputType::Image,
        }
    }

    /// Check the request before any supplier sees it.
    ///
    /// # Errors
    /// Rejects malformed colors, empty palettes and descriptions outside
    /// [`MIN_DESCRIPTION_LEN`]..=[`MAX_DESCRIPTION_LEN`] characters.
    pub fn validate(&self) -> Result<(), ServiceError> {
        match self {
            Self::Colors(input) => {
                input.resolve().map_err(ThemeError::from)?;
            }
            Self::Description { description } => {
                let len = description.chars().count();
                if !(MIN_DESCRIPTION_LEN..=MAX_DESCRIPTION_LEN).contains(&len) {
                    return Err(ServiceError::InvalidDescription { len });
                }
            }
            Self::Extracted { palette, .. } => {
                if palette.is_empty() {
                    return Err(ServiceError::EmptyPalette);
                }
                for hex in palette {
                    Color::parse(hex)?;
                }
            }
        }
        Ok(())
    }

    /// The extracted palette reduced to a primary/secondary/accent input.
    fn extracted_input(palette: &[String]) -> Option<ColorInput> {
        let mut colors = palette.iter().cloned();
        let mut input = ColorInput::new(colors.next()?);
        input.secondary = colors.next();
        input.accent = colors.next();
        Some(input)
    }

    /// Provenance stored with the generated themes.
    fn provenance(&self, generated_by: &str) -> Value {
        match self {
            Self::Colors(input) => json!({
                "primary": input.primary,
                "secondary": input.secondary,
                "accent": input.accent,
                "generatedBy": generated_by,
            }),
            Self::Description { description } => json!({
                "description": description,
                "generatedBy": generated_by,
            }),
            Self::Extracted { file_name, palette } => json!({
                "fileName": file_name,
                "extractedColors": palette,
                "primaryExtracted": palette.first(),
                "generatedBy": generated_by,
            }),
        }
    }
}

impl fmt::Display for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Colors(_) => f.write_str("color"),
            Self::Description { .. } => f.write_str("description"),
            Self::Extracted { .. } => f.write_str("image"),
        }
    }
}

/// The JSON document external suppliers answer with: `{"themes": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSet {
    pub themes: Vec<ThemeDraft>,
}

impl DraftSet {
    /// Decode a supplier response.
    ///
    /// # Errors
    /// Returns [`SupplierError::Failed`] if the document does not match the
    /// draft shape, including any role holding an invalid hex color.
    pub fn from_json(json: &str) -> Result<Self, SupplierError> {
        serde_json::from_str(json).map_err(|err| SupplierError::Failed(err.to_string()))
    }
}

/// Anything that can turn a request into theme drafts.
pub trait ThemeSupplier: Send + Sync {
    /// Recorded as `generatedBy` on stored themes.
    fn name(&self) -> &str;

    /// Produce drafts for a validated request.
    ///
    /// # Errors
    /// Returns a [`SupplierError`] when the request cannot be served.
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<ThemeDraft>, SupplierError>;
}

/// The built-in, offline supplier.
///
/// Colors and extracted palettes go through the deterministic theme set
/// builder. Descriptions are not supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicSupplier;

impl DeterministicSupplier {
    /// Whether this supplier can answer `request`.
    pub const fn supports(request: &GenerationRequest) -> bool {
        !matches!(request, GenerationRequest::Description { .. })
    }
}

impl ThemeSupplier for DeterministicSupplier {
    fn name(&self) -> &str {
        DETERMINISTIC_SOURCE
    }

    fn generate(&self, request: &GenerationRequest) -> Result<Vec<ThemeDraft>, SupplierError> {
        let input = match request {
            GenerationRequest::Colors(input) => input.clone(),
            GenerationRequest::Extracted { palette, .. } => {
                GenerationRequest::extracted_input(palette)
                    .ok_or_else(|| SupplierError::Failed("extracted palette is empty".into()))?
            }
            GenerationRequest::Description { .. } => {
                return Err(SupplierError::Unsupported("description"));
            }
        };

        build_theme_drafts(&input)
            .map(Vec::from)
            .map_err(|err| SupplierError::Failed(err.to_string()))
    }
}

/// Result of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// The stored themes, in supplier order.
    pub themes: Vec<Theme>,
    /// Name of the supplier whose drafts were stored.
    pub generated_by: String,
    /// Whether the external supplier failed and the deterministic one answered.
    pub fell_back: bool,
}

/// Validates requests, runs suppliers and stores the results.
pub struct ThemeService<St: ThemeStore> {
    store: St,
    supplier: Option<Arc<dyn ThemeSupplier>>,
    fallback: DeterministicSupplier,
}

impl<St: ThemeStore + fmt::Debug> fmt::Debug for ThemeService<St> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeService")
            .field("store", &self.store)
            .field("supplier", &self.supplier.as_ref().map(|s| s.name().to_string()))
            .finish()
    }
}

impl<St: ThemeStore> ThemeService<St> {
    /// Service backed only by the deterministic supplier.
    pub const fn new(store: St) -> Self {
        Self {
            store,
            supplier: None,
            fallback: DeterministicSupplier,
        }
    }

    /// Try `supplier` first on every request.
    #[must_use]
    pub fn with_supplier(mut self, supplier: Arc<dyn ThemeSupplier>) -> Self {
        self.supplier = Some(supplier);
        self
    }

    pub const fn store(&self) -> &St {
        &self.store
    }

    /// Generate a theme set and replace the stored themes with it.
    ///
    /// # Errors
    /// Returns validation errors for bad input, or the supplier error when no
    /// supplier could answer. The store is untouched on error.
    pub fn generate(&self, request: &GenerationRequest) -> Result<Generation, ServiceError> {
        request.validate()?;
        debug!(service.request = %request, "Generating themes");

        let (drafts, generated_by, fell_back) = match &self.supplier {
            Some(supplier) => match Self::run(supplier.as_ref(), request) {
                Ok(drafts) => (drafts, supplier.name().to_string(), false),
                Err(err) if DeterministicSupplier::supports(request) => {
                    warn!(
                        service.supplier = %supplier.name(),
                        service.error = %err,
                        "Supplier failed, using deterministic themes"
                    );
                    let drafts = Self::run(&self.fallback, request)?;
                    (drafts, self.fallback.name().to_string(), true)
                }
                Err(err) => return Err(err),
            },
            None => {
                let drafts = Self::run(&self.fallback, request)?;
                (drafts, self.fallback.name().to_string(), false)
            }
        };

        let provenance = request.provenance(&generated_by);
        let input_type = request.input_type();
        let themes = self.store.replace_all(
            drafts
                .into_iter()
                .map(|draft| draft.into_new_theme(input_type, provenance.clone()))
                .collect(),
        );

        info!(
            service.generated_by = %generated_by,
            service.fell_back = fell_back,
            service.count = themes.len(),
            "Generated themes"
        );
        Ok(Generation {
            themes,
            generated_by,
            fell_back,
        })
    }

    fn run(
        supplier: &dyn ThemeSupplier,
        request: &GenerationRequest,
    ) -> Result<Vec<ThemeDraft>, ServiceError> {
        let drafts = supplier.generate(request)?;
        check_drafts(&drafts)?;
        Ok(drafts)
    }
}

fn check_drafts(drafts: &[ThemeDraft]) -> Result<(), ServiceError> {
    if drafts.len() != THEME_SET_SIZE {
        return Err(ServiceError::MalformedDrafts(format!(
            "expected {THEME_SET_SIZE} themes, got {}",
            drafts.len()
        )));
    }
    if let Some(index) = drafts.iter().position(|d| d.name.trim().is_empty()) {
        return Err(ServiceError::MalformedDrafts(format!(
            "theme {} has no name",
            index + 1
        )));
    }
    Ok(())
}
