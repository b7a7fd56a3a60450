//! Theme storage.
//!
//! [`ThemeStore`] is the persistence seam used by the generation service.
//! [`MemoryThemeStore`] keeps themes in process memory behind an
//! `Arc<RwLock<_>>`; clones share the same collection.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::theme::{InputType, NewTheme, Theme};

/// Errors from importing or exporting a store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("theme JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid format: expected an array of themes")]
    NotAnArray,

    #[error("no valid themes found in import")]
    NoValidThemes,
}

/// A collection of themes, newest first.
pub trait ThemeStore: Send + Sync {
    /// Store a new theme at the front of the collection.
    fn create(&self, theme: NewTheme) -> Theme;

    fn get(&self, id: &str) -> Option<Theme>;

    /// All themes, newest first.
    fn list(&self) -> Vec<Theme>;

    /// Remove a theme. Returns `false` if no theme had that id.
    fn delete(&self, id: &str) -> bool;

    /// Remove every theme, returning how many were removed.
    fn clear(&self) -> usize;

    /// Discard all themes and store `themes` in the given order.
    fn replace_all(&self, themes: Vec<NewTheme>) -> Vec<Theme>;

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn by_input_type(&self, input_type: InputType) -> Vec<Theme> {
        self.list()
            .into_iter()
            .filter(|theme| theme.input_type() == input_type)
            .collect()
    }

    /// Case-insensitive substring match on theme names.
    fn search(&self, query: &str) -> Vec<Theme> {
        let query = query.to_lowercase();
        self.list()
            .into_iter()
            .filter(|theme| theme.name().to_lowercase().contains(&query))
            .collect()
    }

    /// Serialize all themes as a pretty JSON array.
    ///
    /// # Errors
    /// Returns [`StoreError::Json`] if serialization fails.
    fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.list())?)
    }

    /// Import themes from a JSON array, ahead of the existing ones.
    ///
    /// Entries missing a name, colors or input type are skipped. Imported
    /// themes get fresh ids and timestamps. Returns the number imported.
    ///
    /// # Errors
    /// Fails on malformed JSON, a non-array document, or when no entry is a
    /// valid theme.
    fn import_json(&self, json: &str) -> Result<usize, StoreError>;
}

/// In-memory [`ThemeStore`].
#[derive(Clone, Default)]
pub struct MemoryThemeStore {
    themes: Arc<RwLock<Vec<Theme>>>,
}

impl fmt::Debug for MemoryThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryThemeStore")
            .field("len", &self.read().len())
            .finish()
    }
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Theme>> {
        self.themes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Theme>> {
        self.themes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ThemeStore for MemoryThemeStore {
    fn create(&self, theme: NewTheme) -> Theme {
        let theme = Theme::new(theme);
        let mut themes = self.write();
        themes.insert(0, theme.clone());
        info!(
            store.theme_id = %theme.id(),
            store.theme_name = %theme.name(),
            store.len = themes.len(),
            "Stored theme"
        );
        theme
    }

    fn get(&self, id: &str) -> Option<Theme> {
        let found = self.read().iter().find(|theme| theme.id() == id).cloned();
        debug!(store.theme_id = id, store.found = found.is_some(), "Theme lookup");
        found
    }

    fn list(&self) -> Vec<Theme> {
        self.read().clone()
    }

    fn delete(&self, id: &str) -> bool {
        let mut themes = self.write();
        let Some(index) = themes.iter().position(|theme| theme.id() == id) else {
            return false;
        };
        let removed = themes.remove(index);
        info!(store.theme_name = %removed.name(), "Deleted theme");
        true
    }

    fn clear(&self) -> usize {
        let mut themes = self.write();
        let count = themes.len();
        themes.clear();
        info!(store.cleared = count, "Cleared themes");
        count
    }

    fn replace_all(&self, themes: Vec<NewTheme>) -> Vec<Theme> {
        let created: Vec<Theme> = themes.into_iter().map(Theme::new).collect();
        let mut stored = self.write();
        let previous = stored.len();
        stored.clone_from(&created);
        info!(
            store.previous = previous,
            store.len = created.len(),
            "Replaced all themes"
        );
        created
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn import_json(&self, json: &str) -> Result<usize, StoreError> {
        let Value::Array(entries) = serde_json::from_str::<Value>(json)? else {
            return Err(StoreError::NotAnArray);
        };

        let total = entries.len();
        let imported: Vec<Theme> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<NewTheme>(entry).ok())
            .map(Theme::new)
            .collect();

        if imported.is_empty() {
            warn!(store.entries = total, "Import contained no valid themes");
            return Err(StoreError::NoValidThemes);
        }

        let count = imported.len();
        let mut themes = self.write();
        let existing = std::mem::replace(&mut *themes, imported);
        themes.extend(existing);
        info!(
            store.imported = count,
            store.skipped = total - count,
            "Imported themes"
        );
        Ok(count)
    }
}
