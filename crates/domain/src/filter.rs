use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Identifiers the built-in engine recognises, paired with their button labels.
pub mod builtin {
    pub const SEPIA_TONE: &str = "sepia-tone";
    pub const PHOTO_MONO: &str = "photo-mono";
    pub const PHOTO_CHROME: &str = "photo-chrome";
    pub const PHOTO_FADE: &str = "photo-fade";
    pub const PHOTO_INSTANT: &str = "photo-instant";
    pub const PHOTO_NOIR: &str = "photo-noir";
    pub const PHOTO_PROCESS: &str = "photo-process";
    pub const PHOTO_TONAL: &str = "photo-tonal";
    pub const COLOR_INVERT: &str = "color-invert";
    pub const COLOR_CONTROLS: &str = "color-controls";
    pub const VIGNETTE: &str = "vignette";
    pub const BLOOM: &str = "bloom";

    pub const ENTRIES: [(&str, &str); 12] = [
        (SEPIA_TONE, "Sepia"),
        (PHOTO_MONO, "Mono"),
        (PHOTO_CHROME, "Chrome"),
        (PHOTO_FADE, "Fade"),
        (PHOTO_INSTANT, "Instant"),
        (PHOTO_NOIR, "Noir"),
        (PHOTO_PROCESS, "Process"),
        (PHOTO_TONAL, "Tonal"),
        (COLOR_INVERT, "Invert"),
        (COLOR_CONTROLS, "Vibrant"),
        (VIGNETTE, "Vignette"),
        (BLOOM, "Bloom"),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterId(String);

impl FilterId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::EmptyFilterId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FilterId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: FilterId,
    pub label: String,
}

/// Ordered mapping from filter id to button label.
///
/// Iteration follows construction order, which is also the order the
/// selector buttons are laid out in. Entries cannot change once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCatalog {
    entries: Vec<CatalogEntry>,
}

impl FilterCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.label.trim().is_empty() {
                return Err(DomainError::EmptyLabel(entry.id.to_string()));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(DomainError::DuplicateFilterId(entry.id.to_string()));
            }
        }
        Ok(Self { entries })
    }

    pub fn builtin() -> Self {
        let entries = builtin::ENTRIES
            .iter()
            .map(|(id, label)| CatalogEntry {
                id: FilterId(id.to_string()),
                label: label.to_string(),
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id.as_str() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
