//! JSON-file shopping list keyed by product name and store.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub units: Decimal,
    pub name: String,
    pub store: String,
    pub price: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("could not write shopping list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode shopping list: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Shopping list persisted as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct ShoppingList {
    path: PathBuf,
}

impl ShoppingList {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all entries. A missing or unreadable file yields an empty list.
    #[must_use]
    pub fn load(&self) -> Vec<ListEntry> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read shopping list, starting empty");
                return Vec::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "could not parse shopping list, starting empty");
            Vec::new()
        })
    }

    /// Overwrites the file with `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError`] if encoding or writing fails.
    pub fn save(&self, entries: &[ListEntry]) -> Result<(), ListError> {
        let body = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, body).map_err(|e| ListError::Io {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// Appends an entry unless one with the same name and store exists.
    ///
    /// # Errors
    ///
    /// Returns [`ListError`] if the list cannot be saved.
    pub fn add(&self, entry: ListEntry) -> Result<AddOutcome, ListError> {
        let mut entries = self.load();
        if entries
            .iter()
            .any(|e| e.name == entry.name && e.store == entry.store)
        {
            return Ok(AddOutcome::AlreadyPresent);
        }
        entries.push(entry);
        self.save(&entries)?;
        Ok(AddOutcome::Added)
    }

    /// Removes the first entry named `name`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError`] if the list cannot be saved.
    pub fn remove(&self, name: &str) -> Result<Option<ListEntry>, ListError> {
        let mut entries = self.load();
        let Some(pos) = entries.iter().position(|e| e.name == name) else {
            return Ok(None);
        };
        let removed = entries.remove(pos);
        self.save(&entries)?;
        Ok(Some(removed))
    }

    /// Sets the units of the first entry named `name`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ListError`] if the list cannot be saved.
    pub fn update_units(&self, name: &str, units: Decimal) -> Result<Option<Decimal>, ListError> {
        let mut entries = self.load();
        let Some(entry) = entries.iter_mut().find(|e| e.name == name) else {
            return Ok(None);
        };
        let previous = std::mem::replace(&mut entry.units, units);
        self.save(&entries)?;
        Ok(Some(previous))
    }
}
