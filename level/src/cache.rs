//! Memoised level loading keyed by level number.

use std::{collections::HashMap, sync::Arc};

use log::{info, warn};
use orb_maze_core::LevelNumber;
use thiserror::Error;

use crate::{AssetUnavailable, LevelData, LevelFormatError, LevelSource};

/// Failure to produce a playable level.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not supply the document.
    #[error(transparent)]
    Unavailable(#[from] AssetUnavailable),
    /// The document was retrieved but is malformed.
    #[error("level {level} is malformed")]
    Format {
        /// Level whose document failed to parse.
        level: LevelNumber,
        /// Specific parse failure.
        #[source]
        source: LevelFormatError,
    },
}

/// Caches parsed levels so each document is fetched and validated once.
///
/// A cache hit hands out the same [`Arc`] to every caller. Failed loads are
/// not cached, so a later call fetches again.
#[derive(Debug)]
pub struct LevelCache<S> {
    source: S,
    entries: HashMap<LevelNumber, Arc<LevelData>>,
}

impl<S: LevelSource> LevelCache<S> {
    /// Creates an empty cache backed by the provided source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: HashMap::new(),
        }
    }

    /// Returns the parsed level, fetching and parsing it on first use.
    pub fn load(&mut self, level: LevelNumber) -> Result<Arc<LevelData>, LoadError> {
        if let Some(cached) = self.entries.get(&level) {
            return Ok(Arc::clone(cached));
        }

        let raw = self.source.fetch(level).map_err(|error| {
            warn!("level {level} unavailable: {error}");
            error
        })?;
        let data = LevelData::parse(&raw).map_err(|source| {
            warn!("level {level} rejected: {source}");
            LoadError::Format { level, source }
        })?;

        info!(
            "loaded level {level} ({}x{}): {}",
            data.columns(),
            data.rows(),
            data.description()
        );
        let data = Arc::new(data);
        let _ = self.entries.insert(level, Arc::clone(&data));
        Ok(data)
    }

    /// Reports whether the level exists, either cached or in the source.
    #[must_use]
    pub fn contains(&self, level: LevelNumber) -> bool {
        self.entries.contains_key(&level) || self.source.contains(level)
    }

    /// Reports whether the level has already been parsed.
    #[must_use]
    pub fn is_cached(&self, level: LevelNumber) -> bool {
        self.entries.contains_key(&level)
    }

    /// Source backing the cache.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }
}
