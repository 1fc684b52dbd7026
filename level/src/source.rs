//! Level payload retrieval.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use orb_maze_core::LevelNumber;
use thiserror::Error;

/// Failure to retrieve the payload of a level.
///
/// The core never retries; hosts that want retries wrap their own source.
#[derive(Debug, Error)]
#[error("level {level} could not be retrieved")]
pub struct AssetUnavailable {
    level: LevelNumber,
    #[source]
    source: io::Error,
}

impl AssetUnavailable {
    /// Creates an error for the provided level and underlying cause.
    #[must_use]
    pub fn new(level: LevelNumber, source: io::Error) -> Self {
        Self { level, source }
    }

    /// Level whose payload was unavailable.
    #[must_use]
    pub const fn level(&self) -> LevelNumber {
        self.level
    }
}

/// Supplies raw level documents by level number.
pub trait LevelSource {
    /// Retrieves the raw document for the provided level.
    fn fetch(&self, level: LevelNumber) -> Result<String, AssetUnavailable>;

    /// Reports whether the source holds a document for the provided level.
    fn contains(&self, level: LevelNumber) -> bool;
}

impl<S: LevelSource + ?Sized> LevelSource for &S {
    fn fetch(&self, level: LevelNumber) -> Result<String, AssetUnavailable> {
        (**self).fetch(level)
    }

    fn contains(&self, level: LevelNumber) -> bool {
        (**self).contains(level)
    }
}

/// Reads `level{n}.json` files from a directory.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at the provided directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the source reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path that holds the provided level.
    #[must_use]
    pub fn path_for(&self, level: LevelNumber) -> PathBuf {
        self.root.join(format!("level{}.json", level.get()))
    }
}

impl LevelSource for DirectorySource {
    fn fetch(&self, level: LevelNumber) -> Result<String, AssetUnavailable> {
        fs::read_to_string(self.path_for(level)).map_err(|error| AssetUnavailable::new(level, error))
    }

    fn contains(&self, level: LevelNumber) -> bool {
        self.path_for(level).is_file()
    }
}

/// Holds level documents in memory, typically bundled with the binary.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    payloads: BTreeMap<LevelNumber, String>,
}

impl InMemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, returning the source for chaining.
    #[must_use]
    pub fn with_level(mut self, level: LevelNumber, payload: impl Into<String>) -> Self {
        self.insert(level, payload);
        self
    }

    /// Adds or replaces the document for the provided level.
    pub fn insert(&mut self, level: LevelNumber, payload: impl Into<String>) {
        let _ = self.payloads.insert(level, payload.into());
    }
}

impl LevelSource for InMemorySource {
    fn fetch(&self, level: LevelNumber) -> Result<String, AssetUnavailable> {
        self.payloads.get(&level).cloned().ok_or_else(|| {
            AssetUnavailable::new(
                level,
                io::Error::new(io::ErrorKind::NotFound, "no bundled document for level"),
            )
        })
    }

    fn contains(&self, level: LevelNumber) -> bool {
        self.payloads.contains_key(&level)
    }
}
