#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level documents for Orb Maze: parsing, validation, retrieval and caching.
//!
//! Hosts resolve every level before play starts. A [`LevelSource`] supplies
//! raw JSON documents, [`LevelData::parse`] validates them, and a
//! [`LevelCache`] memoises the result so restarts never touch the source
//! again.

mod cache;
mod data;
mod directory;
mod error;
mod source;

pub use cache::{LevelCache, LoadError};
pub use data::{parse, LevelData};
pub use directory::LevelDirectory;
pub use error::{Axis, LevelFormatError, MarkerRole};
pub use source::{AssetUnavailable, DirectorySource, InMemorySource, LevelSource};
