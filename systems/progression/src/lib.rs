#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that tracks completed levels and selects the next one to play.

use std::collections::BTreeSet;

use log::info;
use orb_maze_core::{Event, LevelNumber};
use orb_maze_level::LevelDirectory;

/// Remembers which levels the player finished during the session.
#[derive(Clone, Debug, Default)]
pub struct Progression {
    completed: BTreeSet<LevelNumber>,
}

impl Progression {
    /// Creates a progression tracker with no completed levels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and reports the level to load next.
    ///
    /// Returns the level following a completed one when the directory holds
    /// it. Failures, resets and completing the last level yield `None`.
    pub fn handle(
        &mut self,
        events: &[Event],
        directory: &LevelDirectory,
    ) -> Option<LevelNumber> {
        let mut next = None;
        for event in events {
            match event {
                Event::LevelCompleted { level } => {
                    if self.completed.insert(*level) {
                        info!(
                            "level {level} marked completed ({} of {})",
                            self.completed.len(),
                            directory.len()
                        );
                    }
                    next = directory.next_after(*level);
                }
                Event::LevelFailed { .. } | Event::LevelReset { .. } => next = None,
                _ => {}
            }
        }
        next
    }

    /// Reports whether the level was completed at least once.
    #[must_use]
    pub fn is_completed(&self, level: LevelNumber) -> bool {
        self.completed.contains(&level)
    }

    /// Completed levels in ascending order.
    pub fn completed(&self) -> impl Iterator<Item = LevelNumber> + '_ {
        self.completed.iter().copied()
    }

    /// Reports whether every level in the directory has been completed.
    #[must_use]
    pub fn is_finished(&self, directory: &LevelDirectory) -> bool {
        !directory.is_empty() && directory.iter().all(|level| self.is_completed(level))
    }
}
