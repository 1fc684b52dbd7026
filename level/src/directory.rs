//! Ordered collection of playable level numbers.

use orb_maze_core::LevelNumber;

use crate::LevelSource;

/// Levels numbered consecutively from one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelDirectory {
    count: u32,
}

impl LevelDirectory {
    /// Creates a directory holding levels `1..=count`.
    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self { count }
    }

    /// Counts consecutive levels present in the source, starting at one.
    #[must_use]
    pub fn probe<S: LevelSource>(source: &S) -> Self {
        let mut count = 0;
        while source.contains(LevelNumber::new(count + 1)) {
            count += 1;
        }
        Self { count }
    }

    /// Number of levels in the directory.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.count
    }

    /// Reports whether the directory holds no levels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Reports whether the level is part of the directory.
    #[must_use]
    pub const fn contains(&self, level: LevelNumber) -> bool {
        level.get() >= 1 && level.get() <= self.count
    }

    /// First level, if any.
    #[must_use]
    pub const fn first(&self) -> Option<LevelNumber> {
        if self.count == 0 {
            None
        } else {
            Some(LevelNumber::new(1))
        }
    }

    /// Level that follows the provided one, if any.
    #[must_use]
    pub fn next_after(&self, level: LevelNumber) -> Option<LevelNumber> {
        let next = level.next();
        (next > level && self.contains(next)).then_some(next)
    }

    /// Iterates over the levels in play order.
    pub fn iter(&self) -> impl Iterator<Item = LevelNumber> {
        (1..=self.count).map(LevelNumber::new)
    }
}

#[cfg(test)]
mod tests {
    use super::LevelDirectory;
    use crate::InMemorySource;
    use orb_maze_core::LevelNumber;

    #[test]
    fn next_after_stops_at_last_level() {
        let directory = LevelDirectory::new(4);

        assert_eq!(
            directory.next_after(LevelNumber::new(3)),
            Some(LevelNumber::new(4))
        );
        assert_eq!(directory.next_after(LevelNumber::new(4)), None);
        assert_eq!(directory.next_after(LevelNumber::new(0)), Some(LevelNumber::new(1)));
    }

    #[test]
    fn level_zero_is_never_contained() {
        let directory = LevelDirectory::new(2);
        assert!(!directory.contains(LevelNumber::new(0)));
        assert!(directory.contains(LevelNumber::new(2)));
        assert!(!directory.contains(LevelNumber::new(3)));
    }

    #[test]
    fn probe_stops_at_first_gap() {
        let source = InMemorySource::new()
            .with_level(LevelNumber::new(1), "{}")
            .with_level(LevelNumber::new(2), "{}")
            .with_level(LevelNumber::new(4), "{}");

        let directory = LevelDirectory::probe(&source);

        assert_eq!(directory.len(), 2);
        assert_eq!(
            directory.iter().collect::<Vec<_>>(),
            vec![LevelNumber::new(1), LevelNumber::new(2)]
        );
    }

    #[test]
    fn empty_directory_has_no_first_level() {
        let directory = LevelDirectory::new(0);
        assert!(directory.is_empty());
        assert_eq!(directory.first(), None);
    }
}
