use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::model::table::{Table, TableSet};

/// Correct answers needed on a table before the quiz moves to the next one.
pub const COMPLETION_THRESHOLD: u32 = 10;

/// Points awarded for every correct answer.
pub const CORRECT_REWARD: u32 = 10;

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// Accumulated points. Never decreases within a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    #[must_use]
    pub fn new(points: u32) -> Self {
        Self(points)
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn add(self, delta: u32) -> Self {
        Self(self.0.saturating_add(delta))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Correct-answer counts per table.
///
/// Always holds an entry for every table of the set it was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    counts: BTreeMap<Table, u32>,
}

impl Progress {
    /// Zero progress for every table in `tables`.
    #[must_use]
    pub fn for_tables(tables: &TableSet) -> Self {
        Self {
            counts: tables.iter().map(|t| (t, 0)).collect(),
        }
    }

    /// Builds progress from stored counts, keeping only tables in `tables`
    /// and filling the missing ones with zero.
    #[must_use]
    pub fn from_counts(
        tables: &TableSet,
        counts: impl IntoIterator<Item = (Table, u32)>,
    ) -> Self {
        let mut progress = Self::for_tables(tables);
        for (table, count) in counts {
            if let Some(slot) = progress.counts.get_mut(&table) {
                *slot = count;
            }
        }
        progress
    }

    #[must_use]
    pub fn count(&self, table: Table) -> u32 {
        self.counts.get(&table).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_complete(&self, table: Table) -> bool {
        self.count(table) >= COMPLETION_THRESHOLD
    }

    /// Completion percentage for a progress bar, capped at 100.
    #[must_use]
    pub fn percent(&self, table: Table) -> u32 {
        self.count(table).min(COMPLETION_THRESHOLD) * 100 / COMPLETION_THRESHOLD
    }

    pub(crate) fn add(&mut self, table: Table, delta: u32) {
        if let Some(slot) = self.counts.get_mut(&table) {
            *slot = slot.saturating_add(delta);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Table, u32)> + '_ {
        self.counts.iter().map(|(t, c)| (*t, *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(value: u32) -> Table {
        Table::new(value).unwrap()
    }

    #[test]
    fn starts_at_zero_for_every_table() {
        let progress = Progress::for_tables(&TableSet::default());
        assert_eq!(progress.count(table(2)), 0);
        assert_eq!(progress.count(table(3)), 0);
        assert_eq!(progress.iter().count(), 2);
    }

    #[test]
    fn from_counts_normalizes_to_table_set() {
        let tables = TableSet::default();
        let progress = Progress::from_counts(&tables, [(table(2), 4), (table(7), 9)]);
        assert_eq!(progress.count(table(2)), 4);
        assert_eq!(progress.count(table(3)), 0);
        assert_eq!(progress.count(table(7)), 0);
        assert_eq!(progress.iter().count(), 2);
    }

    #[test]
    fn counts_keep_growing_past_threshold() {
        let tables = TableSet::default();
        let mut progress = Progress::from_counts(&tables, [(table(2), 9)]);
        progress.add(table(2), 1);
        assert!(progress.is_complete(table(2)));
        progress.add(table(2), 1);
        assert_eq!(progress.count(table(2)), 11);
        assert_eq!(progress.percent(table(2)), 100);
        progress.add(table(5), 1);
        assert_eq!(progress.count(table(5)), 0);
    }

    #[test]
    fn percent_is_capped() {
        let tables = TableSet::default();
        let progress = Progress::from_counts(&tables, [(table(2), 3), (table(3), 14)]);
        assert_eq!(progress.percent(table(2)), 30);
        assert_eq!(progress.percent(table(3)), 100);
    }

    #[test]
    fn score_saturates() {
        assert_eq!(Score::new(40).add(CORRECT_REWARD).points(), 50);
        assert_eq!(Score::new(u32::MAX).add(10).points(), u32::MAX);
    }
}
