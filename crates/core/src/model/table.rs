use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableSetError {
    #[error("table set cannot be empty")]
    Empty,

    #[error("table must be a positive integer")]
    ZeroTable,

    #[error("table {0} appears more than once")]
    Duplicate(Table),

    #[error("invalid table value: {raw}")]
    Parse { raw: String },
}

//
// ─── TABLE ─────────────────────────────────────────────────────────────────────
//

/// One multiplication table, e.g. the "3 times" table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Table(u32);

impl Table {
    /// Creates a table, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns `TableSetError::ZeroTable` for `0`.
    pub fn new(value: u32) -> Result<Self, TableSetError> {
        if value == 0 {
            return Err(TableSetError::ZeroTable);
        }
        Ok(Self(value))
    }

    /// Returns the underlying multiplier.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Table {
    type Error = TableSetError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Table> for u32 {
    fn from(table: Table) -> Self {
        table.0
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table({})", self.0)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Table {
    type Err = TableSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<u32>().map_err(|_| TableSetError::Parse {
            raw: s.to_string(),
        })?;
        Self::new(value)
    }
}

//
// ─── TABLE SET ─────────────────────────────────────────────────────────────────
//

/// Ordered, non-empty list of distinct tables practiced in sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSet {
    tables: Vec<Table>,
}

impl TableSet {
    /// Builds a table set from raw multipliers, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `TableSetError` if the list is empty, contains zero, or repeats a table.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Result<Self, TableSetError> {
        let mut tables: Vec<Table> = Vec::new();
        for value in values {
            let table = Table::new(value)?;
            if tables.contains(&table) {
                return Err(TableSetError::Duplicate(table));
            }
            tables.push(table);
        }
        if tables.is_empty() {
            return Err(TableSetError::Empty);
        }
        Ok(Self { tables })
    }

    /// Parses a comma separated list such as `"2,3"`.
    ///
    /// # Errors
    ///
    /// Returns `TableSetError` for unparsable entries or an invalid resulting set.
    pub fn parse_list(raw: &str) -> Result<Self, TableSetError> {
        let values = raw
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.parse::<Table>().map(|t| t.value()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(values)
    }

    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Never true for a constructed set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Table> {
        self.tables.get(index).copied()
    }

    #[must_use]
    pub fn first(&self) -> Table {
        self.tables[0]
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.tables.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = Table> + '_ {
        self.tables.iter().copied()
    }
}

impl Default for TableSet {
    /// The 2 and 3 times tables.
    fn default() -> Self {
        Self {
            tables: vec![Table(2), Table(3)],
        }
    }
}

impl fmt::Display for TableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .tables
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_table() {
        assert_eq!(Table::new(0).unwrap_err(), TableSetError::ZeroTable);
        assert_eq!(Table::new(7).unwrap().value(), 7);
    }

    #[test]
    fn table_set_keeps_order() {
        let set = TableSet::new([5, 2, 9]).unwrap();
        let values: Vec<u32> = set.iter().map(|t| t.value()).collect();
        assert_eq!(values, vec![5, 2, 9]);
        assert_eq!(set.last_index(), 2);
        assert_eq!(set.first().value(), 5);
    }

    #[test]
    fn table_set_rejects_empty_and_duplicates() {
        assert_eq!(TableSet::new(Vec::new()).unwrap_err(), TableSetError::Empty);
        let err = TableSet::new([2, 3, 2]).unwrap_err();
        assert!(matches!(err, TableSetError::Duplicate(t) if t.value() == 2));
    }

    #[test]
    fn parses_comma_list() {
        let set = TableSet::parse_list(" 2, 3 ,4").unwrap();
        assert_eq!(set.to_string(), "2,3,4");
        assert!(matches!(
            TableSet::parse_list("2,x"),
            Err(TableSetError::Parse { .. })
        ));
        assert_eq!(TableSet::parse_list("").unwrap_err(), TableSetError::Empty);
    }

    #[test]
    fn default_is_two_and_three() {
        assert_eq!(TableSet::default().to_string(), "2,3");
    }
}
