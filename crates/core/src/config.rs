use crate::model::TableSet;
use crate::phrases::Locale;

/// Settings fixed when a quiz starts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizConfig {
    tables: TableSet,
    locale: Locale,
    read_aloud: bool,
    seed: Option<u64>,
}

impl QuizConfig {
    #[must_use]
    pub fn new(tables: TableSet) -> Self {
        Self {
            tables,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_read_aloud(mut self, enabled: bool) -> Self {
        self.read_aloud = enabled;
        self
    }

    /// Fixes the question generator seed so a run can be replayed.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn read_aloud(&self) -> bool {
        self.read_aloud
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
