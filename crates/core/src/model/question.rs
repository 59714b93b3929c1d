use rand::Rng;

use crate::model::table::Table;

/// Largest operand a question may use; operands are drawn from `0..=MAX_OPERAND`.
pub const MAX_OPERAND: u32 = 9;

/// A single multiplication question. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    table: Table,
    operand: u32,
    answer: u64,
}

impl Question {
    #[must_use]
    pub fn new(table: Table, operand: u32) -> Self {
        Self {
            table,
            operand,
            answer: u64::from(table.value()) * u64::from(operand),
        }
    }

    /// Draws a question for `table` with a uniformly random operand.
    ///
    /// The generator is injected so callers can seed it for reproducible runs.
    pub fn generate<R: Rng + ?Sized>(table: Table, rng: &mut R) -> Self {
        Self::new(table, rng.random_range(0..=MAX_OPERAND))
    }

    #[must_use]
    pub fn table(&self) -> Table {
        self.table
    }

    #[must_use]
    pub fn operand(&self) -> u32 {
        self.operand
    }

    #[must_use]
    pub fn answer(&self) -> u64 {
        self.answer
    }

    /// Whether a parsed submission matches the expected product.
    #[must_use]
    pub fn is_answered_by(&self, value: i64) -> bool {
        u64::try_from(value).is_ok_and(|v| v == self.answer)
    }

    /// Display form, e.g. `2 × 7 = ?`.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{} × {} = ?", self.table, self.operand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn table(value: u32) -> Table {
        Table::new(value).unwrap()
    }

    #[test]
    fn answer_is_product() {
        let q = Question::new(table(3), 7);
        assert_eq!(q.answer(), 21);
        assert_eq!(q.prompt(), "3 × 7 = ?");
        assert!(q.is_answered_by(21));
        assert!(!q.is_answered_by(-21));
    }

    #[test]
    fn generated_operand_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let q = Question::generate(table(4), &mut rng);
            assert!(q.operand() <= MAX_OPERAND);
            assert_eq!(q.table(), table(4));
            assert_eq!(q.answer(), u64::from(4 * q.operand()));
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let left: Vec<_> = (0..20).map(|_| Question::generate(table(2), &mut a)).collect();
        let right: Vec<_> = (0..20).map(|_| Question::generate(table(2), &mut b)).collect();
        assert_eq!(left, right);
    }
}
