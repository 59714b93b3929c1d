use rand::Rng;

use crate::model::{
    Badge, COMPLETION_THRESHOLD, CORRECT_REWARD, Progress, Question, Score, Table, TableSet,
};

//
// ─── ANSWER PARSING ────────────────────────────────────────────────────────────
//

/// Reads the leading integer of a submission.
///
/// Leading whitespace and a single sign are accepted and anything after the
/// digits is ignored, so `" 12 "` and `"12abc"` both read as 12. Returns `None`
/// when no digit follows, which callers treat as a wrong answer.
#[must_use]
pub fn parse_answer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude = rest[..digits_len].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

//
// ─── EVALUATION ────────────────────────────────────────────────────────────────
//

/// Outcome of checking one submission against the active question.
///
/// Describes the state change without performing it. [`QuizState::submit`]
/// applies it to the state it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    correct: bool,
    table_index: usize,
    table: Table,
    score_delta: u32,
    progress_delta: u32,
    next_question: Option<Question>,
    table_advanced: bool,
}

impl Evaluation {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct
    }

    /// Table the progress delta applies to.
    #[must_use]
    pub fn table(&self) -> Table {
        self.table
    }

    #[must_use]
    pub fn score_delta(&self) -> u32 {
        self.score_delta
    }

    #[must_use]
    pub fn progress_delta(&self) -> u32 {
        self.progress_delta
    }

    /// The question to show next; `None` when the current one stays active.
    #[must_use]
    pub fn next_question(&self) -> Option<&Question> {
        self.next_question.as_ref()
    }

    #[must_use]
    pub fn table_advanced(&self) -> bool {
        self.table_advanced
    }

    /// Whether applying this evaluation changes anything that must be persisted.
    #[must_use]
    pub fn mutates(&self) -> bool {
        self.score_delta > 0 || self.progress_delta > 0
    }
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Complete quiz state, passed into and returned from every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    tables: TableSet,
    table_index: usize,
    score: Score,
    progress: Progress,
    question: Question,
}

impl QuizState {
    /// Fresh state: zero score and progress, first table active.
    pub fn new<R: Rng + ?Sized>(tables: TableSet, rng: &mut R) -> Self {
        let progress = Progress::for_tables(&tables);
        Self::resume(tables, Score::default(), progress, rng)
    }

    /// Rebuilds state from persisted values.
    ///
    /// The active table is the first one that is not yet complete, or the last
    /// table once all of them are.
    pub fn resume<R: Rng + ?Sized>(
        tables: TableSet,
        score: Score,
        progress: Progress,
        rng: &mut R,
    ) -> Self {
        let progress = Progress::from_counts(&tables, progress.iter());
        let table_index = tables
            .iter()
            .position(|t| !progress.is_complete(t))
            .unwrap_or_else(|| tables.last_index());
        let current = tables.get(table_index).unwrap_or_else(|| tables.first());
        let question = Question::generate(current, rng);
        Self {
            tables,
            table_index,
            score,
            progress,
            question,
        }
    }

    #[must_use]
    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    #[must_use]
    pub fn table_index(&self) -> usize {
        self.table_index
    }

    #[must_use]
    pub fn current_table(&self) -> Table {
        self.tables.get(self.table_index).unwrap_or_else(|| self.tables.first())
    }

    #[must_use]
    pub fn is_last_table(&self) -> bool {
        self.table_index >= self.tables.last_index()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn badge(&self) -> Option<Badge> {
        Badge::for_score(self.score)
    }

    /// Checks `input` against the active question.
    ///
    /// Never fails: input that does not parse as a number is a wrong answer.
    pub fn evaluate<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> Evaluation {
        let table = self.current_table();
        let correct = parse_answer(input).is_some_and(|value| self.question.is_answered_by(value));
        if !correct {
            return Evaluation {
                correct,
                table_index: self.table_index,
                table,
                score_delta: 0,
                progress_delta: 0,
                next_question: None,
                table_advanced: false,
            };
        }

        let progress_delta = 1;
        let updated = self.progress.count(table).saturating_add(progress_delta);
        let table_advanced = updated >= COMPLETION_THRESHOLD && !self.is_last_table();
        let next_table = if table_advanced {
            self.tables.get(self.table_index + 1).unwrap_or(table)
        } else {
            table
        };

        Evaluation {
            correct,
            table_index: self.table_index,
            table,
            score_delta: CORRECT_REWARD,
            progress_delta,
            next_question: Some(Question::generate(next_table, rng)),
            table_advanced,
        }
    }

    /// Applies an evaluation produced by [`QuizState::evaluate`] on this state.
    ///
    /// An evaluation computed on a different active table is ignored.
    #[must_use]
    pub(crate) fn apply(mut self, evaluation: &Evaluation) -> Self {
        if !evaluation.correct
            || evaluation.table_index != self.table_index
            || evaluation.table != self.current_table()
        {
            return self;
        }
        self.score = self.score.add(evaluation.score_delta);
        self.progress.add(evaluation.table, evaluation.progress_delta);
        if evaluation.table_advanced && !self.is_last_table() {
            self.table_index += 1;
        }
        if let Some(next) = evaluation.next_question {
            self.question = next;
        }
        self
    }

    /// Evaluates and applies in one step.
    pub fn submit<R: Rng + ?Sized>(self, input: &str, rng: &mut R) -> (Self, Evaluation) {
        let evaluation = self.evaluate(input, rng);
        (self.apply(&evaluation), evaluation)
    }

    /// Clears score and progress and restarts at the first table.
    #[must_use]
    pub fn reset<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        Self::new(self.tables, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn table(value: u32) -> Table {
        Table::new(value).unwrap()
    }

    fn answer_of(state: &QuizState) -> String {
        state.question().answer().to_string()
    }

    fn answer_correctly(state: QuizState, rng: &mut StdRng) -> (QuizState, Evaluation) {
        let input = answer_of(&state);
        state.submit(&input, rng)
    }

    #[test]
    fn parse_answer_reads_leading_integer() {
        assert_eq!(parse_answer("12"), Some(12));
        assert_eq!(parse_answer("  12  "), Some(12));
        assert_eq!(parse_answer("12abc"), Some(12));
        assert_eq!(parse_answer("-4"), Some(-4));
        assert_eq!(parse_answer("+4"), Some(4));
        assert_eq!(parse_answer(""), None);
        assert_eq!(parse_answer("abc"), None);
        assert_eq!(parse_answer("-"), None);
        assert_eq!(parse_answer("99999999999999999999999"), None);
    }

    #[test]
    fn new_state_starts_on_first_table() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = QuizState::new(TableSet::default(), &mut rng);
        assert_eq!(state.table_index(), 0);
        assert_eq!(state.current_table(), table(2));
        assert_eq!(state.question().table(), table(2));
        assert_eq!(state.score(), Score::default());
        assert_eq!(state.badge(), None);
    }

    #[test]
    fn correct_answer_rewards_and_replaces_question() {
        let mut rng = StdRng::seed_from_u64(2);
        let state = QuizState::new(TableSet::default(), &mut rng);
        let (state, evaluation) = answer_correctly(state, &mut rng);

        assert!(evaluation.is_correct());
        assert_eq!(evaluation.score_delta(), 10);
        assert_eq!(evaluation.progress_delta(), 1);
        assert!(!evaluation.table_advanced());
        assert!(evaluation.next_question().is_some());
        assert_eq!(state.score().points(), 10);
        assert_eq!(state.progress().count(table(2)), 1);
        assert_eq!(state.question(), evaluation.next_question().unwrap());
    }

    #[test]
    fn wrong_answer_keeps_state() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = QuizState::new(TableSet::default(), &mut rng);
        let wrong = (state.question().answer() + 1).to_string();
        let before = state.clone();
        let (after, evaluation) = state.submit(&wrong, &mut rng);

        assert!(!evaluation.is_correct());
        assert!(!evaluation.mutates());
        assert!(evaluation.next_question().is_none());
        assert_eq!(after, before);
    }

    #[test]
    fn non_numeric_input_is_wrong() {
        let mut rng = StdRng::seed_from_u64(4);
        let before = QuizState::new(TableSet::default(), &mut rng);
        for input in ["", "   ", "abc", "two", "-"] {
            let (after, evaluation) = before.clone().submit(input, &mut rng);
            assert!(!evaluation.is_correct());
            assert_eq!(after, before);
        }
    }

    #[test]
    fn ten_correct_answers_advance_to_next_table() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = QuizState::new(TableSet::default(), &mut rng);
        for n in 1..=10 {
            let (next, evaluation) = answer_correctly(state, &mut rng);
            state = next;
            assert_eq!(evaluation.table_advanced(), n == 10);
        }

        assert_eq!(state.progress().count(table(2)), 10);
        assert_eq!(state.progress().count(table(3)), 0);
        assert_eq!(state.score().points(), 100);
        assert_eq!(state.badge(), Some(Badge::Silver));
        assert_eq!(state.current_table(), table(3));
        assert_eq!(state.question().table(), table(3));
    }

    #[test]
    fn wrong_then_correct_adds_ten_once() {
        let mut rng = StdRng::seed_from_u64(6);
        let state = QuizState::new(TableSet::default(), &mut rng);
        let wrong = (state.question().answer() + 3).to_string();
        let (state, _) = state.submit(&wrong, &mut rng);
        let (state, _) = answer_correctly(state, &mut rng);
        assert_eq!(state.score().points(), 10);
    }

    #[test]
    fn last_table_never_advances_and_keeps_counting() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut state = QuizState::new(TableSet::new([4]).unwrap(), &mut rng);
        for _ in 0..15 {
            let (next, evaluation) = answer_correctly(state, &mut rng);
            assert!(!evaluation.table_advanced());
            assert_eq!(evaluation.progress_delta(), 1);
            state = next;
        }
        assert_eq!(state.table_index(), 0);
        assert_eq!(state.progress().count(table(4)), 15);
        assert_eq!(state.score().points(), 150);
        assert_eq!(state.badge(), Some(Badge::Gold));
    }

    #[test]
    fn every_correct_answer_counts_after_advancing() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = QuizState::new(TableSet::default(), &mut rng);
        let mut last = None;
        for _ in 0..25 {
            let (next, evaluation) = answer_correctly(state, &mut rng);
            state = next;
            last = Some(evaluation);
        }
        assert_eq!(state.progress().count(table(2)), 10);
        assert_eq!(state.progress().count(table(3)), 15);
        assert_eq!(last.map(|e| e.progress_delta()), Some(1));
        assert_eq!(state.score().points(), 250);
    }

    #[test]
    fn evaluation_from_another_table_is_not_applied() {
        let mut rng = StdRng::seed_from_u64(12);
        let tables = TableSet::default();
        let fresh = QuizState::new(tables.clone(), &mut rng);
        let stale = fresh.evaluate(&answer_of(&fresh), &mut rng);
        assert!(stale.is_correct());

        let done = Progress::from_counts(&tables, [(table(2), 10)]);
        let resumed = QuizState::resume(tables, Score::new(100), done, &mut rng);
        assert_eq!(resumed.current_table(), table(3));
        let after = resumed.clone().apply(&stale);
        assert_eq!(after, resumed);
        assert_eq!(after.question().table(), after.current_table());
    }

    #[test]
    fn resume_starts_at_first_incomplete_table() {
        let mut rng = StdRng::seed_from_u64(9);
        let tables = TableSet::new([2, 3, 4]).unwrap();
        let progress = Progress::from_counts(&tables, [(table(2), 10), (table(3), 4)]);
        let state = QuizState::resume(tables.clone(), Score::new(140), progress, &mut rng);
        assert_eq!(state.current_table(), table(3));
        assert_eq!(state.question().table(), table(3));

        let done = Progress::from_counts(&tables, tables.iter().map(|t| (t, 10)));
        let state = QuizState::resume(tables, Score::new(300), done, &mut rng);
        assert_eq!(state.current_table(), table(4));
    }

    #[test]
    fn reset_clears_everything() {
        let mut rng = StdRng::seed_from_u64(10);
        let state = QuizState::new(TableSet::default(), &mut rng);
        let (state, _) = answer_correctly(state, &mut rng);
        let state = state.reset(&mut rng);
        assert_eq!(state.score().points(), 0);
        assert_eq!(state.progress().count(table(2)), 0);
        assert_eq!(state.table_index(), 0);
    }

    proptest! {
        #[test]
        fn progress_counts_every_correct_answer(seed in any::<u64>(), n in 0u32..25) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = QuizState::new(TableSet::new([6]).unwrap(), &mut rng);
            for _ in 0..n {
                state = answer_correctly(state, &mut rng).0;
            }
            prop_assert_eq!(state.progress().count(table(6)), n);
            prop_assert_eq!(state.score().points(), 10 * n);
        }

        #[test]
        fn first_table_progress_is_min_of_correct_answers(seed in any::<u64>(), n in 0u32..25) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = QuizState::new(TableSet::default(), &mut rng);
            for _ in 0..n {
                state = answer_correctly(state, &mut rng).0;
            }
            prop_assert_eq!(state.progress().count(table(2)), n.min(COMPLETION_THRESHOLD));
            prop_assert_eq!(state.progress().count(table(3)), n.saturating_sub(COMPLETION_THRESHOLD));
        }

        #[test]
        fn index_and_score_never_regress(seed in any::<u64>(), answers in proptest::collection::vec(any::<bool>(), 0..60)) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = QuizState::new(TableSet::new([2, 3, 5]).unwrap(), &mut rng);
            for correct in answers {
                let input = if correct { answer_of(&state) } else { "nope".to_string() };
                let (index, score) = (state.table_index(), state.score());
                state = state.submit(&input, &mut rng).0;
                prop_assert!(state.table_index() >= index);
                prop_assert!(state.table_index() <= state.tables().last_index());
                prop_assert!(state.score() >= score);
                prop_assert_eq!(state.question().table(), state.current_table());
            }
        }
    }
}
