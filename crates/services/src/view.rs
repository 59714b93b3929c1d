use quiz_core::model::{COMPLETION_THRESHOLD, Table};
use quiz_core::{Locale, QuizState};

use crate::feedback::Feedback;

/// One row of the per-table statistics list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProgressRow {
    pub table: Table,
    pub label: String,
    pub count: u32,
    pub target: u32,
    /// 0..=100, for a progress bar.
    pub percent: u32,
    pub is_current: bool,
}

/// Read-only summary for a parent: completion per table, score, badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentPanel {
    pub completion: Vec<String>,
    pub total_score: u32,
    pub badge: String,
}

/// Everything a front-end needs to draw the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub heading: String,
    pub prompt: String,
    pub read_aloud: bool,
    pub tables: Vec<TableProgressRow>,
    pub score_label: String,
    pub badge: Option<String>,
    pub feedback: Option<Feedback>,
    pub parent: ParentPanel,
    pub reminder: &'static str,
}

impl QuizView {
    #[must_use]
    pub fn build(
        state: &QuizState,
        feedback: Option<&Feedback>,
        read_aloud: bool,
        locale: Locale,
    ) -> Self {
        let current = state.current_table();
        let progress = state.progress();

        let tables = state
            .tables()
            .iter()
            .map(|table| {
                let count = progress.count(table);
                TableProgressRow {
                    table,
                    label: locale.table_progress(table, count, COMPLETION_THRESHOLD),
                    count,
                    target: COMPLETION_THRESHOLD,
                    percent: progress.percent(table),
                    is_current: table == current,
                }
            })
            .collect::<Vec<_>>();

        let badge = state.badge().map(|badge| locale.badge_name(badge).to_string());

        let parent = ParentPanel {
            completion: tables.iter().map(|row| format!("📊 {}", row.label)).collect(),
            total_score: state.score().points(),
            badge: badge
                .clone()
                .unwrap_or_else(|| locale.no_badge().to_string()),
        };

        Self {
            heading: locale.heading(current),
            prompt: state.question().prompt(),
            read_aloud,
            tables,
            score_label: locale.score_label(state.score().points()),
            badge,
            feedback: feedback.cloned(),
            parent,
            reminder: locale.daily_reminder(),
        }
    }
}
