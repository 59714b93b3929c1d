//! User-facing wording per locale.
//!
//! Kept in core so every front-end (and the speech collaborator) phrases the
//! quiz the same way.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{Badge, Question, Table};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct LocaleError(pub String);

/// Supported languages, identified by BCP 47 tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    TrTr,
    EnUs,
}

impl Locale {
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Locale::TrTr => "tr-TR",
            Locale::EnUs => "en-US",
        }
    }

    /// Sentence read aloud for a question.
    #[must_use]
    pub fn spoken_question(self, question: &Question) -> String {
        match self {
            Locale::TrTr => format!("{} çarpı {} kaç eder?", question.table(), question.operand()),
            Locale::EnUs => format!("What is {} times {}?", question.table(), question.operand()),
        }
    }

    #[must_use]
    pub fn heading(self, table: Table) -> String {
        match self {
            Locale::TrTr => format!("Çarpım Tablosu: {table}"),
            Locale::EnUs => format!("Times Table: {table}"),
        }
    }

    #[must_use]
    pub fn correct_message(self) -> &'static str {
        match self {
            Locale::TrTr => "Doğru! 🎉",
            Locale::EnUs => "Correct! 🎉",
        }
    }

    #[must_use]
    pub fn incorrect_message(self) -> &'static str {
        match self {
            Locale::TrTr => "Yanlış! Tekrar dene. ❌",
            Locale::EnUs => "Wrong! Try again. ❌",
        }
    }

    #[must_use]
    pub fn badge_name(self, badge: Badge) -> &'static str {
        match (self, badge) {
            (Locale::TrTr, Badge::Gold) => "🏅 Altın Rozet",
            (Locale::TrTr, Badge::Silver) => "🥈 Gümüş Rozet",
            (Locale::TrTr, Badge::Bronze) => "🥉 Bronz Rozet",
            (Locale::EnUs, Badge::Gold) => "🏅 Gold Badge",
            (Locale::EnUs, Badge::Silver) => "🥈 Silver Badge",
            (Locale::EnUs, Badge::Bronze) => "🥉 Bronze Badge",
        }
    }

    #[must_use]
    pub fn no_badge(self) -> &'static str {
        match self {
            Locale::TrTr => "Henüz kazanılmadı",
            Locale::EnUs => "Not earned yet",
        }
    }

    /// Label for a table's row in the statistics list, e.g. `2'ler: 4 / 10`.
    #[must_use]
    pub fn table_progress(self, table: Table, count: u32, target: u32) -> String {
        match self {
            Locale::TrTr => format!("{table}'ler: {count} / {target}"),
            Locale::EnUs => format!("{table}s: {count} / {target}"),
        }
    }

    #[must_use]
    pub fn score_label(self, points: u32) -> String {
        match self {
            Locale::TrTr => format!("Puan: {points}"),
            Locale::EnUs => format!("Score: {points}"),
        }
    }

    #[must_use]
    pub fn daily_reminder(self) -> &'static str {
        match self {
            Locale::TrTr => "⏰ Her gün 10 soru çözmeyi unutma! Yeni rozetler seni bekliyor!",
            Locale::EnUs => "⏰ Remember to solve 10 questions every day! New badges are waiting!",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "tr-tr" | "tr" => Ok(Locale::TrTr),
            "en-us" | "en" => Ok(Locale::EnUs),
            _ => Err(LocaleError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spoken_question_matches_locale() {
        let question = Question::new(Table::new(2).unwrap(), 7);
        assert_eq!(Locale::TrTr.spoken_question(&question), "2 çarpı 7 kaç eder?");
        assert_eq!(Locale::EnUs.spoken_question(&question), "What is 2 times 7?");
    }

    #[test]
    fn parses_tags_loosely() {
        assert_eq!("tr-TR".parse::<Locale>().unwrap(), Locale::TrTr);
        assert_eq!("en_us".parse::<Locale>().unwrap(), Locale::EnUs);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::EnUs);
        assert!("de-DE".parse::<Locale>().is_err());
        assert_eq!(Locale::default().to_string(), "tr-TR");
    }
}
