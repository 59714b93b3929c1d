//! Sound and speech collaborators.
//!
//! Both are fire-and-forget: the quiz logs failures and carries on.

use quiz_core::Locale;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MediaError {
    #[error("media backend unavailable")]
    Unavailable,
    #[error("media backend failed: {0}")]
    Backend(String),
}

/// Which feedback sound to play after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    Correct,
    Incorrect,
}

impl SoundKind {
    #[must_use]
    pub fn for_answer(correct: bool) -> Self {
        if correct { Self::Correct } else { Self::Incorrect }
    }

    /// Audio asset path for this kind.
    #[must_use]
    pub fn asset(self) -> &'static str {
        match self {
            SoundKind::Correct => "sounds/correct.mp3",
            SoundKind::Incorrect => "sounds/wrong.mp3",
        }
    }
}

pub trait SoundPlayer: Send + Sync {
    /// Start playing a feedback sound.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if playback could not start.
    fn play(&self, kind: SoundKind) -> Result<(), MediaError>;
}

pub trait Speaker: Send + Sync {
    /// Read `text` aloud in `locale`.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if speech could not start.
    fn speak(&self, text: &str, locale: Locale) -> Result<(), MediaError>;
}

/// Collaborator that does nothing, for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Muted;

impl SoundPlayer for Muted {
    fn play(&self, _kind: SoundKind) -> Result<(), MediaError> {
        Ok(())
    }
}

impl Speaker for Muted {
    fn speak(&self, _text: &str, _locale: Locale) -> Result<(), MediaError> {
        Ok(())
    }
}
