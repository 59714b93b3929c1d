use std::sync::Arc;

use quiz_core::model::{Badge, Progress, Question, Score, Table};
use quiz_core::{Evaluation, Locale, QuizConfig, QuizState};
use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::{QuizSnapshot, SnapshotRepository};
use tracing::{debug, info, warn};

use crate::error::QuizServiceError;
use crate::feedback::Feedback;
use crate::media::{SoundKind, SoundPlayer, Speaker};
use crate::view::QuizView;

/// Runs one quiz session: owns the state, persists after every change and
/// drives the sound and speech collaborators.
///
/// Operations are meant to be called one at a time by a single user.
pub struct QuizService {
    config: QuizConfig,
    state: QuizState,
    rng: StdRng,
    snapshots: Arc<dyn SnapshotRepository>,
    sound: Arc<dyn SoundPlayer>,
    speaker: Arc<dyn Speaker>,
    read_aloud: bool,
    feedback: Option<Feedback>,
}

impl QuizService {
    /// Load stored progress and start the quiz.
    ///
    /// Unreadable or corrupt storage is not fatal: the quiz starts from zero.
    pub async fn start(
        config: QuizConfig,
        snapshots: Arc<dyn SnapshotRepository>,
        sound: Arc<dyn SoundPlayer>,
        speaker: Arc<dyn Speaker>,
    ) -> Self {
        let snapshot = match snapshots.load().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "stored quiz progress unreadable, starting from defaults");
                QuizSnapshot::default()
            }
        };

        let mut rng = config
            .seed()
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let tables = config.tables().clone();
        let progress = snapshot.progress_for(&tables);
        let state = QuizState::resume(tables, snapshot.score, progress, &mut rng);

        info!(
            tables = %config.tables(),
            score = state.score().points(),
            table = %state.current_table(),
            "quiz started"
        );

        let service = Self {
            read_aloud: config.read_aloud(),
            config,
            state,
            rng,
            snapshots,
            sound,
            speaker,
            feedback: None,
        };
        service.announce_question();
        service
    }

    /// Check `text` against the current question and update everything that follows from it.
    ///
    /// Never fails: non-numeric input counts as a wrong answer and persistence
    /// or media failures are logged.
    pub async fn submit_answer(&mut self, text: &str) -> Evaluation {
        let (state, evaluation) = self.state.clone().submit(text, &mut self.rng);
        self.state = state;
        let correct = evaluation.is_correct();

        debug!(
            input = text,
            correct,
            score = self.state.score().points(),
            table = %evaluation.table(),
            "answer submitted"
        );

        if let Err(err) = self.sound.play(SoundKind::for_answer(correct)) {
            debug!(error = %err, "feedback sound failed");
        }
        self.feedback = Some(Feedback::for_answer(correct, self.config.locale()));

        if evaluation.mutates() {
            if let Err(err) = self.persist().await {
                warn!(error = %err, "failed to save quiz progress");
            }
        }
        if evaluation.table_advanced() {
            info!(table = %self.state.current_table(), "advanced to next table");
        }
        if evaluation.next_question().is_some() {
            self.announce_question();
        }

        evaluation
    }

    /// Turn read-aloud on or off. Turning it on reads the current question.
    pub fn set_read_aloud_enabled(&mut self, enabled: bool) {
        let was_enabled = self.read_aloud;
        self.read_aloud = enabled;
        if enabled && !was_enabled {
            self.announce_question();
        }
    }

    /// Clear score and progress, save, and restart at the first table.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the cleared snapshot cannot be saved.
    pub async fn reset_progress(&mut self) -> Result<(), QuizServiceError> {
        self.state = self.state.clone().reset(&mut self.rng);
        self.feedback = None;
        self.persist().await?;
        info!("quiz progress reset");
        self.announce_question();
        Ok(())
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        self.state.question()
    }

    #[must_use]
    pub fn current_table(&self) -> Table {
        self.state.current_table()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.state.score()
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        self.state.progress()
    }

    #[must_use]
    pub fn badge(&self) -> Option<Badge> {
        self.state.badge()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn read_aloud_enabled(&self) -> bool {
        self.read_aloud
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.config.locale()
    }

    /// Presentation snapshot of the current state.
    #[must_use]
    pub fn view(&self) -> QuizView {
        QuizView::build(
            &self.state,
            self.feedback.as_ref(),
            self.read_aloud,
            self.config.locale(),
        )
    }

    async fn persist(&self) -> Result<(), QuizServiceError> {
        let snapshot = QuizSnapshot::capture(self.state.score(), self.state.progress());
        self.snapshots.save(&snapshot).await?;
        Ok(())
    }

    fn announce_question(&self) {
        if !self.read_aloud {
            return;
        }
        let locale = self.config.locale();
        let text = locale.spoken_question(self.state.question());
        if let Err(err) = self.speaker.speak(&text, locale) {
            debug!(error = %err, "speech failed");
        }
    }
}
