use quiz_core::Locale;

pub const HAPPY_IMAGE: &str = "/images/happy.png";
pub const SAD_IMAGE: &str = "/images/sad.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct,
    Incorrect,
}

/// What the presentation layer shows after an answer: a message and an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    kind: FeedbackKind,
    message: &'static str,
    image: &'static str,
}

impl Feedback {
    #[must_use]
    pub fn for_answer(correct: bool, locale: Locale) -> Self {
        if correct {
            Self {
                kind: FeedbackKind::Correct,
                message: locale.correct_message(),
                image: HAPPY_IMAGE,
            }
        } else {
            Self {
                kind: FeedbackKind::Incorrect,
                message: locale.incorrect_message(),
                image: SAD_IMAGE,
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> FeedbackKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        self.message
    }

    #[must_use]
    pub fn image(&self) -> &'static str {
        self.image
    }
}
