#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod feedback;
pub mod media;
pub mod quiz_service;
pub mod view;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuizServiceError};
pub use feedback::{Feedback, FeedbackKind};
pub use media::{MediaError, Muted, SoundKind, SoundPlayer, Speaker};
pub use quiz_service::QuizService;
pub use view::{ParentPanel, QuizView, TableProgressRow};
