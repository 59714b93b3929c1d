#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod model;
pub mod phrases;
pub mod quiz;

pub use config::QuizConfig;
pub use error::Error;
pub use phrases::Locale;
pub use quiz::{Evaluation, QuizState, parse_answer};
