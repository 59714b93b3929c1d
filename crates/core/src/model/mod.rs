mod badge;
mod progress;
mod question;
mod table;

pub use badge::{BRONZE_THRESHOLD, Badge, GOLD_THRESHOLD, SILVER_THRESHOLD};
pub use progress::{COMPLETION_THRESHOLD, CORRECT_REWARD, Progress, Score};
pub use question::{MAX_OPERAND, Question};
pub use table::{Table, TableSet, TableSetError};
