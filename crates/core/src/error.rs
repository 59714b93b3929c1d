use thiserror::Error;

use crate::model::TableSetError;
use crate::phrases::LocaleError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TableSet(#[from] TableSetError),
    #[error(transparent)]
    Locale(#[from] LocaleError),
}
