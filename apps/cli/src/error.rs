//! CLI error type. Everything below bubbles up here and prints as a
//! one-line message; the process exits non-zero.

use kirana_db::DbError;
use kirana_pdf::PdfError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Db(#[from] DbError),

    #[error("{0}")]
    Pdf(#[from] PdfError),

    /// Login failed or the command needs a role the caller lacks.
    #[error("{0}")]
    AccessDenied(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
