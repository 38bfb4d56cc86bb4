pub mod cli;
pub use cli::{Command, CompilerOptions, MessageFormat};
mod check;
pub use check::{compile, Compilation};

use crate::semantic::InternalError;
use crate::syntax::DocumentError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error(transparent)]
    InputSourceError(#[from] io::Error),

    #[error("malformed document: {0}")]
    DocumentError(#[from] DocumentError),

    #[error("internal error: {0}")]
    InternalError(#[from] InternalError),

    #[error("cannot write report: {0}")]
    ReportError(#[from] serde_json::Error),
}

impl From<String> for CompilerError {
    fn from(message: String) -> Self {
        CompilerError::InvalidOption(message)
    }
}
