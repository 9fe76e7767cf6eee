use crate::lexer::LexingError;
use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Errors that end the shell. Everything recoverable is reported in place instead.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to read input")]
    Read(#[source] io::Error),
    #[error("failed to allocate argument buffer ({requested} slots)")]
    Allocation {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("failed to write output")]
    Output(#[source] io::Error),
}

impl From<LexingError> for ShellError {
    fn from(e: LexingError) -> Self {
        match e {
            LexingError::Allocation { requested, source } => {
                ShellError::Allocation { requested, source }
            }
        }
    }
}
