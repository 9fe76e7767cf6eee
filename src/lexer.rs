//! A module implementing lexical analysis (tokenization) of a command line.
//!
//! There is no quoting, escaping or substitution: a line is a sequence of words
//! separated by runs of whitespace, and nothing else.

use std::collections::TryReserveError;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use thiserror::Error;

/// Bytes that separate words: space, tab, newline, carriage return and BEL.
pub const DELIMITERS: &[u8] = b" \t\n\r\x07";

/// Number of argument slots allocated up front, and added each time they run out.
pub const SLOT_CHUNK: usize = 64;

/// Errors that can occur during the lexical analysis process.
#[derive(Debug, Error)]
pub enum LexingError {
    /// Growing the argument storage failed.
    #[error("failed to grow argument buffer to {requested} slots")]
    Allocation {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Ordered words of one command line, borrowed from the line they were split from.
///
/// Words are the raw bytes typed, not necessarily UTF-8, so they are kept as [`OsStr`].
/// The vector cannot outlive its line. Reading past the last word yields `None`,
/// which plays the role of the end-of-arguments sentinel.
#[derive(Debug)]
pub struct ArgVector<'line> {
    words: Vec<&'line OsStr>,
    slots: usize,
}

impl<'line> ArgVector<'line> {
    fn with_slots(slots: usize) -> Result<Self, LexingError> {
        let mut words = Vec::new();
        words
            .try_reserve_exact(slots)
            .map_err(|source| LexingError::Allocation {
                requested: slots,
                source,
            })?;
        Ok(Self { words, slots })
    }

    fn push(&mut self, word: &'line OsStr) -> Result<(), LexingError> {
        self.words.push(word);
        // Keep one free slot for the sentinel.
        if self.words.len() >= self.slots {
            let requested = self.slots + SLOT_CHUNK;
            self.words
                .try_reserve_exact(requested - self.words.len())
                .map_err(|source| LexingError::Allocation { requested, source })?;
            tracing::trace!(slots = requested, "argument buffer grown");
            self.slots = requested;
        }
        Ok(())
    }

    /// The command name, or `None` for an empty command.
    pub fn command(&self) -> Option<&'line OsStr> {
        self.get(0)
    }

    /// The word at `index`; `None` at and past the end.
    pub fn get(&self, index: usize) -> Option<&'line OsStr> {
        self.words.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of argument slots currently allocated. Always greater than [`len`](Self::len).
    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn as_slice(&self) -> &[&'line OsStr] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &'line OsStr> + '_ {
        self.words.iter().copied()
    }
}

/// The main entry point function to perform lexical analysis.
///
/// Splits `line` on [`DELIMITERS`], dropping empty words, and keeps the order of appearance.
/// Every other byte is kept as typed.
///
/// # Arguments
/// * `line` - The raw line to be tokenized.
///
/// # Returns
/// `Result<ArgVector, LexingError>`: the words on success, or a `LexingError`
/// if the argument storage could not be grown. No partial result is returned.
pub fn split_into_tokens<L>(line: &L) -> Result<ArgVector<'_>, LexingError>
where
    L: AsRef<[u8]> + ?Sized,
{
    let mut args = ArgVector::with_slots(SLOT_CHUNK)?;
    let words = line
        .as_ref()
        .split(|b| DELIMITERS.contains(b))
        .filter(|w| !w.is_empty());
    for word in words {
        args.push(OsStr::from_bytes(word))?;
    }
    tracing::trace!(tokens = args.len(), "line tokenized");
    Ok(args)
}
