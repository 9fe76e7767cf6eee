//! A tiny interactive command interpreter.
//!
//! Each line read from the input is split on whitespace into an argument vector, then
//! either handled by one of the builtins (`cd`, `exit`, `help`) or run as an external
//! program found through `PATH`. The shell waits for that program before prompting again.
//! There are no pipelines, redirections, quoting or variable expansion.
//!
//! The main entry point is [`Interpreter`]. [`Interpreter::repl`] drives the read-eval
//! loop over any buffered reader and reports fatal failures as [`ShellError`].

mod builtin;
pub mod command;
pub mod config;
mod error;
mod external;
mod interpreter;
pub mod lexer;
mod reader;

pub use builtin::Builtins;
pub use error::ShellError;
pub use external::LaunchError;
/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Interpreter, Outcome};
