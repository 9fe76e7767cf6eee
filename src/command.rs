use crate::lexer::ArgVector;
use anyhow::Result;
use std::io::Write;

/// Signal returned by every command handler and by the process launcher.
///
/// The loop driver is the only consumer: it keeps prompting on [`Flow::Continue`]
/// and stops on [`Flow::Stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Output streams and registry view handed to a command while it runs.
///
/// Informational text goes to `stdout`, diagnostics to `stderr`.
pub struct Context<'a> {
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
    /// Builtin names in registry order, for `help`.
    pub builtins: &'a [&'static str],
}

/// A command implemented inside the interpreter.
pub trait Builtin {
    /// Exact, case-sensitive name the command is looked up by.
    fn name(&self) -> &'static str;

    /// Runs the command with the full argument vector, command name included at position 0.
    ///
    /// An `Err` is a recoverable failure: the dispatcher reports it and keeps looping.
    fn execute(&self, args: &ArgVector<'_>, ctx: &mut Context<'_>) -> Result<Flow>;
}
