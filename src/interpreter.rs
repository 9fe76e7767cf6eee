use crate::builtin::Builtins;
use crate::command::{Context, Flow};
use crate::config::Config;
use crate::error::ShellError;
use crate::external;
use crate::lexer::{self, ArgVector};
use crate::reader;
use std::io::{BufRead, Write};

/// How a [`Interpreter::repl`] session came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The `exit` builtin was run.
    Exit,
    /// The input stream ran dry.
    EndOfInput,
}

/// A minimal interactive interpreter that runs builtin and external commands.
///
/// The interpreter owns an immutable [`Builtins`] registry that is consulted before
/// falling back to launching an external program, so builtins always win over a
/// same-named executable on `PATH`.
///
/// Example
/// ```
/// use basic_shell::{Interpreter, Outcome};
/// let sh = Interpreter::default();
/// let mut input = std::io::Cursor::new("help\nexit\n");
/// let (mut out, mut err) = (Vec::new(), Vec::new());
/// let outcome = sh.repl(&mut input, &mut out, &mut err).unwrap();
/// assert_eq!(outcome, Outcome::Exit);
/// ```
pub struct Interpreter {
    builtins: Builtins,
    config: Config,
}

impl Interpreter {
    /// Create a new interpreter with a custom builtin registry.
    pub fn new(builtins: Builtins, config: Config) -> Self {
        Self { builtins, config }
    }

    /// Create an interpreter with the standard builtins and the given settings.
    pub fn with_config(config: Config) -> Self {
        Self::new(Builtins::standard(), config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one parsed command line.
    ///
    /// An empty command does nothing. Builtin failures are written to `stderr` and the
    /// shell continues; only a builtin can return [`Flow::Stop`].
    pub fn execute(
        &self,
        args: &ArgVector<'_>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Flow {
        let Some(name) = args.command() else {
            return Flow::Continue;
        };

        let mut ctx = Context {
            stdout,
            stderr,
            builtins: self.builtins.names(),
        };

        match self.builtins.lookup(name) {
            Some(builtin) => {
                tracing::debug!(command = ?name, "dispatching builtin");
                match builtin.execute(args, &mut ctx) {
                    Ok(flow) => flow,
                    Err(e) => {
                        let _ = writeln!(ctx.stderr, "{e:#}");
                        Flow::Continue
                    }
                }
            }
            None => {
                tracing::debug!(command = ?name, "dispatching external");
                external::launch(args, &mut ctx)
            }
        }
    }

    /// Read-eval loop: prompt, read a line, split it and run it, until `exit` or end of input.
    ///
    /// Returns an error only for failures the shell cannot continue after: a broken input
    /// stream, a failed argument allocation, or an unwritable prompt.
    pub fn repl(
        &self,
        input: &mut impl BufRead,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Outcome, ShellError> {
        loop {
            write!(stdout, "{}", self.config.prompt).map_err(ShellError::Output)?;
            stdout.flush().map_err(ShellError::Output)?;

            let Some(line) = reader::read_line(input)? else {
                tracing::debug!("end of input");
                return Ok(Outcome::EndOfInput);
            };
            let args = lexer::split_into_tokens(&line)?;

            if self.execute(&args, stdout, stderr) == Flow::Stop {
                return Ok(Outcome::Exit);
            }
        }
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the builtins `cd`, `exit`, `help`, and the default prompt.
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}
