use crate::command::{Builtin, Context, Flow};
use crate::lexer::ArgVector;
use anyhow::{Context as _, Result, anyhow};
use std::env;
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;

/// Immutable table of builtin commands, built once and handed to the interpreter.
///
/// Lookup is linear and first-match; the table is tiny.
pub struct Builtins {
    entries: Vec<Box<dyn Builtin>>,
    names: Vec<&'static str>,
}

impl Builtins {
    /// Create a registry from the given commands, keeping their order.
    pub fn new(entries: Vec<Box<dyn Builtin>>) -> Self {
        let names = entries.iter().map(|b| b.name()).collect();
        Self { entries, names }
    }

    /// The registry of this shell: `cd`, `exit`, `help`.
    pub fn standard() -> Self {
        Self::new(vec![Box::new(Cd), Box::new(Exit), Box::new(Help)])
    }

    /// Exact, case-sensitive lookup by command name.
    pub fn lookup(&self, name: impl AsRef<OsStr>) -> Option<&dyn Builtin> {
        let name = name.as_ref();
        self.entries
            .iter()
            .find(|b| name == b.name())
            .map(|b| &**b)
    }

    /// Builtin names in registry order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

/// Change the current working directory of the shell process.
pub struct Cd;

impl Builtin for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(&self, args: &ArgVector<'_>, _ctx: &mut Context<'_>) -> Result<Flow> {
        let target = Path::new(args.get(1).ok_or_else(|| anyhow!("cd: expected argument"))?);
        env::set_current_dir(target)
            .with_context(|| format!("cd: chdir to {} failed", target.display()))?;
        tracing::debug!(dir = %target.display(), "working directory changed");
        Ok(Flow::Continue)
    }
}

/// Leave the shell.
pub struct Exit;

impl Builtin for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(&self, _args: &ArgVector<'_>, _ctx: &mut Context<'_>) -> Result<Flow> {
        Ok(Flow::Stop)
    }
}

/// Print usage and the list of builtins.
pub struct Help;

impl Builtin for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn execute(&self, _args: &ArgVector<'_>, ctx: &mut Context<'_>) -> Result<Flow> {
        let out = &mut *ctx.stdout;
        writeln!(out, "Welcome to Basic Linux Shell Help Page.")?;
        writeln!(out, "Type program names and arguments, and hit enter.")?;
        writeln!(out)?;
        writeln!(out, "The following functions are builtin:")?;
        for name in ctx.builtins {
            writeln!(out, "{name}")?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "Use the \"man\" command for information on other programs."
        )?;
        Ok(Flow::Continue)
    }
}
