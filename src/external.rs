use crate::command::{Context, Flow};
use crate::lexer::ArgVector;
use std::io::{self, Write};
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Failures while starting or waiting on an external program.
///
/// None of them stop the shell; they are reported and the loop continues.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The program image could not be loaded: missing, not executable, or malformed.
    #[error("{name}: {source}")]
    Exec {
        name: String,
        #[source]
        source: io::Error,
    },
    /// The child process could not be created at all.
    #[error("{name}: failed to spawn: {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("{name}: failed to wait for child: {source}")]
    Wait {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Run `args` as an external program and block until it finishes.
///
/// The program is resolved through `PATH` when it has no slash, and receives the argument
/// vector unchanged, with the name as typed in position 0. Standard streams are inherited.
/// The exit status is not propagated; the shell always continues afterwards.
pub fn launch(args: &ArgVector<'_>, ctx: &mut Context<'_>) -> Flow {
    if let Err(e) = spawn_and_wait(args) {
        tracing::debug!(error = %e, "launch failed");
        // Nothing sensible to do if stderr itself is broken.
        let _ = writeln!(ctx.stderr, "{e}");
    }
    Flow::Continue
}

/// Spawn the program and wait for it, returning its raw exit status.
pub fn spawn_and_wait(args: &ArgVector<'_>) -> Result<ExitStatus, LaunchError> {
    let Some((name, rest)) = args.as_slice().split_first() else {
        return Err(LaunchError::Exec {
            name: String::new(),
            source: io::Error::from(io::ErrorKind::InvalidInput),
        });
    };

    let mut child = Command::new(name).args(rest).spawn().map_err(|source| {
        let name = name.to_string_lossy().into_owned();
        if is_exec_failure(&source) {
            LaunchError::Exec { name, source }
        } else {
            LaunchError::Spawn { name, source }
        }
    })?;
    tracing::debug!(pid = child.id(), program = ?name, "child started");

    let status = child.wait().map_err(|source| LaunchError::Wait {
        name: name.to_string_lossy().into_owned(),
        source,
    })?;
    tracing::debug!(
        program = ?name,
        code = status_code(status),
        success = status.success(),
        "child finished"
    );
    Ok(status)
}

fn is_exec_failure(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound
            | io::ErrorKind::PermissionDenied
            | io::ErrorKind::InvalidInput
            | io::ErrorKind::InvalidData
    )
}

/// Shell-style numeric status: the exit code, or `128 + signal` for a signalled child.
fn status_code(status: ExitStatus) -> i32 {
    match status.code() {
        Some(x) => x,
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::split_into_tokens;
    use std::fs;
    use std::path::PathBuf;

    fn launch_line(line: impl AsRef<[u8]>) -> (Flow, String) {
        let args = split_into_tokens(&line).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut ctx = Context {
            stdout: &mut out,
            stderr: &mut err,
            builtins: &[],
        };
        let flow = launch(&args, &mut ctx);
        (flow, String::from_utf8_lossy(&err).into_owned())
    }

    // Scripts run through `sh <file>` since the tokenizer has no quoting.
    fn write_script(tag: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "basic_shell_{}_{}.sh",
            tag,
            std::process::id()
        ));
        fs::write(&path, body).expect("write script");
        path
    }

    #[test]
    #[cfg(unix)]
    fn true_runs_and_continues() {
        let (flow, err) = launch_line("true\n");
        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty(), "unexpected diagnostics: {err}");
    }

    #[test]
    #[cfg(unix)]
    fn failing_program_still_continues() {
        let (flow, err) = launch_line("false\n");
        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn exit_status_reaches_caller_of_spawn_and_wait() {
        let script = write_script("status", "exit 7\n");
        let line = format!("sh {}", script.display());
        let args = split_into_tokens(&line).unwrap();

        let status = spawn_and_wait(&args).expect("sh should start");
        assert_eq!(status.code(), Some(7));

        let _ = fs::remove_file(script);
    }

    #[test]
    #[cfg(unix)]
    fn arguments_are_passed_through_unchanged() {
        let output = std::env::temp_dir().join(format!("basic_shell_args_{}", std::process::id()));
        let script = write_script(
            "args",
            &format!("printf '%s|' \"$@\" > {}\n", output.display()),
        );

        let line = format!("sh {} one two three\n", script.display());
        let (flow, err) = launch_line(&line);
        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty(), "unexpected diagnostics: {err}");

        // The parent only returns after the child has exited, so the file is complete.
        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, "one|two|three|");

        let _ = fs::remove_file(script);
        let _ = fs::remove_file(output);
    }

    #[test]
    #[cfg(unix)]
    fn non_utf8_argument_reaches_child_unchanged() {
        let output = std::env::temp_dir().join(format!("basic_shell_bytes_{}", std::process::id()));
        let script = write_script(
            "bytes",
            &format!("printf '%s' \"$1\" > {}\n", output.display()),
        );

        let mut line = format!("sh {} ", script.display()).into_bytes();
        line.extend_from_slice(b"caf\xe9\xff\n");
        let (flow, err) = launch_line(&line);
        assert_eq!(flow, Flow::Continue);
        assert!(err.is_empty(), "unexpected diagnostics: {err}");

        assert_eq!(fs::read(&output).unwrap(), b"caf\xe9\xff");

        let _ = fs::remove_file(script);
        let _ = fs::remove_file(output);
    }

    #[test]
    fn missing_program_is_reported() {
        let name = format!("no_such_program_{}", std::process::id());
        let (flow, err) = launch_line(&format!("{name} --flag\n"));
        assert_eq!(flow, Flow::Continue);
        assert!(err.starts_with(&format!("{name}: ")), "got {err:?}");
    }

    #[test]
    fn missing_program_maps_to_exec_error() {
        let args = split_into_tokens("/definitely/not/here").unwrap();
        match spawn_and_wait(&args) {
            Err(LaunchError::Exec { name, .. }) => assert_eq!(name, "/definitely/not/here"),
            other => panic!("expected exec failure, got {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn signalled_child_maps_to_128_plus_signal() {
        let script = write_script("kill", "kill -9 $$\n");
        let line = format!("sh {}", script.display());
        let args = split_into_tokens(&line).unwrap();

        let status = spawn_and_wait(&args).unwrap();
        assert_eq!(status_code(status), 128 + 9);

        let _ = fs::remove_file(script);
    }
}
