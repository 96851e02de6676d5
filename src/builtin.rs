//! The fixed set of commands the interpreter executes in-process.

use crate::command::Command;
use crate::session::Session;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::io::Write;
use std::path::PathBuf;

/// Outcome of builtin dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    NotHandled,
}

/// A command implemented directly by the interpreter.
///
/// Builtins are parsed with [`argh`] from the command's argument vector and
/// run in-process; they never spawn a child.
trait Builtin: Sized + FromArgs {
    /// Canonical name of the command. Matching is case-sensitive.
    fn name() -> &'static str;

    fn execute(self, out: &mut dyn Write, session: &mut Session) -> Result<()>;
}

/// Try to interpret `cmd` as a builtin.
///
/// A recognized name is always `Handled`, even when its arguments do not
/// parse or its effect fails; those cases are reported to the user and the
/// loop continues. Unknown names come back `NotHandled` for the caller to
/// route to the process supervisor.
pub fn try_builtin(
    cmd: &Command,
    session: &mut Session,
    out: &mut dyn Write,
) -> Result<Dispatch> {
    let handled = dispatch::<Echo>(cmd, session, out)?
        || dispatch::<Status>(cmd, session, out)?
        || dispatch::<Cd>(cmd, session, out)?
        || dispatch::<Exit>(cmd, session, out)?;
    Ok(if handled {
        Dispatch::Handled
    } else {
        Dispatch::NotHandled
    })
}

fn dispatch<B: Builtin>(
    cmd: &Command,
    session: &mut Session,
    out: &mut dyn Write,
) -> Result<bool> {
    if cmd.program != B::name() {
        return Ok(false);
    }
    let args: Vec<&str> = cmd.arguments[1..].iter().map(String::as_str).collect();
    match B::from_args(&[B::name()], &args) {
        Ok(builtin) => {
            if let Err(err) = builtin.execute(out, session) {
                eprintln!("minish: {err:#}");
            }
        }
        Err(EarlyExit { output, .. }) => {
            writeln!(out, "{}", output.trim_end())?;
        }
    }
    Ok(true)
}

#[derive(FromArgs)]
/// Write the arguments to the interactive output, space-joined, followed by
/// a newline.
struct Echo {
    #[argh(positional, greedy)]
    /// words to print as-is.
    words: Vec<String>,
}

impl Builtin for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn execute(self, out: &mut dyn Write, _session: &mut Session) -> Result<()> {
        writeln!(out, "{}", self.words.join(" "))?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Report how the most recent foreground command ended.
struct Status {}

impl Builtin for Status {
    fn name() -> &'static str {
        "status"
    }

    fn execute(self, out: &mut dyn Write, session: &mut Session) -> Result<()> {
        writeln!(out, "{}", session.last_status)?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Change the working directory.
struct Cd {
    #[argh(positional)]
    /// directory to switch to; defaults to $HOME when omitted.
    target: Option<String>,
}

impl Builtin for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _out: &mut dyn Write, _session: &mut Session) -> Result<()> {
        let target = match self.target {
            Some(target) => PathBuf::from(target),
            None => PathBuf::from(env::var("HOME").context("cd: HOME is not set")?),
        };
        env::set_current_dir(&target)
            .with_context(|| format!("cd: cannot change to {}", target.display()))?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Terminate every tracked background process, then leave the interpreter.
struct Exit {
    #[argh(positional, greedy)]
    /// ignored.
    _rest: Vec<String>,
}

impl Builtin for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _out: &mut dyn Write, session: &mut Session) -> Result<()> {
        for (pid, err) in session.registry.terminate_all() {
            eprintln!("minish: cannot terminate background pid {pid}: {err}");
        }
        session.should_exit = true;
        Ok(())
    }
}
