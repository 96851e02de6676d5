//! Launching and supervising non-builtin commands.

use crate::command::Command;
use crate::session::Session;
use crate::status::LastStatus;
use anyhow::{Context, Result, anyhow};
use nix::errno::Errno;
use std::ffi::OsStr;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command as StdCommand, Stdio};

/// Launch `cmd` as a child process and either wait for it (foreground) or
/// hand it to the background registry.
///
/// Every launch-side failure (unknown program, unopenable redirection
/// target, spawn error) is reported as a single line and leaves the
/// interpreter running; a failed foreground launch records `exit value 1`,
/// the same status the child itself would have reported. The only fatal
/// outcome is a wait anomaly other than the benign already-collected race.
pub fn run(cmd: &Command, session: &mut Session, out: &mut dyn Write) -> Result<()> {
    let child = match spawn(cmd, session) {
        Ok(child) => child,
        Err(err) => {
            eprintln!("minish: {err:#}");
            if !cmd.background {
                session.last_status = LastStatus::Exited(1);
            }
            return Ok(());
        }
    };

    if cmd.background {
        writeln!(out, "background pid is {}", child.id())?;
        out.flush()?;
        session.registry.insert(child);
        return Ok(());
    }

    wait_foreground(child, session)
}

fn wait_foreground(mut child: Child, session: &mut Session) -> Result<()> {
    match child.wait() {
        Ok(status) => {
            session.last_status = status.into();
            Ok(())
        }
        // Someone else already collected this child; keep the previous
        // status and move on.
        Err(err) if err.raw_os_error() == Some(Errno::ECHILD as i32) => Ok(()),
        Err(err) => Err(err).context("cannot observe the foreground child"),
    }
}

fn spawn(cmd: &Command, session: &Session) -> Result<Child> {
    let program = resolve_program(&cmd.program)?;
    let mut launcher = StdCommand::new(&program);
    launcher.args(&cmd.arguments[1..]);

    if cmd.background {
        // A background child must not consume interactive keystrokes, and
        // its output flows through the notification channel rather than
        // the terminal.
        launcher.stdin(Stdio::null());
        launcher.stdout(session.notifications.writer_stdio()?);
        launcher.stderr(session.notifications.writer_stdio()?);
    }
    if let Some(path) = &cmd.input_path {
        let file =
            File::open(path).with_context(|| format!("cannot open {path} for input"))?;
        launcher.stdin(Stdio::from(file));
    }
    if let Some(path) = &cmd.output_path {
        let file =
            File::create(path).with_context(|| format!("cannot open {path} for output"))?;
        launcher.stdout(Stdio::from(file));
    }

    launcher
        .spawn()
        .with_context(|| format!("{}: cannot start", cmd.program))
}

/// Resolve the program token the way a shell would.
///
/// A name with a directory component (absolute, relative or `./`-prefixed)
/// is taken as given; a bare name is searched in each `PATH` directory in
/// order, first match wins.
fn resolve_program(name: &str) -> Result<PathBuf> {
    let path = Path::new(name);
    if path.components().count() > 1 {
        return Ok(path.to_path_buf());
    }
    let search_paths = std::env::var_os("PATH").unwrap_or_default();
    find_in_path(&search_paths, path.as_os_str())
        .ok_or_else(|| anyhow!("{name}: command not found"))
}

fn find_in_path(search_paths: &OsStr, program: &OsStr) -> Option<PathBuf> {
    for dir in std::env::split_paths(search_paths) {
        let candidate = dir.join(program);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}
