//! Process-wide interpreter state and the per-line dispatch glue.

use crate::registry::BackgroundRegistry;
use crate::status::LastStatus;
use crate::{builtin, parser, supervisor};
use anyhow::{Context, Result};
use nix::fcntl::OFlag;
use nix::unistd::pipe2;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::os::fd::OwnedFd;
use std::process::Stdio;

/// Byte channel relaying background command output to the interactive
/// stream.
///
/// Background children get the write end as their stdout/stderr; the main
/// loop drains the read end once per iteration. The pipe is non-blocking,
/// so draining it can never suspend the interpreter.
pub struct NotificationChannel {
    reader: File,
    writer: OwnedFd,
}

impl NotificationChannel {
    fn new() -> Result<Self> {
        let (read_end, write_end) = pipe2(OFlag::O_NONBLOCK | OFlag::O_CLOEXEC)
            .context("cannot create the notification pipe")?;
        Ok(Self {
            reader: File::from(read_end),
            writer: write_end,
        })
    }

    /// A fresh handle over the write end, ready to wire into a child's
    /// standard streams.
    pub fn writer_stdio(&self) -> Result<Stdio> {
        let clone = self
            .writer
            .try_clone()
            .context("cannot clone the notification pipe")?;
        Ok(Stdio::from(File::from(clone)))
    }

    /// Copy every byte currently buffered in the channel to `out` and
    /// return; an empty channel returns immediately.
    pub fn drain(&mut self, out: &mut dyn Write) -> Result<()> {
        let mut buf = [0u8; 2048];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => out.write_all(&buf[..n])?,
                Err(err) if err.kind() == ErrorKind::WouldBlock => break,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err).context("cannot read the notification pipe"),
            }
        }
        out.flush()?;
        Ok(())
    }
}

/// Everything the interpreter keeps between loop iterations.
///
/// A single `Session` value is threaded by `&mut` through the dispatcher
/// and the supervisor; there are no ambient globals and no locks, the main
/// loop is the only mutator.
pub struct Session {
    /// Termination status of the most recent foreground command.
    pub last_status: LastStatus,
    /// Background children not yet reaped.
    pub registry: BackgroundRegistry,
    /// Carries background output past the prompt.
    pub notifications: NotificationChannel,
    /// Set by `exit`; the driving loop stops once it is true.
    pub should_exit: bool,
}

impl Session {
    pub fn new() -> Result<Self> {
        Ok(Self {
            last_status: LastStatus::default(),
            registry: BackgroundRegistry::new(),
            notifications: NotificationChannel::new()?,
            should_exit: false,
        })
    }

    /// Dispatch one raw input line.
    ///
    /// Blank and comment lines do nothing. Parse failures and builtin
    /// failures are reported on one line and leave the session usable;
    /// the only error that escapes is a wait anomaly on a foreground
    /// child, which is fatal to the interpreter.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> Result<()> {
        let command = match parser::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(err) => {
                eprintln!("minish: {err}");
                return Ok(());
            }
        };

        if builtin::try_builtin(&command, self, out)? == builtin::Dispatch::Handled {
            return Ok(());
        }
        supervisor::run(&command, self, out)
    }

    /// Forward any buffered background output to `out`.
    pub fn drain_notifications(&mut self, out: &mut dyn Write) -> Result<()> {
        self.notifications.drain(out)
    }
}
