use anyhow::Result;
use minish::{LastStatus, Session, signals};
use nix::sys::signal::Signal;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, Write};

/// The read-prompt-print loop.
///
/// Each iteration: act on a recorded signal, reap finished background
/// children, relay any buffered background output, then read and dispatch
/// one line. The loop only blocks while reading input or waiting on a
/// foreground child.
fn main() -> Result<()> {
    signals::install()?;
    let mut session = Session::new()?;
    let mut editor = DefaultEditor::new()?;
    let mut out = io::stdout();

    loop {
        if let Some(signal) = signals::take_pending() {
            let status = LastStatus::Signaled(signal);
            println!("{status}");
            session.last_status = status;
        }

        for done in session.registry.reap_scan() {
            println!("Background pid {} is done: {}", done.pid, done.status);
        }
        session.drain_notifications(&mut out)?;
        out.flush()?;

        match editor.readline(": ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }
                session.execute_line(&line, &mut out)?;
                if session.should_exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                let status = LastStatus::Signaled(Signal::SIGINT as i32);
                println!("{status}");
                session.last_status = status;
            }
            Err(ReadlineError::Eof) => {
                for (pid, err) in session.registry.terminate_all() {
                    eprintln!("minish: cannot terminate background pid {pid}: {err}");
                }
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
