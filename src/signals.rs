//! Interrupt/terminate handling for the interpreter process itself.
//!
//! The handler only stores the signal number; the main loop picks the
//! record up at a well-defined point, the start of each iteration, and does
//! the formatted reporting there. Handled signals revert to their default
//! disposition across `exec`, so a blocked foreground child still dies from
//! a Ctrl-C of its own.

use anyhow::{Context, Result};
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};
use std::os::raw::c_int;
use std::sync::atomic::{AtomicI32, Ordering};

static PENDING: AtomicI32 = AtomicI32::new(0);

extern "C" fn record(signal: c_int) {
    PENDING.store(signal, Ordering::SeqCst);
}

/// Install the recording handler for SIGINT and SIGTERM.
///
/// `SA_RESTART` keeps a foreground wait in progress; the record is acted on
/// once the wait finishes.
pub fn install() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(record),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    for signal in [Signal::SIGINT, Signal::SIGTERM] {
        unsafe { sigaction(signal, &action) }
            .with_context(|| format!("cannot install the {signal} handler"))?;
    }
    Ok(())
}

/// Take the most recently recorded signal number, clearing the record.
pub fn take_pending() -> Option<i32> {
    match PENDING.swap(0, Ordering::SeqCst) {
        0 => None,
        signal => Some(signal),
    }
}
