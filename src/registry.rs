//! Tracking of outstanding background processes.

use crate::status::LastStatus;
use std::io;
use std::process::Child;

/// One background process observed to have terminated during a
/// [`BackgroundRegistry::reap_scan`] pass.
#[derive(Debug)]
pub struct Completion {
    pub pid: u32,
    pub status: LastStatus,
}

/// Ordered collection of background children the interpreter still tracks.
///
/// Entries are scanned in insertion order. An entry is removed in the same
/// scan pass that observes its termination, so a completion is reported at
/// most once. All mutation happens from the main loop; nothing here is
/// shared across threads.
#[derive(Default)]
pub struct BackgroundRegistry {
    entries: Vec<Child>,
}

impl BackgroundRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Start tracking a freshly launched background child.
    pub fn insert(&mut self, child: Child) {
        self.entries.push(child);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One non-blocking pass over the tracked children.
    ///
    /// Children that have terminated are collected into the returned list
    /// and dropped from the registry; the rest stay tracked. Never blocks,
    /// however many live children remain, and is safe to call on an empty
    /// registry.
    pub fn reap_scan(&mut self) -> Vec<Completion> {
        let mut completed = Vec::new();
        let mut survivors = Vec::with_capacity(self.entries.len());
        for mut child in self.entries.drain(..) {
            match child.try_wait() {
                Ok(Some(status)) => completed.push(Completion {
                    pid: child.id(),
                    status: status.into(),
                }),
                Ok(None) => survivors.push(child),
                // The handle is unusable; nothing more can be learned
                // about this child, so stop tracking it.
                Err(_) => {}
            }
        }
        self.entries = survivors;
        completed
    }

    /// Send a forced-termination signal to every tracked child.
    ///
    /// Does not wait for any of them; the next reap pass collects the
    /// corpses. Delivery failures are returned with the child's pid so the
    /// caller can report them.
    pub fn terminate_all(&mut self) -> Vec<(u32, io::Error)> {
        let mut failures = Vec::new();
        for child in &mut self.entries {
            if let Err(err) = child.kill() {
                failures.push((child.id(), err));
            }
        }
        failures
    }
}
