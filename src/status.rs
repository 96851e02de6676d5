//! The recorded outcome of the most recent foreground command.

use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// Raw termination status, keeping "terminated by signal N" distinct from
/// "exited with code N".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastStatus {
    Exited(i32),
    Signaled(i32),
}

impl Default for LastStatus {
    fn default() -> Self {
        LastStatus::Exited(0)
    }
}

impl From<ExitStatus> for LastStatus {
    fn from(status: ExitStatus) -> Self {
        match status.signal() {
            Some(signal) => LastStatus::Signaled(signal),
            None => LastStatus::Exited(status.code().unwrap_or(1)),
        }
    }
}

impl fmt::Display for LastStatus {
    /// The one rendering used by `status`, background-completion notices
    /// and the signal notice. Every nonzero exit code renders as 1.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastStatus::Signaled(signal) => write!(f, "received signal: {signal}"),
            LastStatus::Exited(0) => write!(f, "exit value 0"),
            LastStatus::Exited(_) => write!(f, "exit value 1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_rendering() {
        assert_eq!(LastStatus::Signaled(2).to_string(), "received signal: 2");
        assert_eq!(LastStatus::Signaled(15).to_string(), "received signal: 15");
    }

    #[test]
    fn test_zero_exit_rendering() {
        assert_eq!(LastStatus::Exited(0).to_string(), "exit value 0");
    }

    #[test]
    fn test_every_nonzero_exit_renders_as_one() {
        assert_eq!(LastStatus::Exited(1).to_string(), "exit value 1");
        assert_eq!(LastStatus::Exited(5).to_string(), "exit value 1");
        assert_eq!(LastStatus::Exited(127).to_string(), "exit value 1");
    }

    #[test]
    fn test_default_is_clean_exit() {
        assert_eq!(LastStatus::default(), LastStatus::Exited(0));
    }

    #[test]
    fn test_decodes_a_real_exit_status() {
        let status = std::process::Command::new("/bin/sh")
            .args(["-c", "exit 5"])
            .status()
            .expect("sh should run");
        assert_eq!(LastStatus::from(status), LastStatus::Exited(5));
    }
}
