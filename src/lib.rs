//! A small interactive command interpreter.
//!
//! One line of input becomes one [`Command`]: a program with arguments,
//! optional `< file` / `> file` redirections and a trailing `&` background
//! marker. A handful of commands (`cd`, `status`, `echo`, `exit`) run
//! in-process; everything else is launched as a child process, waited on in
//! the foreground or tracked in a background registry that is reaped
//! non-blockingly once per loop iteration. Background output travels
//! through a non-blocking pipe so it never interleaves with the prompt.
//!
//! The crate is a library plus a thin binary: the binary owns the
//! read-prompt-print loop, the library owns everything the loop drives —
//! parsing ([`parser`]), builtin dispatch ([`builtin`]), process
//! supervision ([`supervisor`]), background tracking ([`registry`]) and
//! signal bookkeeping ([`signals`]), all stitched together by a single
//! [`Session`] value.

pub mod builtin;
pub mod command;
pub mod parser;
pub mod registry;
pub mod session;
pub mod signals;
pub mod status;
pub mod supervisor;

pub use command::Command;
pub use session::Session;
pub use status::LastStatus;
