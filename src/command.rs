/// Upper bound on the number of argument tokens a single command may carry,
/// the program name included.
pub const MAX_ARGS: usize = 512;

/// The parsed form of one input line.
///
/// A `Command` lives for exactly one dispatch cycle: the main loop parses a
/// line into it, routes it to a builtin or to the process supervisor, and
/// drops it. `arguments[0]` is always a copy of `program`, mirroring the
/// argument vector handed to an executed program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Name of the builtin or external program to run. Never empty for a
    /// command produced by the parser.
    pub program: String,
    /// Full argument vector, program name first.
    pub arguments: Vec<String>,
    /// File to read standard input from; `None` inherits the current stream.
    pub input_path: Option<String>,
    /// File to write standard output to; `None` inherits the current stream.
    pub output_path: Option<String>,
    /// Run without blocking the interpreter.
    pub background: bool,
}

impl Command {
    pub fn is_valid(&self) -> bool {
        !self.program.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_with_program_is_valid() {
        let cmd = Command {
            program: "ls".to_string(),
            arguments: vec!["ls".to_string()],
            input_path: None,
            output_path: None,
            background: false,
        };
        assert!(cmd.is_valid());
    }

    #[test]
    fn test_command_without_program_is_invalid() {
        let cmd = Command {
            program: String::new(),
            arguments: Vec::new(),
            input_path: None,
            output_path: None,
            background: false,
        };
        assert!(!cmd.is_valid());
    }
}
