//! Turns one raw input line into a [`Command`].
//!
//! The grammar is deliberately small: whitespace-delimited words with no
//! quoting or escaping, followed by optional redirections and a background
//! marker in the fixed order
//!
//! ```text
//! program [args...] [< input] [> output] [&]
//! ```
//!
//! A token that breaks that order ends recognition; everything matched up to
//! it is honored and the rest of the line is ignored.

use crate::command::{Command, MAX_ARGS};
use std::fmt;

const INPUT_REDIRECT: &str = "<";
const OUTPUT_REDIRECT: &str = ">";
const BACKGROUND_MARKER: &str = "&";
const COMMENT_MARKER: char = '#';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A redirection symbol was the last token of the line.
    MissingRedirectTarget(&'static str),
    /// The line carries more argument tokens than [`MAX_ARGS`].
    TooManyArguments(usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingRedirectTarget(symbol) => {
                write!(f, "expected a file name after `{symbol}`")
            }
            ParseError::TooManyArguments(count) => {
                write!(f, "too many arguments ({count}, the limit is {MAX_ARGS})")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a raw line into a [`Command`].
///
/// Returns `Ok(None)` for a line that holds no command at all: one that is
/// blank or whose first word starts with `#`. Such lines must never reach
/// the dispatcher, so absence is signalled rather than an empty `Command`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&first) = tokens.first() else {
        return Ok(None);
    };
    if first.starts_with(COMMENT_MARKER) {
        return Ok(None);
    }

    // The argument run ends at the first reserved token, wherever it sits.
    let mut arguments = vec![first.to_string()];
    let mut pos = 1;
    while pos < tokens.len() && !is_reserved(tokens[pos]) {
        arguments.push(tokens[pos].to_string());
        pos += 1;
    }
    if arguments.len() > MAX_ARGS {
        return Err(ParseError::TooManyArguments(arguments.len()));
    }

    let mut input_path = None;
    let mut output_path = None;
    let mut background = false;

    if pos < tokens.len() && tokens[pos] == INPUT_REDIRECT {
        input_path = Some(redirect_target(&tokens, pos, INPUT_REDIRECT)?);
        pos += 2;
    }
    if pos < tokens.len() && tokens[pos] == OUTPUT_REDIRECT {
        output_path = Some(redirect_target(&tokens, pos, OUTPUT_REDIRECT)?);
        pos += 2;
    }
    if pos < tokens.len() && tokens[pos] == BACKGROUND_MARKER {
        background = true;
    }

    Ok(Some(Command {
        program: first.to_string(),
        arguments,
        input_path,
        output_path,
        background,
    }))
}

fn is_reserved(token: &str) -> bool {
    matches!(token, INPUT_REDIRECT | OUTPUT_REDIRECT | BACKGROUND_MARKER)
}

fn redirect_target(
    tokens: &[&str],
    pos: usize,
    symbol: &'static str,
) -> Result<String, ParseError> {
    match tokens.get(pos + 1) {
        Some(&target) => Ok(target.to_string()),
        None => Err(ParseError::MissingRedirectTarget(symbol)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(line: &str) -> Command {
        parse(line)
            .expect("line should parse")
            .expect("line should hold a command")
    }

    #[test]
    fn test_blank_lines_yield_no_command() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   \t  ").unwrap(), None);
        assert_eq!(parse("\n").unwrap(), None);
    }

    #[test]
    fn test_comment_lines_yield_no_command() {
        assert_eq!(parse("# a comment").unwrap(), None);
        assert_eq!(parse("   # indented").unwrap(), None);
        assert_eq!(parse("#no-space").unwrap(), None);
    }

    #[test]
    fn test_bare_program() {
        let cmd = parsed("ls");
        assert_eq!(cmd.program, "ls");
        assert_eq!(cmd.arguments, vec!["ls"]);
        assert_eq!(cmd.input_path, None);
        assert_eq!(cmd.output_path, None);
        assert!(!cmd.background);
    }

    #[test]
    fn test_program_name_repeats_as_first_argument() {
        let cmd = parsed("echo hello world");
        assert_eq!(cmd.program, "echo");
        assert_eq!(cmd.arguments, vec!["echo", "hello", "world"]);
    }

    #[test]
    fn test_full_line_round_trip() {
        let cmd = parsed("ls -la < in.txt > out.txt &");
        assert_eq!(cmd.program, "ls");
        assert_eq!(cmd.arguments, vec!["ls", "-la"]);
        assert_eq!(cmd.input_path.as_deref(), Some("in.txt"));
        assert_eq!(cmd.output_path.as_deref(), Some("out.txt"));
        assert!(cmd.background);
    }

    #[test]
    fn test_input_redirection_alone() {
        let cmd = parsed("wc < numbers.txt");
        assert_eq!(cmd.input_path.as_deref(), Some("numbers.txt"));
        assert_eq!(cmd.output_path, None);
        assert!(!cmd.background);
    }

    #[test]
    fn test_output_redirection_alone() {
        let cmd = parsed("ls > listing.txt");
        assert_eq!(cmd.input_path, None);
        assert_eq!(cmd.output_path.as_deref(), Some("listing.txt"));
    }

    #[test]
    fn test_reserved_token_ends_the_argument_run() {
        let cmd = parsed("echo a & b");
        assert_eq!(cmd.arguments, vec!["echo", "a"]);
        assert!(cmd.background);
    }

    #[test]
    fn test_tokens_after_background_marker_are_ignored() {
        let cmd = parsed("sleep 5 & whatever comes after");
        assert_eq!(cmd.arguments, vec!["sleep", "5"]);
        assert!(cmd.background);
    }

    #[test]
    fn test_out_of_order_redirection_keeps_only_the_matched_prefix() {
        // The grammar is fixed-order: `> out` matches, the trailing
        // `< in` does not and is dropped.
        let cmd = parsed("sort > out.txt < in.txt");
        assert_eq!(cmd.output_path.as_deref(), Some("out.txt"));
        assert_eq!(cmd.input_path, None);
        assert!(!cmd.background);
    }

    #[test]
    fn test_dangling_redirect_symbol_is_an_error() {
        assert_eq!(
            parse("ls >"),
            Err(ParseError::MissingRedirectTarget(">"))
        );
        assert_eq!(
            parse("wc <"),
            Err(ParseError::MissingRedirectTarget("<"))
        );
    }

    #[test]
    fn test_argument_cap_is_enforced() {
        let longest = vec!["x"; MAX_ARGS].join(" ");
        assert!(parse(&longest).unwrap().is_some());

        let over = vec!["x"; MAX_ARGS + 1].join(" ");
        assert_eq!(parse(&over), Err(ParseError::TooManyArguments(MAX_ARGS + 1)));
    }

    #[test]
    fn test_parse_error_messages_name_the_symbol() {
        let err = parse("ls >").unwrap_err();
        assert!(err.to_string().contains('>'));
    }
}
