//! Shell command parsing.
//!
//! Slash commands drive session actions; any other non-empty line is a
//! question about the loaded document.

use std::path::PathBuf;

/// Result of parsing one line of shell input.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellInput {
    /// Load (or re-load) a PDF document.
    Open(PathBuf),
    /// Show the extracted text.
    Text,
    /// Show the recent question/answer history.
    History,
    /// Show command help.
    Help,
    /// End the session.
    Quit,
    /// A question for the QA model.
    Question(String),
    /// Blank input.
    Empty,
    /// A slash command we don't recognize.
    Unknown(String),
}

/// Parse one line of user input.
pub fn parse_input(line: &str) -> ShellInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ShellInput::Empty;
    }

    let Some(rest) = trimmed.strip_prefix('/') else {
        return ShellInput::Question(trimmed.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match name.as_str() {
        "open" | "load" if !arg.is_empty() => ShellInput::Open(PathBuf::from(arg)),
        "open" | "load" => ShellInput::Unknown("/open requires a file path".to_string()),
        "text" => ShellInput::Text,
        "history" => ShellInput::History,
        "help" => ShellInput::Help,
        "quit" | "exit" => ShellInput::Quit,
        other => ShellInput::Unknown(format!("unrecognized command /{other}")),
    }
}

/// Help text listing the available commands.
pub fn help_text() -> &'static str {
    "Commands:\n\
     \x20 /open <file.pdf>   load a PDF document\n\
     \x20 /text              show the extracted text\n\
     \x20 /history           show recent questions and answers\n\
     \x20 /help              show this help\n\
     \x20 /quit              end the session\n\
     Any other input is treated as a question about the document."
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            parse_input("What color is the sky?"),
            ShellInput::Question("What color is the sky?".to_string())
        );
    }

    #[test]
    fn test_blank_is_empty() {
        assert_eq!(parse_input(""), ShellInput::Empty);
        assert_eq!(parse_input("   "), ShellInput::Empty);
    }

    #[test]
    fn test_open_with_path() {
        assert_eq!(
            parse_input("/open notes.pdf"),
            ShellInput::Open(PathBuf::from("notes.pdf"))
        );
        assert_eq!(
            parse_input("/load  dir/report.pdf "),
            ShellInput::Open(PathBuf::from("dir/report.pdf"))
        );
    }

    #[test]
    fn test_open_without_path_is_unknown() {
        assert!(matches!(parse_input("/open"), ShellInput::Unknown(_)));
    }

    #[test]
    fn test_commands_case_insensitive() {
        assert_eq!(parse_input("/History"), ShellInput::History);
        assert_eq!(parse_input("/QUIT"), ShellInput::Quit);
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(parse_input("/frobnicate"), ShellInput::Unknown(_)));
    }
}
