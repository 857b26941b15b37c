//! Built-in commands for the interactive chat session
//!
//! A line is a command only when the whole line equals a command word,
//! ignoring case. Nothing is trimmed: `"exit "` is an ordinary query.

/// What a line of input asks the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand<'a> {
    /// End the session
    Exit,

    /// Print the transcript
    History,

    /// Delete the transcript
    ClearHistory,

    /// Forward the line to the provider as a chat query
    Query(&'a str),
}

/// Classify one line of input
///
/// # Examples
///
/// ```
/// use termchat::commands::session_commands::{parse_session_command, SessionCommand};
///
/// assert_eq!(parse_session_command("EXIT"), SessionCommand::Exit);
/// assert_eq!(parse_session_command("Clear History"), SessionCommand::ClearHistory);
/// assert_eq!(parse_session_command("exit "), SessionCommand::Query("exit "));
/// assert_eq!(parse_session_command(""), SessionCommand::Query(""));
/// ```
pub fn parse_session_command(input: &str) -> SessionCommand<'_> {
    match input.to_lowercase().as_str() {
        "exit" => SessionCommand::Exit,
        "history" => SessionCommand::History,
        "clear history" => SessionCommand::ClearHistory,
        _ => SessionCommand::Query(input),
    }
}
