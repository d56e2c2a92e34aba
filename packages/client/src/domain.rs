//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// A line of user input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Plain text, sent to everyone
    Public(String),
    /// `/msg <name> <text>`
    Private { to: String, text: String },
    /// `/nick <new name>`
    Rename(String),
    /// `/who`
    Who,
    /// `/quit`
    Quit,
    /// A command that could not be interpreted, with a usage hint
    Usage(&'static str),
}

pub const MSG_USAGE: &str = "usage: /msg <name> <text>";
pub const NICK_USAGE: &str = "usage: /nick <new name>";
pub const HELP: &str = "commands: /msg <name> <text>, /nick <new name>, /who, /quit";

/// Interpret one line of input.
///
/// Returns `None` for blank lines.
pub fn parse_input(line: &str) -> Option<ClientCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix('/') else {
        return Some(ClientCommand::Public(line.to_string()));
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    let parsed = match name {
        "msg" => match rest.split_once(char::is_whitespace) {
            Some((to, text)) if !text.trim().is_empty() => ClientCommand::Private {
                to: to.to_string(),
                text: text.trim().to_string(),
            },
            _ => ClientCommand::Usage(MSG_USAGE),
        },
        "nick" if !rest.is_empty() => ClientCommand::Rename(rest.to_string()),
        "nick" => ClientCommand::Usage(NICK_USAGE),
        "who" => ClientCommand::Who,
        "quit" | "exit" => ClientCommand::Quit,
        _ => ClientCommand::Usage(HELP),
    };
    Some(parsed)
}

/// Check if the client should exit immediately based on the error type.
///
/// # Arguments
///
/// * `error` - The client error to check
///
/// # Returns
///
/// `true` if the error requires immediate exit (e.g., NameRejected),
/// `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::NameRejected(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
///
/// # Returns
///
/// `true` if reconnection should be attempted, `false` otherwise
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
