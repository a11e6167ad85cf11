use seek_core::FileHandle;

use super::constants::{CMD_HELP, CMD_QUIT, CMD_QUIT_SHORT, CMD_SEARCH, CMD_UPLOAD};

/// One line typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Upload(Vec<FileHandle>),
    /// Raw query text; trimming and the empty check happen in the core.
    Search(String),
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> UserCommand {
    let trimmed = line.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest),
        None => (trimmed, ""),
    };

    match head {
        CMD_UPLOAD => match shell_words::split(rest) {
            Ok(paths) => UserCommand::Upload(paths.into_iter().map(FileHandle::from_path).collect()),
            Err(err) => UserCommand::Invalid(format!("could not read file list: {err}")),
        },
        CMD_SEARCH => UserCommand::Search(rest.to_string()),
        CMD_HELP => UserCommand::Help,
        CMD_QUIT | CMD_QUIT_SHORT => UserCommand::Quit,
        other if other.starts_with(':') => UserCommand::Invalid(format!("unknown command {other}")),
        _ => UserCommand::Search(line.to_string()),
    }
}
