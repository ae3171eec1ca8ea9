use crate::constants::MIN_COMMAND_LENGTH;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("command line too short: {0:?}")]
    TooShort(String),
}

/// A single parsed control line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: String,
    pub argument: String,
}

/// Splits a control line (CR/LF already stripped) into verb and argument.
///
/// The verb keeps the case it was sent with.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    if line.chars().count() < MIN_COMMAND_LENGTH {
        return Err(CommandError::TooShort(line.to_string()));
    }

    let (verb, argument) = match line.trim_start().split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line.trim(), ""),
    };

    Ok(Command {
        verb: verb.to_string(),
        argument: argument.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_and_argument() {
        let cmd = parse_command("USER alice").unwrap();
        assert_eq!(cmd.verb, "USER");
        assert_eq!(cmd.argument, "alice");
    }

    #[test]
    fn test_surrounding_whitespace_is_stripped() {
        let cmd = parse_command("STOR    my file.txt  ").unwrap();
        assert_eq!(cmd.verb, "STOR");
        assert_eq!(cmd.argument, "my file.txt");

        let cmd = parse_command("  PWD").unwrap();
        assert_eq!(cmd.verb, "PWD");
        assert_eq!(cmd.argument, "");
    }

    #[test]
    fn test_no_argument() {
        let cmd = parse_command("NOOP").unwrap();
        assert_eq!(cmd.verb, "NOOP");
        assert!(cmd.argument.is_empty());
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(parse_command("noop").unwrap().verb, "noop");
    }

    #[test]
    fn test_short_lines_are_rejected() {
        assert!(parse_command("").is_err());
        assert!(parse_command("CD").is_err());
        assert_eq!(
            parse_command("ab"),
            Err(CommandError::TooShort("ab".to_string()))
        );
    }
}
