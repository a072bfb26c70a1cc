use crate::error::{CommandError, CommandResult};

/// Splits a command line into borrowed `(prefix, data)` views.
///
/// Tokenizing rules:
/// - Delimiters before the prefix are skipped.
/// - The prefix runs up to the next delimiter.
/// - A run of consecutive delimiters after the prefix counts as one boundary.
/// - Data is the whole remainder after that run, minus leading spaces. Later
///   delimiters stay inside the data.
///
/// An empty data view is returned when the boundary is followed only by
/// spaces; rejecting that case is left to [`CommandParser`](crate::CommandParser).
pub fn split_command(line: &str, delimiter: char) -> CommandResult<(&str, &str)> {
    if line.is_empty() {
        return Err(CommandError::EmptyInput);
    }

    let start = line.trim_start_matches(delimiter);
    if start.is_empty() {
        return Err(CommandError::MissingPrefix);
    }

    let Some(end) = start.find(delimiter) else {
        return Err(CommandError::MissingDelimiter { delimiter });
    };

    let prefix = &start[..end];
    let rest = start[end..].trim_start_matches(delimiter);
    Ok((prefix, trim_leading_spaces(rest)))
}

/// Narrows a view past its leading `' '` characters.
///
/// Only the space character is skipped; tabs and other whitespace are kept.
pub fn trim_leading_spaces(s: &str) -> &str {
    s.trim_start_matches(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        assert_eq!(split_command("engine:10,20", ':'), Ok(("engine", "10,20")));
    }

    #[test]
    fn test_split_trims_leading_spaces() {
        for spaces in 0..5 {
            let line = format!("gps:{}47.1,7.3", " ".repeat(spaces));
            assert_eq!(split_command(&line, ':'), Ok(("gps", "47.1,7.3")));
        }
    }

    #[test]
    fn test_split_collapses_delimiter_run() {
        assert_eq!(split_command("cmd::value", ':'), Ok(("cmd", "value")));
        assert_eq!(split_command("cmd:::: value", ':'), Ok(("cmd", "value")));
    }

    #[test]
    fn test_split_keeps_later_delimiters() {
        assert_eq!(
            split_command("SET speed 42", ' '),
            Ok(("SET", "speed 42"))
        );
        assert_eq!(split_command("time:12:30:00", ':'), Ok(("time", "12:30:00")));
    }

    #[test]
    fn test_split_space_then_delimiter_in_data() {
        assert_eq!(split_command("cmd: :x", ':'), Ok(("cmd", ":x")));
    }

    #[test]
    fn test_split_skips_leading_delimiters() {
        assert_eq!(split_command("::heading:90", ':'), Ok(("heading", "90")));
    }

    #[test]
    fn test_split_does_not_trim_tabs() {
        assert_eq!(split_command("cmd:\tvalue", ':'), Ok(("cmd", "\tvalue")));
    }

    #[test]
    fn test_split_keeps_trailing_characters() {
        assert_eq!(split_command("cmd: value \r", ':'), Ok(("cmd", "value \r")));
    }

    #[test]
    fn test_split_empty_input() {
        assert_eq!(split_command("", ':'), Err(CommandError::EmptyInput));
    }

    #[test]
    fn test_split_only_delimiters() {
        assert_eq!(split_command(":::", ':'), Err(CommandError::MissingPrefix));
    }

    #[test]
    fn test_split_missing_delimiter() {
        assert_eq!(
            split_command("hello", ' '),
            Err(CommandError::MissingDelimiter { delimiter: ' ' })
        );
        assert_eq!(
            split_command(":hello", ':'),
            Err(CommandError::MissingDelimiter { delimiter: ':' })
        );
    }

    #[test]
    fn test_split_trailing_delimiter_gives_empty_data() {
        assert_eq!(split_command("cmd ", ' '), Ok(("cmd", "")));
        assert_eq!(split_command("cmd:   ", ':'), Ok(("cmd", "")));
    }

    #[test]
    fn test_trim_leading_spaces() {
        assert_eq!(trim_leading_spaces("   a b "), "a b ");
        assert_eq!(trim_leading_spaces("    "), "");
        assert_eq!(trim_leading_spaces(""), "");
    }
}
