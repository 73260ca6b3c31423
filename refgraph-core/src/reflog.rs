use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum whitespace-separated header fields: old id, new id, at least one
/// author token, epoch seconds, timezone offset.
const MIN_HEADER_FIELDS: usize = 5;

/// One parsed reflog line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Id of the ref state the entry replaced
    pub parent_id: String,
    /// Id the ref was moved to
    pub id: String,
    /// Author name
    pub user: String,
    /// Author email, if present
    pub email: String,
    /// Epoch seconds
    pub timestamp: i64,
    /// Entry message, `"<kind>: <detail>"`
    pub message: String,
}

/// Ways a reflog line can be malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing tab separator before message")]
    MissingMessage,
    #[error("header has {found} fields, expected at least 5")]
    TruncatedHeader { found: usize },
    #[error("invalid epoch timestamp {value:?}")]
    BadTimestamp { value: String },
}

/// Parse one reflog line:
/// `<old> <new> <author> <<email>> <epoch> <tz>\t<message>`.
///
/// The author identity may span several tokens; epoch and timezone are the
/// last two header fields.
pub fn parse_line(line: &str) -> Result<EventRecord, ParseError> {
    let (header, message) = line.split_once('\t').ok_or(ParseError::MissingMessage)?;
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() < MIN_HEADER_FIELDS {
        return Err(ParseError::TruncatedHeader {
            found: fields.len(),
        });
    }

    let epoch = fields[fields.len() - 2];
    let timestamp = epoch.parse::<i64>().map_err(|_| ParseError::BadTimestamp {
        value: epoch.to_string(),
    })?;

    let identity = fields[2..fields.len() - 2].join(" ");
    let (user, email) = split_identity(&identity);

    Ok(EventRecord {
        parent_id: fields[0].to_string(),
        id: fields[1].to_string(),
        user,
        email,
        timestamp,
        message: message.trim().to_string(),
    })
}

/// Split `Name <email>` into its parts; either side may be absent.
fn split_identity(identity: &str) -> (String, String) {
    match identity.split_once('<') {
        Some((name, rest)) => (
            name.trim().to_string(),
            rest.trim_end().trim_end_matches('>').to_string(),
        ),
        None => (identity.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_line() {
        let record = parse_line(
            "aaa111 bbb222 Jan <jan@example.com> 1700000000 +0100\tcommit: add parser",
        )
        .unwrap();

        assert_eq!(
            record,
            EventRecord {
                parent_id: "aaa111".to_string(),
                id: "bbb222".to_string(),
                user: "Jan".to_string(),
                email: "jan@example.com".to_string(),
                timestamp: 1_700_000_000,
                message: "commit: add parser".to_string(),
            }
        );
    }

    #[test]
    fn test_multi_word_author() {
        let record = parse_line(
            "aaa bbb Jane Q. Doe <jane@example.com> 1700000000 +0000\tbranch: Created from main",
        )
        .unwrap();

        assert_eq!(record.user, "Jane Q. Doe");
        assert_eq!(record.email, "jane@example.com");
    }

    #[test]
    fn test_identity_without_email() {
        let record = parse_line("aaa bbb buildbot 1700000000 +0000\tcommit: nightly").unwrap();

        assert_eq!(record.user, "buildbot");
        assert_eq!(record.email, "");
    }

    #[test]
    fn test_missing_tab_is_rejected() {
        let err = parse_line("aaa bbb jan <j@e> 1700000000 +0000 commit: x").unwrap_err();
        assert_eq!(err, ParseError::MissingMessage);
    }

    #[test]
    fn test_truncated_header_is_rejected() {
        let err = parse_line("aaa bbb\tcommit: x").unwrap_err();
        assert_eq!(err, ParseError::TruncatedHeader { found: 2 });
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let err = parse_line("aaa bbb jan <j@e> notanumber +0000\tcommit: x").unwrap_err();
        assert_eq!(
            err,
            ParseError::BadTimestamp {
                value: "notanumber".to_string()
            }
        );
    }

    #[test]
    fn test_message_is_trimmed() {
        let record =
            parse_line("aaa bbb jan <j@e> 1700000000 +0000\tcommit: trailing  \n").unwrap();
        assert_eq!(record.message, "commit: trailing");
    }
}
