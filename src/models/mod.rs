//! Catalog domain objects.
//!
//! Repositories map persisted rows into these types and services hand them
//! to the API unchanged. The `*Input` types are the validated write payloads.

pub mod account;
pub mod author;
pub mod book;
pub mod game;
pub mod genre;
pub mod movie;
pub mod music;
pub mod picture;
pub mod program;
pub mod register;
pub mod show;
pub mod statistics;

/// Splits a comma separated column into codes.
#[must_use]
pub fn split_codes(column: &str) -> Vec<String> {
    column
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Joins codes into a comma separated column.
#[must_use]
pub fn join_codes(codes: &[String]) -> String {
    codes.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        let codes = vec!["CZ".to_string(), "EN".to_string()];
        assert_eq!(join_codes(&codes), "CZ,EN");
        assert_eq!(split_codes("CZ,EN"), codes);
    }

    #[test]
    fn empty_column_has_no_codes() {
        assert!(split_codes("").is_empty());
        assert!(split_codes(" , ").is_empty());
    }
}
