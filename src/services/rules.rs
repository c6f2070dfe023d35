//! Field rules and reference checks applied before catalog writes.

use crate::db::Store;
use crate::services::CatalogError;
use chrono::Datelike;
use regex::Regex;
use std::sync::OnceLock;

pub const LANGUAGES: &str = "languages";
pub const SUBTITLES: &str = "subtitles";
pub const FORMATS: &str = "formats";

/// Earliest release year accepted for movies and seasons.
pub const MIN_YEAR: i32 = 1930;

pub fn require_text(field: &str, value: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::validation(format!("{field} must not be blank")));
    }
    Ok(())
}

/// Optional text may be absent but must not be blank when present.
pub fn optional_text(field: &str, value: Option<&str>) -> Result<(), CatalogError> {
    value.map_or(Ok(()), |v| require_text(field, v))
}

pub fn require_positive(field: &str, value: i32) -> Result<(), CatalogError> {
    if value <= 0 {
        return Err(CatalogError::validation(format!(
            "{field} must be a positive number, got {value}"
        )));
    }
    Ok(())
}

pub fn validate_year(field: &str, year: i32) -> Result<(), CatalogError> {
    let max = chrono::Utc::now().year() + 1;
    if !(MIN_YEAR..=max).contains(&year) {
        return Err(CatalogError::validation(format!(
            "{field} must be between {MIN_YEAR} and {max}, got {year}"
        )));
    }
    Ok(())
}

fn imdb_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^tt\d{7,8}$").expect("Invalid regex"))
}

pub fn validate_imdb_code(code: Option<&str>) -> Result<(), CatalogError> {
    match code {
        Some(code) if !imdb_regex().is_match(code) => Err(CatalogError::validation(format!(
            "IMDB code must look like tt0123456, got '{code}'"
        ))),
        _ => Ok(()),
    }
}

pub fn require_non_empty<T>(field: &str, values: &[T]) -> Result<(), CatalogError> {
    if values.is_empty() {
        return Err(CatalogError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Fails unless `code` is an item of `register`.
pub async fn ensure_code(store: &Store, register: &str, code: &str) -> Result<(), CatalogError> {
    if !store.registers().contains(register, code).await? {
        return Err(CatalogError::validation(format!(
            "Unknown {register} code: '{code}'"
        )));
    }
    Ok(())
}

pub async fn ensure_codes(
    store: &Store,
    register: &str,
    codes: &[String],
) -> Result<(), CatalogError> {
    for code in codes {
        ensure_code(store, register, code).await?;
    }
    Ok(())
}

/// Fails unless every id names an existing genre.
pub async fn ensure_genres(store: &Store, ids: &[i32]) -> Result<(), CatalogError> {
    require_non_empty("genres", ids)?;

    let found = store.genres().find_by_ids(ids).await?;
    if let Some(missing) = ids.iter().find(|id| !found.iter().any(|g| g.id == **id)) {
        return Err(CatalogError::validation(format!("Genre {missing} does not exist")));
    }
    Ok(())
}

pub async fn ensure_authors(store: &Store, ids: &[i32]) -> Result<(), CatalogError> {
    require_non_empty("authors", ids)?;

    let found = store.authors().find_by_ids(ids).await?;
    if let Some(missing) = ids.iter().find(|id| !found.iter().any(|a| a.id == **id)) {
        return Err(CatalogError::validation(format!("Author {missing} does not exist")));
    }
    Ok(())
}

pub async fn ensure_picture(store: &Store, id: Option<i32>) -> Result<(), CatalogError> {
    if let Some(id) = id
        && !store.pictures().exists(id).await?
    {
        return Err(CatalogError::validation(format!("Picture {id} does not exist")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text("name", "Alien").is_ok());
        assert!(require_text("name", "").is_err());
        assert!(require_text("name", "   ").is_err());
        assert!(optional_text("note", None).is_ok());
        assert!(optional_text("note", Some(" ")).is_err());
    }

    #[test]
    fn year_range() {
        assert!(validate_year("year", 1930).is_ok());
        assert!(validate_year("year", 1929).is_err());
        let next = chrono::Utc::now().year() + 1;
        assert!(validate_year("year", next).is_ok());
        assert!(validate_year("year", next + 1).is_err());
    }

    #[test]
    fn imdb_codes() {
        assert!(validate_imdb_code(None).is_ok());
        assert!(validate_imdb_code(Some("tt0078748")).is_ok());
        assert!(validate_imdb_code(Some("tt10872600")).is_ok());
        assert!(validate_imdb_code(Some("tt123")).is_err());
        assert!(validate_imdb_code(Some("0078748")).is_err());
    }

    #[test]
    fn positive_numbers() {
        assert!(require_positive("length", 1).is_ok());
        assert!(require_positive("length", 0).is_err());
        assert!(require_positive("length", -5).is_err());
    }
}
