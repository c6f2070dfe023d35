use super::author::Author;
use super::genre::Genre;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: i32,
    pub czech_name: String,
    pub original_name: String,
    pub issue_year: Option<i32>,
    pub note: Option<String>,
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookInput {
    pub czech_name: String,
    pub original_name: String,
    #[serde(default)]
    pub issue_year: Option<i32>,
    #[serde(default)]
    pub note: Option<String>,
    pub authors: Vec<i32>,
    pub genres: Vec<i32>,
}
