use super::genre::Genre;
use crate::domain::positional::OrderedChild;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub id: i32,
    pub czech_name: String,
    pub original_name: String,
    pub year: i32,
    pub language: String,
    pub subtitles: Vec<String>,
    pub media: Vec<Medium>,
    pub imdb_code: Option<String>,
    pub note: Option<String>,
    pub picture: Option<i32>,
    pub genres: Vec<Genre>,
}

impl Movie {
    /// Total length of all media in minutes.
    #[must_use]
    pub fn length(&self) -> i64 {
        self.media.iter().map(|m| i64::from(m.length)).sum()
    }
}

/// One physical medium of a movie, ordered by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Medium {
    pub id: Option<i32>,
    pub position: i32,
    pub length: i32,
}

impl OrderedChild for Medium {
    type Value = i32;

    fn create(position: i32, length: i32) -> Self {
        Self {
            id: None,
            position,
            length,
        }
    }

    fn apply(&mut self, position: i32, length: i32) {
        self.position = position;
        self.length = length;
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieInput {
    pub czech_name: String,
    pub original_name: String,
    pub year: i32,
    pub language: String,
    #[serde(default)]
    pub subtitles: Vec<String>,
    /// Media lengths in minutes, in order
    pub media: Vec<i32>,
    #[serde(default)]
    pub imdb_code: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub picture: Option<i32>,
    pub genres: Vec<i32>,
}
