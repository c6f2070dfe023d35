use super::genre::Genre;
use crate::domain::positional::OrderedChild;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Show {
    pub id: i32,
    pub czech_name: String,
    pub original_name: String,
    pub imdb_code: Option<String>,
    pub note: Option<String>,
    pub picture: Option<i32>,
    pub genres: Vec<Genre>,
    pub seasons_count: u64,
    pub episodes_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShowInput {
    pub czech_name: String,
    pub original_name: String,
    #[serde(default)]
    pub imdb_code: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub picture: Option<i32>,
    pub genres: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Season {
    pub id: i32,
    pub show_id: i32,
    pub position: i32,
    pub number: i32,
    pub start_year: i32,
    pub end_year: i32,
    pub language: String,
    pub subtitles: Vec<String>,
    pub note: Option<String>,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonInput {
    pub number: i32,
    pub start_year: i32,
    pub end_year: i32,
    pub language: String,
    #[serde(default)]
    pub subtitles: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub episodes: Vec<EpisodeInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    pub id: Option<i32>,
    pub position: i32,
    pub number: i32,
    pub name: String,
    pub length: i32,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EpisodeInput {
    pub number: i32,
    pub name: String,
    pub length: i32,
    #[serde(default)]
    pub note: Option<String>,
}

impl OrderedChild for Episode {
    type Value = EpisodeInput;

    fn create(position: i32, value: EpisodeInput) -> Self {
        Self {
            id: None,
            position,
            number: value.number,
            name: value.name,
            length: value.length,
            note: value.note,
        }
    }

    fn apply(&mut self, position: i32, value: EpisodeInput) {
        self.position = position;
        self.number = value.number;
        self.name = value.name;
        self.length = value.length;
        self.note = value.note;
    }
}
