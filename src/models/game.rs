use crate::domain::positional::OrderedChild;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    pub id: i32,
    pub name: String,
    pub media_count: i32,
    pub format: String,
    pub crack: bool,
    pub serial_key: bool,
    pub patch: bool,
    pub note: Option<String>,
    pub picture: Option<i32>,
    pub has_cheat: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameInput {
    pub name: String,
    pub media_count: i32,
    pub format: String,
    #[serde(default)]
    pub crack: bool,
    #[serde(default)]
    pub serial_key: bool,
    #[serde(default)]
    pub patch: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub picture: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cheat {
    pub id: i32,
    pub game_setting: Option<String>,
    pub cheat_setting: Option<String>,
    pub data: Vec<CheatDatum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheatInput {
    #[serde(default)]
    pub game_setting: Option<String>,
    #[serde(default)]
    pub cheat_setting: Option<String>,
    pub data: Vec<CheatDatumInput>,
}

/// One cheat entry, ordered by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheatDatum {
    pub id: Option<i32>,
    pub position: i32,
    pub action: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheatDatumInput {
    pub action: String,
    pub description: String,
}

impl OrderedChild for CheatDatum {
    type Value = CheatDatumInput;

    fn create(position: i32, value: CheatDatumInput) -> Self {
        Self {
            id: None,
            position,
            action: value.action,
            description: value.description,
        }
    }

    fn apply(&mut self, position: i32, value: CheatDatumInput) {
        self.position = position;
        self.action = value.action;
        self.description = value.description;
    }
}
