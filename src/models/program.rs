use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub id: i32,
    pub name: String,
    pub media_count: i32,
    pub format: String,
    pub crack: bool,
    pub serial_key: bool,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramInput {
    pub name: String,
    pub media_count: i32,
    pub format: String,
    #[serde(default)]
    pub crack: bool,
    #[serde(default)]
    pub serial_key: bool,
    #[serde(default)]
    pub note: Option<String>,
}
