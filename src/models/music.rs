use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Music {
    pub id: i32,
    pub name: String,
    pub media_count: i32,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MusicInput {
    pub name: String,
    pub media_count: i32,
    #[serde(default)]
    pub note: Option<String>,
}
