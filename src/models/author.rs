use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorInput {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
}

impl AuthorInput {
    /// Text the collation key is built from: last name first.
    #[must_use]
    pub fn sort_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}
