use serde::Serialize;

/// Known lookup registers.
pub const REGISTERS: [&str; 3] = ["languages", "subtitles", "formats"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterItem {
    pub code: String,
    pub name: String,
}
