use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub id: i32,
    pub content: Vec<u8>,
}

/// Request body of a picture write: content travels base64 encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PictureData {
    pub content: String,
}

impl PictureData {
    /// Decodes the payload, `None` when it is not valid base64.
    #[must_use]
    pub fn decode(&self) -> Option<Vec<u8>> {
        STANDARD.decode(self.content.trim()).ok()
    }
}

/// Response form of a stored picture.
#[derive(Debug, Clone, Serialize)]
pub struct EncodedPicture {
    pub id: i32,
    pub content: String,
}

impl From<Picture> for EncodedPicture {
    fn from(picture: Picture) -> Self {
        Self {
            id: picture.id,
            content: STANDARD.encode(&picture.content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_standard_base64() {
        let data = PictureData {
            content: "iVBORw0KGgo=".to_string(),
        };
        assert_eq!(data.decode().unwrap()[..4], [0x89, b'P', b'N', b'G']);

        let bad = PictureData {
            content: "not base64!".to_string(),
        };
        assert!(bad.decode().is_none());
    }

    #[test]
    fn encodes_for_responses() {
        let picture = Picture {
            id: 3,
            content: vec![1, 2, 3],
        };
        let encoded = EncodedPicture::from(picture);
        assert_eq!(encoded.content, "AQID");
    }
}
