use crate::document::RawDocument;
use crate::error::{IngestError, Result};
use crate::extract::{self, IMAGE_URL_CAPACITY, NAME_CAPACITY};

pub const NAME_KEY: &str = "nome";
pub const IMAGE_URL_KEY: &str = "imagem_url";

/// The two fields a custom game needs before it can be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub name: String,
    pub image_url: String,
}

impl GameRecord {
    /// Extracts both fields and drops the document. Either field empty or
    /// missing is `InvalidData`.
    pub fn from_document(document: RawDocument) -> Result<Self> {
        let text = document.text();
        let name = extract::extract_bounded(text, NAME_KEY, NAME_CAPACITY);
        let image_url = extract::extract_bounded(text, IMAGE_URL_KEY, IMAGE_URL_CAPACITY);
        drop(document);

        if name.is_empty() || image_url.is_empty() {
            return Err(IngestError::InvalidData);
        }

        Ok(Self { name, image_url })
    }
}
