use crate::error::{IngestError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Full contents of the input file, held only until the fields are extracted.
pub struct RawDocument {
    text: String,
}

impl RawDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let open_error = |source: std::io::Error| IngestError::FileOpen {
            path: path.to_path_buf(),
            source,
        };

        let bytes = {
            let mut file = File::open(path).map_err(open_error)?;
            let size = file.metadata().map_err(open_error)?.len();

            let mut bytes = Vec::new();
            bytes
                .try_reserve_exact(size as usize)
                .map_err(|source| IngestError::Allocation { size, source })?;
            file.read_to_end(&mut bytes).map_err(open_error)?;
            bytes
        };

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded JSON document");

        // Keys are ASCII, so lossy decoding never hides a match.
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };

        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
impl From<String> for RawDocument {
    fn from(text: String) -> Self {
        Self { text }
    }
}
