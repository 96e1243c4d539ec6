pub mod pdf;

use crate::{Error, Result};
use tracing::debug;

/// An uploaded file as received from the multipart form: filename plus raw
/// bytes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }
}

/// Assembles the request content: the base prompt followed by a labeled
/// section per uploaded PDF, in upload order. The first non-PDF file fails
/// the whole call; files after it are not processed.
pub fn assemble(prompt: &str, files: &[UploadedFile]) -> Result<String> {
    let mut content = prompt.to_string();

    for file in files {
        if !file.filename.ends_with(".pdf") {
            return Err(Error::UnsupportedFileType {
                filename: file.filename.clone(),
            });
        }

        let file_text = pdf::extract_text(&file.data)?;
        debug!(
            "Extracted {} chars of text from {}",
            file_text.len(),
            file.filename
        );
        content.push_str(&format!(
            "\n\nContent from {}:\n{}",
            file.filename, file_text
        ));
    }

    Ok(content)
}
