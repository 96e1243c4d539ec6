use crate::{Error, Result};

/// Extracts the text layer from a PDF held fully in memory, concatenated
/// across pages with trailing whitespace trimmed. Pages without extractable
/// text contribute nothing. No OCR, no image or table extraction.
pub fn extract_text(pdf_content: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(pdf_content)
        .map_err(|e| Error::pdf_parse(e.to_string()))?;
    Ok(text.trim_end().to_string())
}
