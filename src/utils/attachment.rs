//! Argument checks for attachment uploads.

use base64::Engine;

use crate::error::RequestError;

/// Returns true when `file_name` ends in an extension.
///
/// An extension is a `.` followed by at least one character, after the last
/// path separator. A leading dot counts, so `.gitignore` has an extension
/// while `notes.` does not.
///
/// # Example
///
/// ```
/// use wit_gateway::utils::has_extension;
///
/// assert!(has_extension("report.pdf"));
/// assert!(!has_extension("README"));
/// ```
pub fn has_extension(file_name: &str) -> bool {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    match base.rfind('.') {
        Some(idx) => idx + 1 < base.len(),
        None => false,
    }
}

/// Fails with [`RequestError::MissingExtension`] unless `file_name` has an extension.
pub fn require_extension(file_name: &str) -> Result<(), RequestError> {
    if has_extension(file_name) {
        Ok(())
    } else {
        Err(RequestError::MissingExtension {
            parameter: "fileName",
            file_name: file_name.to_string(),
        })
    }
}

/// Decodes standard, padded base64 attachment content.
pub fn decode_base64(content: &str) -> Result<Vec<u8>, RequestError> {
    base64::engine::general_purpose::STANDARD
        .decode(content.trim())
        .map_err(|e| RequestError::InvalidBase64 {
            message: e.to_string(),
        })
}
