//! Client-side limits of the creative direction step
//!
//! Everything here is checked before any network call. A rejected
//! selection never reaches the upload endpoint.

use thiserror::Error;

/// Maximum length of the vision text, in characters
pub const MAX_VISION_LENGTH: usize = 1400;

/// Maximum number of uploaded files per session
pub const MAX_FILES: usize = 5;

/// Maximum size of a single file (2 GiB)
pub const MAX_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Allowed file extensions, lowercase, without the dot
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "pdf", "doc", "docx", "psd", "ai", "eps",
];

/// Value of the `accept` attribute for the file input
pub fn accept_attribute() -> String {
    ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("\"{filename}\" has an unsupported file type. Allowed types: {allowed}")]
    UnsupportedExtension { filename: String, allowed: String },

    #[error("\"{filename}\" is too large. Maximum file size is 2 GB")]
    FileTooLarge { filename: String, size: u64 },

    #[error("You can upload up to {max} files")]
    TooManyFiles { max: usize },

    #[error("Creative vision must be {max} characters or less")]
    VisionTooLong { max: usize },
}

/// Lowercased extension of a file name, if it has one
pub fn file_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn is_allowed_extension(filename: &str) -> bool {
    file_extension(filename)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Validate a single file by name and size
pub fn validate_file(filename: &str, size: u64) -> Result<(), ValidationError> {
    if !is_allowed_extension(filename) {
        return Err(ValidationError::UnsupportedExtension {
            filename: filename.to_string(),
            allowed: ALLOWED_EXTENSIONS.join(", "),
        });
    }
    if size > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::FileTooLarge {
            filename: filename.to_string(),
            size,
        });
    }
    Ok(())
}

/// Validate a whole selection against what is already attached.
///
/// `existing` counts uploaded files plus uploads still in flight. The first
/// error rejects the whole selection.
pub fn validate_selection<'a, I>(existing: usize, files: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let files: Vec<(&str, u64)> = files.into_iter().collect();
    if existing + files.len() > MAX_FILES {
        return Err(ValidationError::TooManyFiles { max: MAX_FILES });
    }
    for (name, size) in files {
        validate_file(name, size)?;
    }
    Ok(())
}

pub fn validate_vision(text: &str) -> Result<(), ValidationError> {
    if text.chars().count() > MAX_VISION_LENGTH {
        return Err(ValidationError::VisionTooLong {
            max: MAX_VISION_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIB: u64 = 1024 * 1024 * 1024;

    #[test]
    fn test_executable_rejected() {
        let err = validate_file("logo.exe", 1024).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedExtension { .. }));
    }

    #[test]
    fn test_oversized_png_rejected() {
        let err = validate_file("logo.png", 3 * GIB).unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { .. }));
    }

    #[test]
    fn test_exact_limit_accepted() {
        assert!(validate_file("brief.pdf", MAX_FILE_SIZE_BYTES).is_ok());
    }

    #[test]
    fn test_extension_case_insensitive() {
        assert!(validate_file("Moodboard.PNG", 10).is_ok());
        assert!(validate_file("cover.Jpeg", 10).is_ok());
    }

    #[test]
    fn test_missing_extension() {
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension(".png"), None);
        assert!(validate_file("README", 10).is_err());
    }

    #[test]
    fn test_sixth_file_rejected() {
        let err = validate_selection(5, [("extra.png", 100)]).unwrap_err();
        assert_eq!(err, ValidationError::TooManyFiles { max: 5 });
    }

    #[test]
    fn test_selection_rejected_by_single_bad_file() {
        let result = validate_selection(0, [("a.png", 10), ("b.exe", 10), ("c.pdf", 10)]);
        assert!(matches!(
            result,
            Err(ValidationError::UnsupportedExtension { ref filename, .. }) if filename == "b.exe"
        ));
    }

    #[test]
    fn test_selection_fills_up_to_limit() {
        assert!(validate_selection(3, [("a.png", 10), ("b.ai", 10)]).is_ok());
    }

    #[test]
    fn test_vision_length_counts_chars() {
        let exact = "é".repeat(MAX_VISION_LENGTH);
        assert!(validate_vision(&exact).is_ok());
        let over = "a".repeat(MAX_VISION_LENGTH + 1);
        assert!(validate_vision(&over).is_err());
    }

    #[test]
    fn test_accept_attribute() {
        let accept = accept_attribute();
        assert!(accept.starts_with(".jpg,.jpeg"));
        assert!(accept.ends_with(".eps"));
    }
}
