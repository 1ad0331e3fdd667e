//! Error types for package loading, parsing, and rebuild.
//!
//! Only fatal conditions surface as errors. Recoverable conditions
//! (a request whose text cannot be found, an unresolved relationship ID)
//! are reported as data in `FillReport`, never as `Err`.

use thiserror::Error;

/// Fatal errors produced while filling a document
#[derive(Debug, Error)]
pub enum FillError {
    /// Input is not a usable package: not a ZIP archive, or the mandatory
    /// `word/document.xml` part is missing
    #[error("invalid package: {0}")]
    Package(String),

    /// The document part is not well-formed XML
    #[error("malformed document XML at byte {position}: {message}")]
    Parse { message: String, position: usize },

    /// The mutated tree could not be serialized back into a package
    #[error("failed to rebuild package: {0}")]
    Serialize(String),

    /// Underlying archive error while reading or writing the container
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error from the in-memory archive cursor
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl FillError {
    /// Build a parse error at a byte position
    pub(crate) fn parse(message: impl Into<String>, position: usize) -> Self {
        FillError::Parse {
            message: message.into(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = FillError::parse("unterminated tag", 42);
        assert_eq!(
            err.to_string(),
            "malformed document XML at byte 42: unterminated tag"
        );
    }

    #[test]
    fn test_package_error_display() {
        let err = FillError::Package("missing word/document.xml".to_string());
        assert!(err.to_string().contains("word/document.xml"));
    }
}
