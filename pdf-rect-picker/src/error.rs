use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced to the user by the picker.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PickerError {
    #[error("No document loaded")]
    NoDocument,

    #[error("No rectangle selected")]
    NoSelection,

    #[error("Page {index} is out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("Failed to open {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("Failed to render page {index}: {reason}")]
    Render { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, PickerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_input() {
        let err = PickerError::Load {
            path: PathBuf::from("/tmp/broken.pdf"),
            reason: "not a PDF file".into(),
        };
        assert_eq!(err.to_string(), "Failed to open /tmp/broken.pdf: not a PDF file");

        let err = PickerError::PageOutOfRange { index: 4, count: 3 };
        assert_eq!(err.to_string(), "Page 4 is out of range (document has 3 pages)");
    }
}
