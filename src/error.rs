use crate::permissions::RequestTag;
use thiserror::Error;

/// Errors surfaced by the scanning screen
///
/// The `Display` text of every variant is the exact message shown to the user.
/// None of them are fatal: each one ends the current operation and leaves the
/// screen idle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The permission set behind `tag` was refused
    #[error("{}", .tag.denial_message())]
    PermissionDenied {
        /// Which request was refused
        tag: RequestTag,
    },

    /// Scan was requested before any image was acquired
    #[error("Pick Image First")]
    NoImageSelected,

    /// The image could not be loaded or the engine reported a failure
    #[error("Failed scanning due to {message}")]
    DecodeFailure {
        /// Underlying error text
        message: String,
    },

    /// The user backed out of the gallery picker
    #[error("Cancelled")]
    AcquisitionCancelled,

    /// The media store could not hand out a capture target
    #[error("Failed creating image entry due to {message}")]
    Acquisition {
        /// Underlying error text
        message: String,
    },
}

impl ScanError {
    /// Build a decode failure from any displayable error
    pub fn decode(err: impl std::fmt::Display) -> Self {
        ScanError::DecodeFailure {
            message: err.to_string(),
        }
    }

    /// Build an acquisition failure from any displayable error
    pub fn acquisition(err: impl std::fmt::Display) -> Self {
        ScanError::Acquisition {
            message: err.to_string(),
        }
    }
}

impl From<image::ImageError> for ScanError {
    fn from(err: image::ImageError) -> Self {
        ScanError::decode(err)
    }
}
