// SPDX-License-Identifier: GPL-3.0-only

//! Typed error taxonomy for the application.
//!
//! Every fallible operation returns one of the specific error enums below.
//! Errors reach the user through a single boundary, [`AppError::user_message`],
//! which maps them to localized alert text; internal detail is logged only.

use std::fmt;

use crate::fl;

/// Top-level application error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Permission negotiation failed
    Permission(PermissionError),
    /// Taking or encoding a photo failed
    Capture(CaptureError),
    /// Adding a photo to the gallery failed
    Save(SaveError),
}

/// Errors from the permission services
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// The XDG portal could not be reached
    PortalUnavailable(String),
    /// The portal request itself failed
    RequestFailed(String),
}

/// Errors from photo capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// No preview frame has arrived yet
    NoFrame,
    /// JPEG encoding failed
    Encoding(String),
    /// Writing the encoded photo to transient storage failed
    Io(String),
}

/// Errors from the gallery save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// The capture reference does not point at a usable file
    InvalidSource(String),
    /// Copying into the gallery directory failed
    Io(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permission(e) => write!(f, "permission error: {e}"),
            Self::Capture(e) => write!(f, "capture error: {e}"),
            Self::Save(e) => write!(f, "save error: {e}"),
        }
    }
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PortalUnavailable(detail) => write!(f, "portal unavailable: {detail}"),
            Self::RequestFailed(detail) => write!(f, "request failed: {detail}"),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFrame => write!(f, "no preview frame available"),
            Self::Encoding(detail) => write!(f, "JPEG encoding failed: {detail}"),
            Self::Io(detail) => write!(f, "could not write photo: {detail}"),
        }
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSource(detail) => write!(f, "invalid capture source: {detail}"),
            Self::Io(detail) => write!(f, "could not copy into gallery: {detail}"),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for PermissionError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for SaveError {}

impl From<PermissionError> for AppError {
    fn from(e: PermissionError) -> Self {
        Self::Permission(e)
    }
}

impl From<CaptureError> for AppError {
    fn from(e: CaptureError) -> Self {
        Self::Capture(e)
    }
}

impl From<SaveError> for AppError {
    fn from(e: SaveError) -> Self {
        Self::Save(e)
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl AppError {
    /// Localized text shown to the user for this error.
    ///
    /// The single place where internal errors become alert copy; each
    /// failure point gets its own message so a capture failure and a save
    /// failure are distinguishable.
    pub fn user_message(&self) -> String {
        match self {
            Self::Permission(_) => fl!("alert-media-permission-body"),
            Self::Capture(_) => fl!("alert-capture-failed-body"),
            Self::Save(_) => fl!("alert-save-failed-body"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = CaptureError::Encoding("bad frame".into());
        assert!(err.to_string().contains("bad frame"));

        let err = SaveError::Io("disk full".into());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn capture_and_save_messages_are_distinct() {
        let capture = AppError::from(CaptureError::NoFrame);
        let save = AppError::from(SaveError::Io("x".into()));
        assert_ne!(capture.user_message(), save.user_message());
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SaveError = io.into();
        assert!(matches!(err, SaveError::Io(_)));
    }
}
