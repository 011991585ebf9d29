// SPDX-License-Identifier: GPL-3.0-only

//! Application state: the model, messages, and the pure screen selector.

use std::sync::Arc;

use cosmic::cosmic_config;
use cosmic::widget::about::About;

use crate::backends::camera::{CameraDevice, CameraFrame, Facing};
use crate::config::Config;
use crate::errors::{CaptureError, SaveError};
use crate::fl;
use crate::services::{GalleryService, ImageRef, PermissionService, PermissionStatus};

/// The application model
pub struct AppModel {
    /// Core functionality from libcosmic
    pub core: cosmic::app::Core,
    /// Which context drawer page is open, if any
    pub context_page: ContextPage,
    /// About page metadata
    pub about: About,
    /// Persisted application configuration
    pub config: Config,
    /// Handle for writing configuration changes
    pub config_handler: Option<cosmic_config::Config>,
    /// True from launch until the splash timer elapses
    pub splash_visible: bool,
    /// Camera permission as last reported by the permission service
    pub camera_permission: PermissionStatus,
    /// Photo-library permission as last reported by the permission service
    pub media_permission: PermissionStatus,
    /// Logical camera facing selected by the user
    pub facing: Facing,
    /// Capture devices found after permission was granted
    pub available_cameras: Vec<CameraDevice>,
    /// True once enumeration has completed at least once
    pub cameras_enumerated: bool,
    /// Latest frame from the preview pipeline
    pub current_frame: Option<Arc<CameraFrame>>,
    /// Reference to the most recent capture, for the thumbnail only
    pub last_capture: Option<ImageRef>,
    /// The single modal alert slot
    pub active_alert: Option<Alert>,
    /// Drives the capture button press animation
    pub is_capturing: bool,
    /// Localized options for the theme dropdown
    pub theme_dropdown_options: Vec<String>,
    /// Camera permission service
    pub camera_permissions: Arc<dyn PermissionService>,
    /// Photo-library permission service
    pub media_permissions: Arc<dyn PermissionService>,
    /// Gallery save service
    pub gallery: Arc<dyn GalleryService>,
}

/// Which top-level screen the view renders.
///
/// Selection is a pure function of state so it can be tested without a
/// window: the splash gates everything, then the permission gate decides
/// between placeholder, denied, and the live camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    PermissionLoading,
    PermissionDenied,
    Camera,
}

impl Screen {
    pub fn for_state(splash_visible: bool, camera_permission: PermissionStatus) -> Self {
        if splash_visible {
            return Self::Splash;
        }
        match camera_permission {
            PermissionStatus::Unknown => Self::PermissionLoading,
            PermissionStatus::Denied => Self::PermissionDenied,
            PermissionStatus::Granted => Self::Camera,
        }
    }
}

/// Modal alerts, one at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// Photo library unavailable; captures stay in transient storage
    MediaPermissionWarning,
    /// The capture was added to the gallery
    PhotoSaved,
    /// Taking the photo failed
    CaptureFailed(String),
    /// The photo exists but could not be added to the gallery
    SaveFailed(String),
}

impl Alert {
    pub fn title(&self) -> String {
        match self {
            Self::MediaPermissionWarning => fl!("alert-media-permission-title"),
            Self::PhotoSaved => fl!("alert-saved-title"),
            Self::CaptureFailed(_) => fl!("alert-capture-failed-title"),
            Self::SaveFailed(_) => fl!("alert-save-failed-title"),
        }
    }

    pub fn body(&self) -> String {
        match self {
            Self::MediaPermissionWarning => fl!("alert-media-permission-body"),
            Self::PhotoSaved => fl!("alert-saved-body"),
            Self::CaptureFailed(message) | Self::SaveFailed(message) => message.clone(),
        }
    }
}

/// Identifies a page in the context drawer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Messages emitted by the application and its widgets
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Splash =====
    /// The splash timer elapsed; late duplicates are ignored
    SplashElapsed,

    // ===== Permissions =====
    CameraPermissionResolved(PermissionStatus),
    MediaPermissionResolved(PermissionStatus),
    RetryCameraPermission,

    // ===== Camera =====
    CamerasEnumerated(Vec<CameraDevice>),
    CameraFrame(Arc<CameraFrame>),
    ToggleFacing,

    // ===== Capture =====
    Capture,
    PhotoCaptured(Result<ImageRef, CaptureError>),
    GallerySaved(ImageRef, Result<(), SaveError>),
    ClearCaptureAnimation,

    // ===== UI =====
    OpenGallery,
    DismissAlert,
    ToggleContextPage(ContextPage),
    LaunchUrl(String),

    // ===== Configuration =====
    UpdateConfig(Config),
    SetAppTheme(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splash_wins_over_everything() {
        for permission in [
            PermissionStatus::Unknown,
            PermissionStatus::Denied,
            PermissionStatus::Granted,
        ] {
            assert_eq!(Screen::for_state(true, permission), Screen::Splash);
        }
    }

    #[test]
    fn permission_gate_after_splash() {
        assert_eq!(
            Screen::for_state(false, PermissionStatus::Unknown),
            Screen::PermissionLoading
        );
        assert_eq!(
            Screen::for_state(false, PermissionStatus::Denied),
            Screen::PermissionDenied
        );
        assert_eq!(
            Screen::for_state(false, PermissionStatus::Granted),
            Screen::Camera
        );
    }

    #[test]
    fn denied_never_yields_camera() {
        for splash in [true, false] {
            assert_ne!(
                Screen::for_state(splash, PermissionStatus::Denied),
                Screen::Camera
            );
        }
    }
}
