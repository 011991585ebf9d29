// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function is a dispatcher routing every message to a
//! focused handler method, implemented in the `handlers` submodules by
//! functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::permissions`: Splash, permission resolution, retry
//! - `handlers::camera`: Enumeration, preview frames, facing toggle
//! - `handlers::capture`: Photo capture and gallery save
//! - `handlers::ui`: Alerts, drawer pages, gallery, configuration

use cosmic::Task;

use crate::app::state::{AppModel, Message};

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== Splash =====
            Message::SplashElapsed => self.handle_splash_elapsed(),

            // ===== Permissions =====
            Message::CameraPermissionResolved(status) => {
                self.handle_camera_permission_resolved(status)
            }
            Message::MediaPermissionResolved(status) => {
                self.handle_media_permission_resolved(status)
            }
            Message::RetryCameraPermission => self.handle_retry_camera_permission(),

            // ===== Camera =====
            Message::CamerasEnumerated(cameras) => self.handle_cameras_enumerated(cameras),
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),
            Message::ToggleFacing => self.handle_toggle_facing(),

            // ===== Capture =====
            Message::Capture => self.handle_capture(),
            Message::PhotoCaptured(result) => self.handle_photo_captured(result),
            Message::GallerySaved(image, result) => self.handle_gallery_saved(image, result),
            Message::ClearCaptureAnimation => self.handle_clear_capture_animation(),

            // ===== UI =====
            Message::OpenGallery => self.handle_open_gallery(),
            Message::DismissAlert => self.handle_dismiss_alert(),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::LaunchUrl(url) => self.handle_launch_url(url),

            // ===== Configuration =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
        }
    }
}
