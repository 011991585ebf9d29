// SPDX-License-Identifier: GPL-3.0-only

//! Splash and permission message handlers

use cosmic::Task;
use tracing::{error, info, warn};

use crate::app::state::{Alert, AppModel, Message};
use crate::services::PermissionStatus;

impl AppModel {
    /// The splash timer elapsed; reveal the gated UI.
    ///
    /// The transition is one-way and duplicate-safe: a stray second timer
    /// message changes nothing.
    pub(crate) fn handle_splash_elapsed(&mut self) -> Task<cosmic::Action<Message>> {
        if self.splash_visible {
            info!("Splash finished");
            self.splash_visible = false;
        }
        Task::none()
    }

    /// Camera permission resolved; on grant, start device enumeration.
    pub(crate) fn handle_camera_permission_resolved(
        &mut self,
        status: PermissionStatus,
    ) -> Task<cosmic::Action<Message>> {
        info!(?status, "Camera permission resolved");
        self.camera_permission = status;

        if status != PermissionStatus::Granted {
            return Task::none();
        }

        Task::perform(
            async {
                tokio::task::spawn_blocking(crate::backends::camera::enumerate_cameras)
                    .await
                    .unwrap_or_else(|e| {
                        error!(error = %e, "Camera enumeration task failed");
                        Vec::new()
                    })
            },
            |cameras| cosmic::Action::App(Message::CamerasEnumerated(cameras)),
        )
    }

    /// Media-library permission resolved; denial warns but never blocks
    /// the camera.
    pub(crate) fn handle_media_permission_resolved(
        &mut self,
        status: PermissionStatus,
    ) -> Task<cosmic::Action<Message>> {
        info!(?status, "Media permission resolved");
        self.media_permission = status;

        if status == PermissionStatus::Denied {
            warn!("Photo library unavailable, captures stay in transient storage");
            self.active_alert = Some(Alert::MediaPermissionWarning);
        }
        Task::none()
    }

    /// User pressed the retry button on the denied screen.
    ///
    /// Safe to call repeatedly; the service short-circuits once granted.
    pub(crate) fn handle_retry_camera_permission(&mut self) -> Task<cosmic::Action<Message>> {
        let service = self.camera_permissions.clone();
        Task::perform(async move { service.request().await }, |result| {
            let status = result.unwrap_or_else(|e| {
                error!(error = %e, "Camera permission retry failed");
                PermissionStatus::Denied
            });
            cosmic::Action::App(Message::CameraPermissionResolved(status))
        })
    }
}
