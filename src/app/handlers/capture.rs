// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture and gallery save handlers

use cosmic::Task;
use tracing::{error, info};

use crate::app::state::{Alert, AppModel, Message};
use crate::constants::timing::CAPTURE_ANIMATION_MS;
use crate::errors::{AppError, CaptureError, SaveError};
use crate::services::capture::{self, CaptureOptions, CaptureSource, ImageRef};

impl AppModel {
    /// Create a delayed task that sends a message after the specified milliseconds
    pub(crate) fn delay_task(millis: u64, message: Message) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(millis)).await;
                message
            },
            cosmic::Action::App,
        )
    }

    /// The capture button was pressed.
    ///
    /// Without a frame there is no capture handle yet, and the press is a
    /// silent no-op: no service call, no alert, no state change. Rapid
    /// presses are not serialized; each one snapshots its own frame.
    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(handle) = capture::handle_for_frame(self.current_frame.clone()) else {
            return Task::none();
        };

        info!("Capturing photo");
        self.is_capturing = true;

        let capture_task = Task::perform(
            async move { handle.capture(CaptureOptions::default()).await },
            |result| cosmic::Action::App(Message::PhotoCaptured(result)),
        );

        let animation_task = Self::delay_task(CAPTURE_ANIMATION_MS, Message::ClearCaptureAnimation);
        Task::batch([capture_task, animation_task])
    }

    /// The capture finished; on success the thumbnail updates before the
    /// gallery save is issued, with the same image reference.
    pub(crate) fn handle_photo_captured(
        &mut self,
        result: Result<ImageRef, CaptureError>,
    ) -> Task<cosmic::Action<Message>> {
        self.last_capture = capture::next_thumbnail(self.last_capture.take(), &result);

        let image = match result {
            Ok(image) => image,
            Err(e) => {
                error!(error = %e, "Photo capture failed");
                let message = AppError::from(e).user_message();
                self.active_alert = Some(Alert::CaptureFailed(message));
                return Task::none();
            }
        };

        info!(uri = %image.uri(), "Photo captured");

        let gallery = self.gallery.clone();
        Task::perform(
            async move {
                let result = gallery.save(&image).await;
                (image, result)
            },
            |(image, result)| cosmic::Action::App(Message::GallerySaved(image, result)),
        )
    }

    /// The gallery save finished.
    pub(crate) fn handle_gallery_saved(
        &mut self,
        image: ImageRef,
        result: Result<(), SaveError>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(()) => {
                info!(uri = %image.uri(), "Photo saved to gallery");
                self.active_alert = Some(Alert::PhotoSaved);
            }
            Err(e) => {
                // The photo exists in transient storage and stays on the
                // thumbnail, it just never reached the gallery.
                error!(uri = %image.uri(), error = %e, "Gallery save failed");
                let message = AppError::from(e).user_message();
                self.active_alert = Some(Alert::SaveFailed(message));
            }
        }
        Task::none()
    }

    /// End of the capture button press animation.
    pub(crate) fn handle_clear_capture_animation(&mut self) -> Task<cosmic::Action<Message>> {
        self.is_capturing = false;
        Task::none()
    }
}
