// SPDX-License-Identifier: GPL-3.0-only

//! Camera enumeration, preview frames, and the facing toggle

use std::sync::Arc;

use cosmic::Task;
use tracing::{debug, info, warn};

use crate::app::state::{AppModel, Message};
use crate::backends::camera::{CameraDevice, CameraFrame};
use crate::constants::timing::FRAME_LOG_INTERVAL;

impl AppModel {
    /// Device enumeration completed.
    pub(crate) fn handle_cameras_enumerated(
        &mut self,
        cameras: Vec<CameraDevice>,
    ) -> Task<cosmic::Action<Message>> {
        info!(count = cameras.len(), "Cameras enumerated");
        if cameras.is_empty() {
            warn!("No capture devices found");
        }
        self.available_cameras = cameras;
        self.cameras_enumerated = true;
        // The camera subscription picks the device up on the next
        // subscription pass.
        Task::none()
    }

    /// A decoded preview frame arrived from the pipeline.
    pub(crate) fn handle_camera_frame(
        &mut self,
        frame: Arc<CameraFrame>,
    ) -> Task<cosmic::Action<Message>> {
        static FRAME_COUNT: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);
        let count = FRAME_COUNT.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        if count % FRAME_LOG_INTERVAL == 0 {
            debug!(
                frame = count,
                width = frame.width,
                height = frame.height,
                "Preview frame received"
            );
        }

        self.current_frame = Some(frame);
        Task::none()
    }

    /// Flip the logical facing; the subscription identity change restarts
    /// the preview pipeline. A stale frame during restart is expected.
    pub(crate) fn handle_toggle_facing(&mut self) -> Task<cosmic::Action<Message>> {
        self.facing = self.facing.toggled();
        info!(facing = ?self.facing, "Facing toggled");
        self.current_frame = None;
        Task::none()
    }
}
