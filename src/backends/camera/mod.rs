// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 camera backend: device enumeration and the preview pipeline.

pub mod pipeline;
pub mod types;

pub use pipeline::{CameraPipeline, FrameSender};
pub use types::{BackendError, CameraDevice, CameraFrame, Facing, select_device};

use tracing::{debug, warn};
use v4l::capability::Flags;
use v4l::prelude::*;

/// Enumerate capture-capable video devices.
///
/// Nodes that exist but are not capture devices (metadata nodes, m2m
/// codecs) are filtered out by capability flags.
pub fn enumerate_cameras() -> Vec<CameraDevice> {
    let mut cameras = Vec::new();

    for node in v4l::context::enum_devices() {
        let path = node.path().to_path_buf();

        let device = match Device::with_path(&path) {
            Ok(device) => device,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unopenable video node");
                continue;
            }
        };

        let caps = match device.query_caps() {
            Ok(caps) => caps,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to query device capabilities");
                continue;
            }
        };

        if !caps.capabilities.contains(Flags::VIDEO_CAPTURE) {
            continue;
        }

        let name = node.name().unwrap_or_else(|| caps.card.clone());
        debug!(path = %path.display(), name = %name, "Found capture device");
        cameras.push(CameraDevice::new(name, path));
    }

    cameras.sort_by(|a, b| a.path.cmp(&b.path));
    cameras
}
