// SPDX-License-Identifier: GPL-3.0-only

//! Shared camera types: devices, frames, and the logical facing.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Which way the selected camera points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    /// World-facing camera (default)
    #[default]
    Back,
    /// User-facing camera
    Front,
}

impl Facing {
    /// The opposite facing; two applications return the original value
    pub fn toggled(self) -> Self {
        match self {
            Self::Back => Self::Front,
            Self::Front => Self::Back,
        }
    }
}

/// A camera device discovered during enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    /// Human-readable device name from the driver
    pub name: String,
    /// Device node path, e.g. `/dev/video0`
    pub path: PathBuf,
    /// Facing hint parsed from the device name, if any
    pub location: Option<String>,
}

impl CameraDevice {
    pub fn new(name: String, path: PathBuf) -> Self {
        let lower = name.to_lowercase();
        let location = if lower.contains("front") {
            Some("front".to_string())
        } else if lower.contains("back") || lower.contains("rear") {
            Some("back".to_string())
        } else {
            None
        };

        Self {
            name,
            path,
            location,
        }
    }
}

/// Pick the device that serves the requested facing.
///
/// Devices advertising a location in their name are matched first. Without
/// hints, Back maps to the first device and Front to the second. Hardware
/// with a single camera serves both facings with that camera.
pub fn select_device(devices: &[CameraDevice], facing: Facing) -> Option<&CameraDevice> {
    if devices.is_empty() {
        return None;
    }

    let hint = match facing {
        Facing::Back => "back",
        Facing::Front => "front",
    };

    if let Some(device) = devices
        .iter()
        .find(|d| d.location.as_deref() == Some(hint))
    {
        return Some(device);
    }

    let index = match facing {
        Facing::Back => 0,
        Facing::Front => 1,
    };

    devices.get(index).or_else(|| devices.first())
}

/// One decoded preview frame, RGBA8 tightly packed
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, `width * height * 4` bytes
    pub data: Arc<[u8]>,
    /// When the frame left the pipeline
    pub captured_at: Instant,
}

/// Errors raised by the capture backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The device node could not be opened
    DeviceOpen(String),
    /// The driver refused every pixel format we can handle
    UnsupportedFormat(String),
    /// Streaming setup or frame readout failed
    Stream(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceOpen(detail) => write!(f, "failed to open camera: {detail}"),
            Self::UnsupportedFormat(detail) => write!(f, "unsupported camera format: {detail}"),
            Self::Stream(detail) => write!(f, "camera stream error: {detail}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, path: &str) -> CameraDevice {
        CameraDevice::new(name.to_string(), PathBuf::from(path))
    }

    #[test]
    fn facing_toggles_alternate() {
        assert_eq!(Facing::Back.toggled(), Facing::Front);
        assert_eq!(Facing::Front.toggled(), Facing::Back);
    }

    #[test]
    fn four_toggles_are_identity() {
        let start = Facing::Back;
        let result = start.toggled().toggled().toggled().toggled();
        assert_eq!(start, result);
    }

    #[test]
    fn location_hint_parsed_from_name() {
        assert_eq!(
            device("Front Camera: Integrated", "/dev/video2").location,
            Some("front".to_string())
        );
        assert_eq!(
            device("Rear Camera", "/dev/video0").location,
            Some("back".to_string())
        );
        assert_eq!(device("USB Webcam", "/dev/video1").location, None);
    }

    #[test]
    fn select_prefers_location_hint() {
        let devices = vec![
            device("USB Webcam", "/dev/video0"),
            device("Front Camera", "/dev/video2"),
        ];
        let selected = select_device(&devices, Facing::Front).unwrap();
        assert_eq!(selected.path, PathBuf::from("/dev/video2"));
    }

    #[test]
    fn select_falls_back_to_ordering() {
        let devices = vec![
            device("Webcam A", "/dev/video0"),
            device("Webcam B", "/dev/video1"),
        ];
        assert_eq!(
            select_device(&devices, Facing::Back).unwrap().path,
            PathBuf::from("/dev/video0")
        );
        assert_eq!(
            select_device(&devices, Facing::Front).unwrap().path,
            PathBuf::from("/dev/video1")
        );
    }

    #[test]
    fn single_device_serves_both_facings() {
        let devices = vec![device("Only Camera", "/dev/video0")];
        for facing in [Facing::Back, Facing::Front] {
            assert_eq!(
                select_device(&devices, facing).unwrap().path,
                PathBuf::from("/dev/video0")
            );
        }
    }

    #[test]
    fn no_devices_selects_nothing() {
        assert!(select_device(&[], Facing::Back).is_none());
    }
}
