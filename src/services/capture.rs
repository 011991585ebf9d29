// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture: a snapshot of the latest preview frame that can encode
//! itself to a JPEG in transient storage.

use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use tracing::{debug, error};

use crate::backends::camera::CameraFrame;
use crate::constants::PHOTO_QUALITY;
use crate::errors::CaptureError;
use crate::storage;

/// Opaque reference to a captured photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    path: PathBuf,
}

impl ImageRef {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Filesystem location of the photo
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file://` URI for thumbnail display
    pub fn uri(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Options for one capture invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// JPEG quality in 0.0 - 1.0
    pub quality: f32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            quality: PHOTO_QUALITY,
        }
    }
}

/// Something that can produce a photo on demand
pub trait CaptureSource: Send + Sync {
    fn capture(
        &self,
        options: CaptureOptions,
    ) -> BoxFuture<'static, Result<ImageRef, CaptureError>>;
}

/// Build the capture capability for the current preview state.
///
/// No frame means no handle, and the shutter press must stay a silent
/// no-op: no service call, no alert, no state change.
pub fn handle_for_frame(frame: Option<Arc<CameraFrame>>) -> Option<CaptureHandle> {
    frame.map(CaptureHandle::new)
}

/// Thumbnail transition when a capture completes.
///
/// Success replaces the reference with the fresh capture; failure keeps
/// whatever was displayed before.
pub fn next_thumbnail(
    current: Option<ImageRef>,
    result: &Result<ImageRef, CaptureError>,
) -> Option<ImageRef> {
    match result {
        Ok(image) => Some(image.clone()),
        Err(_) => current,
    }
}

/// Capture capability over a frozen preview frame.
///
/// Cloning is cheap; the frame is shared. Because each handle snapshots
/// one frame, overlapping captures never race on live pipeline state.
#[derive(Clone)]
pub struct CaptureHandle {
    frame: Arc<CameraFrame>,
    output_dir: PathBuf,
}

impl CaptureHandle {
    pub fn new(frame: Arc<CameraFrame>) -> Self {
        Self {
            frame,
            output_dir: storage::capture_directory(),
        }
    }

    /// Use a different transient directory (tests)
    pub fn with_output_dir(frame: Arc<CameraFrame>, output_dir: PathBuf) -> Self {
        Self { frame, output_dir }
    }
}

impl CaptureSource for CaptureHandle {
    fn capture(
        &self,
        options: CaptureOptions,
    ) -> BoxFuture<'static, Result<ImageRef, CaptureError>> {
        let frame = self.frame.clone();
        let output_dir = self.output_dir.clone();

        Box::pin(async move {
            let result = tokio::task::spawn_blocking(move || {
                encode_jpeg(&frame, &output_dir, options.quality)
            })
            .await
            .map_err(|e| CaptureError::Encoding(format!("encode task failed: {e}")))?;

            match &result {
                Ok(image) => debug!(path = %image.path().display(), "Photo captured"),
                Err(e) => error!(error = %e, "Photo capture failed"),
            }
            result
        })
    }
}

/// Encode one RGBA frame as a JPEG at the given quality into `output_dir`.
fn encode_jpeg(
    frame: &CameraFrame,
    output_dir: &Path,
    quality: f32,
) -> Result<ImageRef, CaptureError> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() < expected {
        return Err(CaptureError::Encoding(format!(
            "frame buffer too small: {} < {expected}",
            frame.data.len()
        )));
    }

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(storage::photo_filename());

    // JPEG has no alpha channel, strip it before encoding
    let rgb: Vec<u8> = frame
        .data
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let quality = (quality.clamp(0.0, 1.0) * 100.0).round() as u8;
    let file = std::fs::File::create(&path)?;
    let mut writer = BufWriter::new(file);
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    encoder
        .encode(&rgb, frame.width, frame.height, ExtendedColorType::Rgb8)
        .map_err(|e| CaptureError::Encoding(e.to_string()))?;

    Ok(ImageRef::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quality_matches_constant() {
        assert_eq!(CaptureOptions::default().quality, PHOTO_QUALITY);
    }

    #[test]
    fn image_ref_uri_is_file_scheme() {
        let image = ImageRef::new(PathBuf::from("/tmp/IMG_1.jpg"));
        assert_eq!(image.uri(), "file:///tmp/IMG_1.jpg");
    }
}
