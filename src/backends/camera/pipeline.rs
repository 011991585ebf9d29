// SPDX-License-Identifier: GPL-3.0-only

//! Direct V4L2 preview pipeline.
//!
//! A worker thread owns the device and its memory-mapped stream, decodes
//! each frame to RGBA (MJPG via the `image` crate, YUYV via the converter
//! below) and pushes it over a bounded channel into the UI subscription.
//! Dropping the pipeline raises the stop flag and joins the thread, which
//! releases the hardware session.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use image::ImageFormat;
use tracing::{debug, error, info, warn};
use v4l::FourCC;
use v4l::buffer::Type;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;
use v4l::video::Capture;

use super::types::{BackendError, CameraFrame};
use crate::constants::timing::FRAME_LOG_INTERVAL;

/// Channel the pipeline pushes decoded frames into
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

const MJPG: &[u8; 4] = b"MJPG";
const YUYV: &[u8; 4] = b"YUYV";

/// A running preview pipeline bound to one device node
pub struct CameraPipeline {
    device_path: PathBuf,
    running: Arc<AtomicBool>,
    thread_handle: Option<std::thread::JoinHandle<()>>,
}

impl CameraPipeline {
    /// Open the device and start streaming frames into `frame_sender`.
    pub fn start(device_path: &Path, frame_sender: FrameSender) -> Result<Self, BackendError> {
        info!(path = %device_path.display(), "Starting camera pipeline");

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let path_clone = device_path.to_path_buf();

        let thread_handle = std::thread::spawn(move || {
            if let Err(e) = capture_loop(&path_clone, frame_sender, running_clone) {
                error!(path = %path_clone.display(), error = %e, "Camera capture loop failed");
            }
        });

        Ok(Self {
            device_path: device_path.to_path_buf(),
            running,
            thread_handle: Some(thread_handle),
        })
    }
}

impl Drop for CameraPipeline {
    fn drop(&mut self) {
        info!(path = %self.device_path.display(), "Stopping camera pipeline");
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                warn!("Camera capture thread panicked");
            }
        }
    }
}

/// Main capture loop running on the worker thread
fn capture_loop(
    device_path: &Path,
    mut frame_sender: FrameSender,
    running: Arc<AtomicBool>,
) -> Result<(), BackendError> {
    static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

    let mut dev = Device::with_path(device_path).map_err(|e| {
        BackendError::DeviceOpen(format!("{}: {e}", device_path.display()))
    })?;

    let format = negotiate_format(&mut dev)?;
    let width = format.width;
    let height = format.height;
    let fourcc = format.fourcc;
    info!(
        width,
        height,
        fourcc = %fourcc,
        "Camera format negotiated"
    );

    let mut stream = MmapStream::with_buffers(&mut dev, Type::VideoCapture, 4)
        .map_err(|e| BackendError::Stream(format!("failed to map buffers: {e}")))?;

    while running.load(Ordering::SeqCst) {
        match stream.next() {
            Ok((buf, _meta)) => {
                let frame_num = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);

                let rgba = match decode_frame(buf, width, height, &fourcc) {
                    Ok(rgba) => rgba,
                    Err(e) => {
                        if frame_num % FRAME_LOG_INTERVAL == 0 {
                            warn!(frame = frame_num, error = %e, "Dropping undecodable frame");
                        }
                        continue;
                    }
                };

                let frame = CameraFrame {
                    width,
                    height,
                    data: Arc::from(rgba),
                    captured_at: Instant::now(),
                };

                match frame_sender.try_send(frame) {
                    Ok(()) => {
                        if frame_num % FRAME_LOG_INTERVAL == 0 {
                            debug!(frame = frame_num, "Preview frame delivered");
                        }
                    }
                    Err(e) if e.is_disconnected() => {
                        debug!("Frame channel closed, stopping capture loop");
                        break;
                    }
                    Err(_) => {
                        // Channel full: UI is behind, drop the frame
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to read camera frame");
                std::thread::sleep(std::time::Duration::from_millis(10));
            }
        }
    }

    Ok(())
}

/// Keep the driver's format if we can decode it, otherwise ask for MJPG
/// then YUYV.
fn negotiate_format(dev: &mut Device) -> Result<v4l::Format, BackendError> {
    let current = dev
        .format()
        .map_err(|e| BackendError::Stream(format!("failed to query format: {e}")))?;

    if &current.fourcc.repr == MJPG || &current.fourcc.repr == YUYV {
        return Ok(current);
    }

    for fourcc in [MJPG, YUYV] {
        let mut wanted = current.clone();
        wanted.fourcc = FourCC::new(fourcc);
        if let Ok(actual) = dev.set_format(&wanted) {
            if actual.fourcc == wanted.fourcc {
                return Ok(actual);
            }
        }
    }

    Err(BackendError::UnsupportedFormat(format!(
        "device offers {} only",
        current.fourcc
    )))
}

/// Decode one raw buffer into tightly packed RGBA
fn decode_frame(
    buf: &[u8],
    width: u32,
    height: u32,
    fourcc: &FourCC,
) -> Result<Vec<u8>, BackendError> {
    match &fourcc.repr {
        MJPG => {
            let decoded = image::load_from_memory_with_format(buf, ImageFormat::Jpeg)
                .map_err(|e| BackendError::Stream(format!("MJPG decode failed: {e}")))?;
            Ok(decoded.to_rgba8().into_raw())
        }
        YUYV => {
            let expected = (width * height * 2) as usize;
            if buf.len() < expected {
                return Err(BackendError::Stream(format!(
                    "short YUYV buffer: {} < {expected}",
                    buf.len()
                )));
            }
            Ok(yuyv_to_rgba(&buf[..expected]))
        }
        other => Err(BackendError::UnsupportedFormat(
            String::from_utf8_lossy(other).into_owned(),
        )),
    }
}

/// Convert packed YUYV 4:2:2 to RGBA using BT.601 coefficients.
///
/// Each 4-byte group Y0 U Y1 V yields two RGBA pixels sharing the chroma
/// pair.
pub fn yuyv_to_rgba(yuyv: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(yuyv.len() * 2);

    for chunk in yuyv.chunks_exact(4) {
        let y0 = chunk[0] as f32;
        let u = chunk[1] as f32 - 128.0;
        let y1 = chunk[2] as f32;
        let v = chunk[3] as f32 - 128.0;

        for y in [y0, y1] {
            let r = y + 1.402 * v;
            let g = y - 0.344 * u - 0.714 * v;
            let b = y + 1.772 * u;

            rgba.push(r.clamp(0.0, 255.0) as u8);
            rgba.push(g.clamp(0.0, 255.0) as u8);
            rgba.push(b.clamp(0.0, 255.0) as u8);
            rgba.push(255);
        }
    }

    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yuyv_gray_pixels() {
        // Y=128 with neutral chroma is mid gray
        let yuyv = [128u8, 128, 128, 128];
        let rgba = yuyv_to_rgba(&yuyv);
        assert_eq!(rgba.len(), 8);
        for pixel in rgba.chunks_exact(4) {
            assert_eq!(pixel[0], 128);
            assert_eq!(pixel[1], 128);
            assert_eq!(pixel[2], 128);
            assert_eq!(pixel[3], 255);
        }
    }

    #[test]
    fn yuyv_black_and_white_extremes() {
        let yuyv = [0u8, 128, 255, 128];
        let rgba = yuyv_to_rgba(&yuyv);
        assert_eq!(&rgba[0..4], &[0, 0, 0, 255]);
        assert_eq!(&rgba[4..8], &[255, 255, 255, 255]);
    }

    #[test]
    fn yuyv_output_length_doubles_pixel_count() {
        // 4 bytes of YUYV describe 2 pixels, so 8 bytes of RGBA
        let yuyv = vec![128u8; 640 * 480 * 2];
        let rgba = yuyv_to_rgba(&yuyv);
        assert_eq!(rgba.len(), 640 * 480 * 4);
    }
}
