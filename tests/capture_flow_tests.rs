// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the capture-then-save flow using a real
//! capture handle over a synthetic frame, plus a recording gallery fake.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures::future::BoxFuture;
use snapcam::services::{handle_for_frame, next_thumbnail};
use snapcam::{
    AppError, CameraFrame, CaptureError, CaptureHandle, CaptureOptions, CaptureSource,
    DirectoryGallery, GalleryService, ImageRef, SaveError,
};

/// A 4x2 frame with distinct pixel colors
fn synthetic_frame() -> Arc<CameraFrame> {
    let width = 4u32;
    let height = 2u32;
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for i in 0..(width * height) {
        data.extend_from_slice(&[(i * 32) as u8, 128, 255 - (i * 32) as u8, 255]);
    }
    Arc::new(CameraFrame {
        width,
        height,
        data: Arc::from(data),
        captured_at: Instant::now(),
    })
}

/// Gallery fake that records every save argument
#[derive(Default)]
struct RecordingGallery {
    saved: Arc<Mutex<Vec<ImageRef>>>,
}

impl GalleryService for RecordingGallery {
    fn save(&self, image: &ImageRef) -> BoxFuture<'static, Result<(), SaveError>> {
        let saved = self.saved.clone();
        let image = image.clone();
        Box::pin(async move {
            saved.lock().unwrap().push(image);
            Ok(())
        })
    }
}

/// Capture fake that counts invocations
#[derive(Default)]
struct CountingSource {
    calls: Arc<Mutex<u32>>,
}

impl CaptureSource for CountingSource {
    fn capture(
        &self,
        _options: CaptureOptions,
    ) -> BoxFuture<'static, Result<ImageRef, CaptureError>> {
        let calls = self.calls.clone();
        Box::pin(async move {
            *calls.lock().unwrap() += 1;
            Ok(ImageRef::new("/tmp/unused.jpg".into()))
        })
    }
}

/// Gallery fake that always fails
struct FailingGallery;

impl GalleryService for FailingGallery {
    fn save(&self, _image: &ImageRef) -> BoxFuture<'static, Result<(), SaveError>> {
        Box::pin(async { Err(SaveError::Io("gallery unavailable".to_string())) })
    }
}

#[tokio::test]
async fn test_capture_writes_decodable_jpeg() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let handle = CaptureHandle::with_output_dir(synthetic_frame(), dir.path().to_path_buf());

    let photo = handle
        .capture(CaptureOptions::default())
        .await
        .expect("capture should succeed");

    assert!(photo.path().starts_with(dir.path()));
    assert!(photo.uri().starts_with("file://"));

    let bytes = std::fs::read(photo.path()).expect("read captured photo");
    let decoded = image::load_from_memory(&bytes).expect("photo must be a decodable JPEG");
    assert_eq!(decoded.width(), 4);
    assert_eq!(decoded.height(), 2);
}

#[tokio::test]
async fn test_capture_output_is_exact_save_argument() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let handle = CaptureHandle::with_output_dir(synthetic_frame(), dir.path().to_path_buf());
    let gallery = RecordingGallery::default();

    let image = handle
        .capture(CaptureOptions::default())
        .await
        .expect("capture should succeed");

    gallery.save(&image).await.expect("fake save succeeds");

    let saved = gallery.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0], image, "Save must receive the capture's own reference");
    assert_eq!(saved[0].uri(), image.uri());
}

#[tokio::test]
async fn test_directory_gallery_copies_photo() {
    let capture_dir = tempfile::tempdir().expect("create capture dir");
    let gallery_dir = tempfile::tempdir().expect("create gallery dir");

    let handle =
        CaptureHandle::with_output_dir(synthetic_frame(), capture_dir.path().to_path_buf());
    let image = handle
        .capture(CaptureOptions::default())
        .await
        .expect("capture should succeed");

    let gallery = DirectoryGallery::new(gallery_dir.path().to_path_buf());
    gallery.save(&image).await.expect("save should succeed");

    let file_name = image.path().file_name().unwrap();
    let copied = gallery_dir.path().join(file_name);
    assert!(copied.is_file(), "Photo must be copied into the gallery");

    let original = std::fs::read(image.path()).unwrap();
    let copy = std::fs::read(&copied).unwrap();
    assert_eq!(original, copy);
}

#[tokio::test]
async fn test_save_failure_is_distinct_from_capture_failure() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let handle = CaptureHandle::with_output_dir(synthetic_frame(), dir.path().to_path_buf());

    let image = handle
        .capture(CaptureOptions::default())
        .await
        .expect("capture should succeed");

    let save_error = FailingGallery
        .save(&image)
        .await
        .expect_err("failing gallery must error");

    let save_message = AppError::from(save_error).user_message();
    let capture_message =
        AppError::from(snapcam::CaptureError::Encoding("x".to_string())).user_message();
    assert_ne!(
        save_message, capture_message,
        "Capture and save failures must read differently"
    );
}

#[tokio::test]
async fn test_gallery_save_failure_leaves_source_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let handle = CaptureHandle::with_output_dir(synthetic_frame(), dir.path().to_path_buf());
    let image = handle
        .capture(CaptureOptions::default())
        .await
        .expect("capture should succeed");

    let _ = FailingGallery.save(&image).await;
    assert!(
        image.path().is_file(),
        "A failed save must not destroy the transient photo"
    );
}

#[tokio::test]
async fn test_no_frame_press_performs_no_service_calls() {
    let source = CountingSource::default();
    let gallery = RecordingGallery::default();

    // The shutter press only reaches the services through the handle the
    // current preview state yields; with no frame there is no handle and
    // the press is a silent no-op.
    if let Some(_handle) = handle_for_frame(None) {
        let result = source.capture(CaptureOptions::default()).await;
        if let Ok(image) = result {
            gallery.save(&image).await.expect("fake save succeeds");
        }
    }

    assert_eq!(
        *source.calls.lock().unwrap(),
        0,
        "No frame must mean no capture call"
    );
    assert!(
        gallery.saved.lock().unwrap().is_empty(),
        "No frame must mean no gallery call"
    );
}

#[test]
fn test_frame_yields_capture_handle() {
    assert!(handle_for_frame(Some(synthetic_frame())).is_some());
}

#[tokio::test]
async fn test_capture_failure_keeps_previous_thumbnail() {
    let gallery = RecordingGallery::default();
    let previous = Some(ImageRef::new("/tmp/previous.jpg".into()));

    let result: Result<ImageRef, CaptureError> = Err(CaptureError::Encoding("truncated".into()));
    let thumbnail = next_thumbnail(previous.clone(), &result);

    assert_eq!(
        thumbnail, previous,
        "A failed capture must leave the thumbnail unchanged"
    );

    // A failed capture also never reaches the gallery
    if let Ok(image) = result {
        gallery.save(&image).await.expect("fake save succeeds");
    }
    assert!(gallery.saved.lock().unwrap().is_empty());
}

#[test]
fn test_capture_success_replaces_thumbnail() {
    let previous = Some(ImageRef::new("/tmp/previous.jpg".into()));
    let fresh = ImageRef::new("/tmp/fresh.jpg".into());

    let thumbnail = next_thumbnail(previous, &Ok(fresh.clone()));
    assert_eq!(thumbnail, Some(fresh));
}

#[test]
fn test_default_capture_quality() {
    assert!((CaptureOptions::default().quality - 0.8).abs() < f32::EPSILON);
}
