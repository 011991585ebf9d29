// SPDX-License-Identifier: GPL-3.0-only

//! Filesystem locations for captured photos.
//!
//! Captures land in a transient cache directory first; the gallery service
//! copies them into the durable Pictures directory afterwards.

use std::path::PathBuf;

/// Durable gallery directory, `~/Pictures/snapcam`
pub fn gallery_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Pictures")
        })
        .join("snapcam")
}

/// Transient directory freshly encoded captures are written into
pub fn capture_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("snapcam")
        .join("captures")
}

/// Timestamped photo filename, unique down to the millisecond
pub fn photo_filename() -> String {
    format!(
        "IMG_{}.jpg",
        chrono::Local::now().format("%Y%m%d_%H%M%S_%3f")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_filename_shape() {
        let name = photo_filename();
        assert!(name.starts_with("IMG_"));
        assert!(name.ends_with(".jpg"));
        // IMG_YYYYMMDD_HHMMSS_mmm.jpg
        assert_eq!(name.len(), "IMG_20250101_120000_000.jpg".len());
    }

    #[test]
    fn directories_are_distinct() {
        assert_ne!(gallery_directory(), capture_directory());
    }
}
