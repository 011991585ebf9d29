// SPDX-License-Identifier: GPL-3.0-only

//! Gallery save: copy captured photos into the durable Pictures directory.

use std::path::PathBuf;

use futures::future::BoxFuture;
use tracing::info;

use crate::errors::SaveError;
use crate::services::capture::ImageRef;
use crate::storage;

/// Async capability for adding a photo to the user's gallery
pub trait GalleryService: Send + Sync {
    fn save(&self, image: &ImageRef) -> BoxFuture<'static, Result<(), SaveError>>;
}

/// Production gallery backed by a directory
pub struct DirectoryGallery {
    directory: PathBuf,
}

impl DirectoryGallery {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    /// Gallery at the default `~/Pictures/snapcam` location
    pub fn default_location() -> Self {
        Self::new(storage::gallery_directory())
    }
}

impl GalleryService for DirectoryGallery {
    fn save(&self, image: &ImageRef) -> BoxFuture<'static, Result<(), SaveError>> {
        let directory = self.directory.clone();
        let source = image.path().to_path_buf();

        Box::pin(async move {
            let file_name = source.file_name().ok_or_else(|| {
                SaveError::InvalidSource(format!("no file name in {}", source.display()))
            })?;

            tokio::fs::create_dir_all(&directory).await?;
            let destination = directory.join(file_name);
            tokio::fs::copy(&source, &destination).await?;

            info!(path = %destination.display(), "Photo saved to gallery");
            Ok(())
        })
    }
}
