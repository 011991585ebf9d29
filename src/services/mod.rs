// SPDX-License-Identifier: GPL-3.0-only

//! Platform-service capability objects.
//!
//! The app model talks to permissions, capture, and the gallery through
//! the traits in these modules, so tests can substitute recording fakes
//! for the portal, the encoder, and the Pictures directory.

pub mod capture;
pub mod gallery;
pub mod permissions;

pub use capture::{
    CaptureHandle, CaptureOptions, CaptureSource, ImageRef, handle_for_frame, next_thumbnail,
};
pub use gallery::{DirectoryGallery, GalleryService};
pub use permissions::{
    PermissionService, PermissionStatus, PicturesLibraryPermission, PortalCameraPermission,
};
