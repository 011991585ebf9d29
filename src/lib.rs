// SPDX-License-Identifier: GPL-3.0-only

//! Snapcam - a minimal camera application for the COSMIC desktop
//!
//! # Architecture
//!
//! - [`app`]: Main application logic and UI
//! - [`backends`]: V4L2 camera backend
//! - [`services`]: Permission, capture, and gallery capabilities
//! - [`config`]: User configuration handling
//! - [`storage`]: Photo directory and filename handling
//! - [`errors`]: Typed error taxonomy

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod services;
pub mod storage;

// Re-export commonly used types
pub use app::{Alert, AppModel, Message, Screen};
pub use backends::camera::{CameraDevice, CameraFrame, Facing};
pub use config::Config;
pub use errors::{AppError, CaptureError, PermissionError, SaveError};
pub use services::{
    CaptureHandle, CaptureOptions, CaptureSource, DirectoryGallery, GalleryService, ImageRef,
    PermissionService, PermissionStatus,
};
