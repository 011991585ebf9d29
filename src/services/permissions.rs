// SPDX-License-Identifier: GPL-3.0-only

//! Permission negotiation for the camera and the photo library.
//!
//! Camera access goes through the XDG desktop portal
//! (`org.freedesktop.portal.Camera`); when no portal is running (bare
//! session, CI) the service falls back to checking for usable video
//! device nodes. Media-library access is modeled as write access to the
//! user's Pictures directory.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::StreamExt;
use futures::future::BoxFuture;
use tracing::{debug, info, warn};
use zbus::zvariant::{OwnedValue, Value};

use crate::errors::PermissionError;

/// Tri-state permission as mirrored into app state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Not yet requested or still resolving
    #[default]
    Unknown,
    /// The user or platform refused access
    Denied,
    /// Access granted
    Granted,
}

/// Async capability for one permission.
///
/// `request` is idempotent: once granted, later calls resolve to Granted
/// without prompting again.
pub trait PermissionService: Send + Sync {
    /// Current status without prompting
    fn status(&self) -> BoxFuture<'static, PermissionStatus>;

    /// Prompt the platform for access if not already granted
    fn request(&self) -> BoxFuture<'static, Result<PermissionStatus, PermissionError>>;
}

const PORTAL_DEST: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const CAMERA_IFACE: &str = "org.freedesktop.portal.Camera";
const REQUEST_IFACE: &str = "org.freedesktop.portal.Request";

/// Camera permission via the XDG desktop portal
#[derive(Default)]
pub struct PortalCameraPermission {
    granted: Arc<AtomicBool>,
}

impl PortalCameraPermission {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PermissionService for PortalCameraPermission {
    fn status(&self) -> BoxFuture<'static, PermissionStatus> {
        let granted = self.granted.clone();
        Box::pin(async move {
            if granted.load(Ordering::SeqCst) {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Unknown
            }
        })
    }

    fn request(&self) -> BoxFuture<'static, Result<PermissionStatus, PermissionError>> {
        let granted = self.granted.clone();
        Box::pin(async move {
            if granted.load(Ordering::SeqCst) {
                return Ok(PermissionStatus::Granted);
            }

            let status = match request_portal_camera_access().await {
                Ok(status) => status,
                Err(e) => {
                    // No portal on this session; a visible device node is
                    // the best access signal available.
                    warn!(error = %e, "Camera portal unavailable, falling back to device check");
                    if has_video_devices() {
                        PermissionStatus::Granted
                    } else {
                        PermissionStatus::Denied
                    }
                }
            };

            if status == PermissionStatus::Granted {
                granted.store(true, Ordering::SeqCst);
            }
            Ok(status)
        })
    }
}

/// Run the `AccessCamera` portal flow and wait for its response.
async fn request_portal_camera_access() -> Result<PermissionStatus, PermissionError> {
    let connection = zbus::Connection::session()
        .await
        .map_err(|e| PermissionError::PortalUnavailable(e.to_string()))?;

    let camera_proxy = zbus::Proxy::new(&connection, PORTAL_DEST, PORTAL_PATH, CAMERA_IFACE)
        .await
        .map_err(|e| PermissionError::PortalUnavailable(e.to_string()))?;

    // The portal replies on a Request object whose path is derivable from
    // our unique name and the handle token. Subscribe before calling so
    // the Response signal cannot be missed.
    let token = format!("snapcam_{}", std::process::id());
    let sender = connection
        .unique_name()
        .ok_or_else(|| PermissionError::PortalUnavailable("no unique bus name".to_string()))?
        .as_str()
        .trim_start_matches(':')
        .replace('.', "_");
    let expected_handle = format!("/org/freedesktop/portal/desktop/request/{sender}/{token}");

    let mut response_stream = subscribe_response(&connection, &expected_handle).await?;

    let mut options: HashMap<&str, Value<'_>> = HashMap::new();
    options.insert("handle_token", Value::from(token.as_str()));

    let handle: zbus::zvariant::OwnedObjectPath = camera_proxy
        .call("AccessCamera", &(options,))
        .await
        .map_err(|e| PermissionError::RequestFailed(e.to_string()))?;

    // Older portals may return a different request path than the
    // precomputed one; re-subscribe on the actual handle.
    if handle.as_str() != expected_handle {
        debug!(handle = %handle, "Portal returned unexpected request path");
        response_stream = subscribe_response(&connection, handle.as_str()).await?;
    }

    let message = response_stream
        .next()
        .await
        .ok_or_else(|| PermissionError::RequestFailed("portal closed the request".to_string()))?;

    let (code, _results): (u32, HashMap<String, OwnedValue>) = message
        .body()
        .deserialize()
        .map_err(|e| PermissionError::RequestFailed(e.to_string()))?;

    info!(code, "Camera portal responded");
    // 0 = granted, 1 = cancelled by user, 2 = other failure
    if code == 0 {
        Ok(PermissionStatus::Granted)
    } else {
        Ok(PermissionStatus::Denied)
    }
}

async fn subscribe_response(
    connection: &zbus::Connection,
    request_path: &str,
) -> Result<zbus::proxy::SignalStream<'static>, PermissionError> {
    let request_proxy = zbus::Proxy::new(
        connection,
        PORTAL_DEST,
        request_path.to_string(),
        REQUEST_IFACE,
    )
    .await
    .map_err(|e| PermissionError::RequestFailed(e.to_string()))?;

    request_proxy
        .receive_signal("Response")
        .await
        .map_err(|e| PermissionError::RequestFailed(e.to_string()))
}

fn has_video_devices() -> bool {
    !crate::backends::camera::enumerate_cameras().is_empty()
}

/// Media-library permission as write access to the gallery directory
pub struct PicturesLibraryPermission {
    directory: std::path::PathBuf,
}

impl PicturesLibraryPermission {
    pub fn new() -> Self {
        Self {
            directory: crate::storage::gallery_directory(),
        }
    }
}

impl Default for PicturesLibraryPermission {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionService for PicturesLibraryPermission {
    fn status(&self) -> BoxFuture<'static, PermissionStatus> {
        let directory = self.directory.clone();
        Box::pin(async move {
            if directory.is_dir() {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Unknown
            }
        })
    }

    fn request(&self) -> BoxFuture<'static, Result<PermissionStatus, PermissionError>> {
        let directory = self.directory.clone();
        Box::pin(async move {
            match tokio::fs::create_dir_all(&directory).await {
                Ok(()) => {
                    debug!(path = %directory.display(), "Gallery directory writable");
                    Ok(PermissionStatus::Granted)
                }
                Err(e) => {
                    warn!(path = %directory.display(), error = %e, "Gallery directory unavailable");
                    Ok(PermissionStatus::Denied)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_unknown() {
        assert_eq!(PermissionStatus::default(), PermissionStatus::Unknown);
    }
}
