// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// How long the branded splash screen stays up after launch
pub const SPLASH_DURATION: Duration = Duration::from_millis(3000);

/// JPEG quality used for captured photos (0.0 - 1.0)
pub const PHOTO_QUALITY: f32 = 0.8;

/// UI layout constants
pub mod ui {
    /// Outer diameter of the round capture button
    pub const CAPTURE_BUTTON_OUTER: f32 = 60.0;

    /// Inner circle diameter of the capture button
    pub const CAPTURE_BUTTON_INNER: f32 = 50.0;

    /// Corner radius that makes the capture button circular
    pub const CAPTURE_BUTTON_RADIUS: f32 = 25.0;

    /// Gallery thumbnail edge length in the bottom bar
    pub const THUMBNAIL_SIZE: f32 = 40.0;

    /// Width reserved for an absent bottom-bar button
    pub const PLACEHOLDER_BUTTON_WIDTH: f32 = 40.0;

    /// Height of the bottom control bar
    pub const BOTTOM_BAR_HEIGHT: f32 = 68.0;

    /// Title text size on the splash screen
    pub const SPLASH_TITLE_SIZE: u16 = 32;

    /// Alpha of the dimmed backdrop behind modal alerts
    pub const OVERLAY_BACKGROUND_ALPHA: f32 = 0.6;
}

/// Timing constants
pub mod timing {
    /// Capture button press animation duration in milliseconds
    pub const CAPTURE_ANIMATION_MS: u64 = 150;

    /// Log every Nth preview frame to avoid flooding the logs
    pub const FRAME_LOG_INTERVAL: u64 = 30;
}

/// Application metadata
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splash_duration_is_three_seconds() {
        assert_eq!(SPLASH_DURATION, Duration::from_secs(3));
    }

    #[test]
    fn photo_quality_is_in_range() {
        assert!((0.0..=1.0).contains(&PHOTO_QUALITY));
    }

    #[test]
    fn version_is_nonempty() {
        assert!(!app_info::version().is_empty());
    }
}
