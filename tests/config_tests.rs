// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use snapcam::Config;
use snapcam::config::AppTheme;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(
        config.app_theme,
        AppTheme::System,
        "Theme should follow the system by default"
    );
}

#[test]
fn test_app_theme_default() {
    assert_eq!(AppTheme::default(), AppTheme::System);
}
