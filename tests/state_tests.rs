// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the pure state machines: screen selection and
//! the facing toggle.

use snapcam::{Facing, PermissionStatus, Screen};

#[test]
fn test_splash_gates_every_permission_state() {
    for permission in [
        PermissionStatus::Unknown,
        PermissionStatus::Denied,
        PermissionStatus::Granted,
    ] {
        assert_eq!(
            Screen::for_state(true, permission),
            Screen::Splash,
            "Splash must win over permission state {permission:?}"
        );
    }
}

#[test]
fn test_permission_gate_selects_screen() {
    assert_eq!(
        Screen::for_state(false, PermissionStatus::Unknown),
        Screen::PermissionLoading
    );
    assert_eq!(
        Screen::for_state(false, PermissionStatus::Denied),
        Screen::PermissionDenied
    );
    assert_eq!(
        Screen::for_state(false, PermissionStatus::Granted),
        Screen::Camera
    );
}

#[test]
fn test_denied_never_shows_camera() {
    for splash in [true, false] {
        assert_ne!(
            Screen::for_state(splash, PermissionStatus::Denied),
            Screen::Camera
        );
    }
}

#[test]
fn test_facing_toggle_alternates() {
    let mut facing = Facing::Back;
    facing = facing.toggled();
    assert_eq!(facing, Facing::Front);
    facing = facing.toggled();
    assert_eq!(facing, Facing::Back);
}

#[test]
fn test_four_toggles_are_identity() {
    for start in [Facing::Back, Facing::Front] {
        let mut facing = start;
        for _ in 0..4 {
            facing = facing.toggled();
        }
        assert_eq!(facing, start, "Four toggles must return to {start:?}");
    }
}

#[test]
fn test_default_facing_is_back() {
    assert_eq!(Facing::default(), Facing::Back);
}
