// Host-side tests for the orbit camera math.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod camera {
    include!("../src/camera.rs");
}

use camera::OrbitCamera;
use constants::*;

fn settle(cam: &mut OrbitCamera) {
    // Plenty of 60 fps frames for the damping to converge
    for _ in 0..600 {
        cam.update(1.0 / 60.0);
    }
}

#[test]
fn aspect_follows_the_mount_bounds() {
    let mut cam = OrbitCamera::new();
    cam.set_viewport(1600, 800);
    assert!((cam.aspect() - 2.0).abs() < 1e-6);
    // A second resize recomputes from the bounds at call time
    cam.set_viewport(800, 800);
    assert!((cam.aspect() - 1.0).abs() < 1e-6);
    cam.set_viewport(600, 900);
    assert!((cam.aspect() - 2.0 / 3.0).abs() < 1e-6);
    // Zero-sized bounds leave the last good aspect in place
    cam.set_viewport(0, 800);
    assert!((cam.aspect() - 2.0 / 3.0).abs() < 1e-6);
}

#[test]
fn starts_on_the_template_eye_position() {
    let cam = OrbitCamera::new();
    let eye = cam.eye();
    assert!((eye.x).abs() < 1e-5);
    assert!((eye.y).abs() < 1e-5);
    assert!((eye.z - CAMERA_START_DISTANCE).abs() < 1e-5);
}

#[test]
fn pitch_is_clamped_short_of_the_poles() {
    let mut cam = OrbitCamera::new();
    // A huge upward drag
    cam.rotate_by(0.0, 1.0e6);
    settle(&mut cam);
    let eye = cam.eye();
    // Even fully pitched, the eye never reaches straight up
    assert!(eye.y < cam.eye().length());
    assert!(eye.y / eye.length() < ORBIT_MAX_PITCH.sin() + 1e-3);
}

#[test]
fn zoom_is_clamped_to_the_distance_range() {
    let mut cam = OrbitCamera::new();
    cam.zoom_by(1.0e9);
    settle(&mut cam);
    assert!(cam.eye().length() <= CAMERA_MAX_DISTANCE + 1e-3);

    cam.zoom_by(-1.0e9);
    settle(&mut cam);
    assert!(cam.eye().length() >= CAMERA_MIN_DISTANCE - 1e-3);
}

#[test]
fn damping_converges_toward_the_drag_target() {
    let mut cam = OrbitCamera::new();
    cam.rotate_by(100.0, 0.0);
    let before = cam.eye();
    cam.update(1.0 / 60.0);
    let after_one = cam.eye();
    // One frame moves the camera, but not all the way
    assert!((after_one - before).length() > 1e-6);
    settle(&mut cam);
    let settled = cam.eye();
    assert!((settled - after_one).length() > 1e-6);
    // Distance is untouched by rotation
    assert!((settled.length() - CAMERA_START_DISTANCE).abs() < 1e-3);
}

#[test]
fn damping_is_frame_rate_independent() {
    let mut slow = OrbitCamera::new();
    let mut fast = OrbitCamera::new();
    slow.rotate_by(200.0, 50.0);
    fast.rotate_by(200.0, 50.0);
    // 1 second as 30 fps vs 120 fps
    for _ in 0..30 {
        slow.update(1.0 / 30.0);
    }
    for _ in 0..120 {
        fast.update(1.0 / 120.0);
    }
    assert!((slow.eye() - fast.eye()).length() < 0.05);
}

#[test]
fn matrices_are_finite() {
    let mut cam = OrbitCamera::new();
    cam.set_viewport(800, 600);
    cam.rotate_by(37.0, -12.0);
    cam.zoom_by(300.0);
    settle(&mut cam);
    for m in [cam.view(), cam.projection(), cam.view_proj()] {
        assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
    }
}
