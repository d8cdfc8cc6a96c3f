// Host-side tests for tuning constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_template_is_well_formed() {
    assert!(CAMERA_FOV_DEG > 0.0 && CAMERA_FOV_DEG < 180.0);
    assert!(CAMERA_NEAR > 0.0);
    assert!(CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_MIN_DISTANCE < CAMERA_START_DISTANCE);
    assert!(CAMERA_START_DISTANCE < CAMERA_MAX_DISTANCE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn orbit_tuning_is_well_formed() {
    // Damping is a per-frame easing fraction
    assert!(ORBIT_DAMPING > 0.0 && ORBIT_DAMPING < 1.0);
    assert!(ORBIT_ROTATE_SPEED > 0.0);
    assert!(ORBIT_ZOOM_SPEED > 0.0);
    // Pitch limit stays short of the poles so look_at never degenerates
    assert!(ORBIT_MAX_PITCH < std::f32::consts::FRAC_PI_2);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn painting_composite_proportions() {
    assert!(PAINTING_WIDTH > 0.0 && PAINTING_HEIGHT > 0.0);
    assert!(FRAME_THICKNESS > 0.0);
    assert!(FRAME_DEPTH > 0.0);
    // The cutout is a thin margin, not a second frame
    assert!(CUTOUT_MARGIN < FRAME_THICKNESS);
    // The frame sits behind the canvas plane
    assert!(FRAME_Z_OFFSET < 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn fit_range_and_scene_dressing() {
    assert!(FIT_MIN > 0.0);
    assert!(FIT_MIN < FIT_MAX);
    // The placeholder and the painting both fit inside the normalization range
    assert!(PLACEHOLDER_RADIUS * 2.0 >= FIT_MIN);
    assert!(PLACEHOLDER_RADIUS * 2.0 <= FIT_MAX);
    // Floor is below the content and wide enough to read as a platform
    assert!(FLOOR_Y < 0.0);
    assert!(FLOOR_RADIUS > PLACEHOLDER_RADIUS);
    assert!(FLOOR_SEGMENTS >= 3);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn colors_are_normalized() {
    for color in [FRAME_COLOR, CUTOUT_COLOR, FLOOR_COLOR, AMBIENT_LIGHT] {
        for channel in color {
            assert!((0.0..=1.0).contains(&channel));
        }
    }
    for channel in CLEAR_COLOR {
        assert!((0.0..=1.0).contains(&channel));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn rotation_speed_is_a_slow_spin() {
    // Roughly one turn every ~100 seconds at 60 fps
    assert!(ROTATION_SPEED_PER_FRAME > 0.0);
    assert!(ROTATION_SPEED_PER_FRAME < 0.1);
}
