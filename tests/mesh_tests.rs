// Host-side tests for content geometry and the model fit normalization.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod mesh {
    include!("../src/mesh.rs");
}

use constants::*;
use mesh::*;

fn assert_well_formed(m: &MeshData) {
    assert_eq!(m.positions.len(), m.normals.len());
    assert_eq!(m.positions.len(), m.uvs.len());
    assert_eq!(m.indices.len() % 3, 0);
    let count = m.positions.len() as u32;
    assert!(m.indices.iter().all(|&i| i < count));
}

#[test]
fn fit_scale_normalizes_into_range() {
    // Small models scale up to the lower bound
    assert!((fit_scale(1.0) - 2.0).abs() < 1e-6);
    // In-range models are untouched
    assert_eq!(fit_scale(2.0), 1.0);
    assert_eq!(fit_scale(4.0), 1.0);
    assert_eq!(fit_scale(6.0), 1.0);
    // Large models scale down to the upper bound
    assert!((fit_scale(10.0) - 0.6).abs() < 1e-6);
    assert!((fit_scale(100.0) - 0.06).abs() < 1e-6);
}

#[test]
fn fit_scale_tolerates_degenerate_bounds() {
    assert_eq!(fit_scale(0.0), 1.0);
    assert_eq!(fit_scale(-3.0), 1.0);
    assert_eq!(fit_scale(f32::NAN), 1.0);
    assert_eq!(fit_scale(f32::INFINITY), 1.0);
}

#[test]
fn aabb_of_points() {
    assert!(aabb(&[]).is_none());
    let (min, max) = aabb(&[[1.0, -2.0, 0.5], [-1.0, 3.0, 0.0], [0.0, 0.0, 2.0]]).unwrap();
    assert_eq!(min, [-1.0, -2.0, 0.0]);
    assert_eq!(max, [1.0, 3.0, 2.0]);
    assert_eq!(max_dimension(min, max), 5.0);
}

#[test]
fn plane_spans_the_requested_extent() {
    let m = plane(4.0, 3.0, 0.25);
    assert_well_formed(&m);
    assert_eq!(m.positions.len(), 4);
    assert_eq!(m.indices.len(), 6);
    let (min, max) = aabb(&m.positions).unwrap();
    assert_eq!(min, [-2.0, -1.5, 0.25]);
    assert_eq!(max, [2.0, 1.5, 0.25]);
    // Image-style UVs: v runs downward
    assert_eq!(m.uvs[0], [0.0, 0.0]);
    assert_eq!(m.uvs[3], [0.0, 1.0]);
}

#[test]
fn box_mesh_has_six_independent_faces() {
    let m = box_mesh(2.0, 1.0, 0.5, [0.0, 0.0, -0.25], false);
    assert_well_formed(&m);
    assert_eq!(m.positions.len(), 24);
    assert_eq!(m.indices.len(), 36);
    let (min, max) = aabb(&m.positions).unwrap();
    assert_eq!(min, [-1.0, -0.5, -0.5]);
    assert_eq!(max, [1.0, 0.5, 0.0]);
}

#[test]
fn inverted_box_flips_normals_inward() {
    let outward = box_mesh(1.0, 1.0, 1.0, [0.0; 3], false);
    let inward = box_mesh(1.0, 1.0, 1.0, [0.0; 3], true);
    for (a, b) in outward.normals.iter().zip(&inward.normals) {
        assert_eq!([-a[0], -a[1], -a[2]], *b);
    }
    // Winding flips with the normals so the interior reads as front-facing
    assert_ne!(outward.indices, inward.indices);
}

#[test]
fn painting_composite_layout() {
    let parts = painting_with_frame();
    assert_eq!(parts.len(), 3);

    let canvas = &parts[0];
    assert!(canvas.textured);
    let (min, max) = aabb(&canvas.mesh.positions).unwrap();
    assert_eq!(max[0] - min[0], PAINTING_WIDTH);
    assert_eq!(max[1] - min[1], PAINTING_HEIGHT);
    assert_eq!(min[2], 0.0);

    let frame = &parts[1];
    assert!(!frame.textured);
    assert_eq!(frame.base_color, FRAME_COLOR);
    let (fmin, fmax) = aabb(&frame.mesh.positions).unwrap();
    // The frame encloses the canvas and sits behind it
    assert!(fmax[0] - fmin[0] > PAINTING_WIDTH);
    assert!(fmax[1] - fmin[1] > PAINTING_HEIGHT);
    assert!(((fmin[2] + fmax[2]) * 0.5 - FRAME_Z_OFFSET).abs() < 1e-5);

    let cutout = &parts[2];
    assert_eq!(cutout.base_color, CUTOUT_COLOR);
    let (cmin, cmax) = aabb(&cutout.mesh.positions).unwrap();
    // Slightly wider than the canvas, narrower than the frame
    assert!(cmax[0] - cmin[0] > PAINTING_WIDTH);
    assert!(cmax[0] - cmin[0] < fmax[0] - fmin[0]);
}

#[test]
fn placeholder_is_one_textured_solid() {
    let parts = placeholder_solid();
    assert_eq!(parts.len(), 1);
    assert!(parts[0].textured);
    assert_well_formed(&parts[0].mesh);
    let (min, max) = aabb(&parts[0].mesh.positions).unwrap();
    assert!((max_dimension(min, max) - PLACEHOLDER_RADIUS * 2.0).abs() < 1e-3);
}

#[test]
fn sphere_normals_are_unit_radial() {
    let m = uv_sphere(2.0, 16, 16);
    assert_well_formed(&m);
    for (p, n) in m.positions.iter().zip(&m.normals) {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-4);
        for axis in 0..3 {
            assert!((p[axis] - n[axis] * 2.0).abs() < 1e-4);
        }
    }
}

#[test]
fn floor_is_a_flat_disc_below_the_content() {
    let part = floor_disc();
    assert!(!part.textured);
    assert_eq!(part.base_color, FLOOR_COLOR);
    assert_well_formed(&part.mesh);
    for p in &part.mesh.positions {
        assert_eq!(p[1], FLOOR_Y);
        assert!((p[0] * p[0] + p[2] * p[2]).sqrt() <= FLOOR_RADIUS + 1e-4);
    }
    for n in &part.mesh.normals {
        assert_eq!(*n, [0.0, 1.0, 0.0]);
    }
}
