// CPU-side geometry for the three content kinds and the floor.
//
// Everything here is plain math so it can be exercised host-side; the GPU
// upload lives in `render`.

use smallvec::{smallvec, SmallVec};

use crate::constants::{
    CUTOUT_COLOR, CUTOUT_MARGIN, FIT_MAX, FIT_MIN, FLOOR_COLOR, FLOOR_RADIUS, FLOOR_SEGMENTS,
    FLOOR_Y, FRAME_COLOR, FRAME_DEPTH, FRAME_THICKNESS, FRAME_Z_OFFSET, PAINTING_HEIGHT,
    PAINTING_WIDTH, PLACEHOLDER_RADIUS, PLACEHOLDER_SEGMENTS,
};

#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// One drawable piece of a content object: geometry plus its material intent.
/// `textured` parts receive the artwork image when (and if) it loads.
#[derive(Debug, Clone)]
pub struct MeshPart {
    pub mesh: MeshData,
    pub base_color: [f32; 4],
    pub textured: bool,
}

pub type Parts = SmallVec<[MeshPart; 4]>;

/// Front-facing plane in the XY plane at depth `z`, image-style UVs (v down).
pub fn plane(width: f32, height: f32, z: f32) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    MeshData {
        positions: vec![
            [-hw, hh, z],
            [hw, hh, z],
            [hw, -hh, z],
            [-hw, -hh, z],
        ],
        normals: vec![[0.0, 0.0, 1.0]; 4],
        uvs: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        indices: vec![0, 3, 2, 0, 2, 1],
    }
}

/// Axis-aligned box centered at `center`. `inverted` flips the normals so the
/// interior faces read as the lit side (the frame's see-through cutout).
pub fn box_mesh(width: f32, height: f32, depth: f32, center: [f32; 3], inverted: bool) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let hd = depth * 0.5;
    // (normal, up, right) per face
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, -1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
    ];
    let half = [hw, hh, hd];
    let mut mesh = MeshData::default();
    for (normal, up, right) in faces {
        let base = mesh.positions.len() as u32;
        for (u, v) in [(-1.0f32, 1.0f32), (1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
            let mut p = [0.0f32; 3];
            for axis in 0..3 {
                p[axis] = center[axis]
                    + (normal[axis] + right[axis] * u + up[axis] * v) * half[axis];
            }
            mesh.positions.push(p);
            let n = if inverted {
                [-normal[0], -normal[1], -normal[2]]
            } else {
                normal
            };
            mesh.normals.push(n);
            mesh.uvs.push([(u + 1.0) * 0.5, (1.0 - v) * 0.5]);
        }
        let order: [u32; 6] = if inverted {
            [0, 2, 3, 0, 1, 2]
        } else {
            [0, 3, 2, 0, 2, 1]
        };
        mesh.indices.extend(order.iter().map(|i| base + i));
    }
    mesh
}

/// UV sphere centered at the origin.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let phi = v * std::f32::consts::PI;
        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let theta = u * std::f32::consts::TAU;
            let x = phi.sin() * theta.cos();
            let y = phi.cos();
            let z = phi.sin() * theta.sin();
            mesh.positions.push([x * radius, y * radius, z * radius]);
            mesh.normals.push([x, y, z]);
            mesh.uvs.push([u, v]);
        }
    }
    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            mesh.indices.extend([a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    mesh
}

/// Flat disc facing +Y at height `y`.
pub fn disc_y(radius: f32, segments: u32, y: f32) -> MeshData {
    let mut mesh = MeshData {
        positions: vec![[0.0, y, 0.0]],
        normals: vec![[0.0, 1.0, 0.0]],
        uvs: vec![[0.5, 0.5]],
        indices: Vec::new(),
    };
    for seg in 0..=segments {
        let theta = seg as f32 / segments as f32 * std::f32::consts::TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.positions.push([cos * radius, y, sin * radius]);
        mesh.normals.push([0.0, 1.0, 0.0]);
        mesh.uvs.push([(cos + 1.0) * 0.5, (sin + 1.0) * 0.5]);
    }
    for seg in 1..=segments {
        mesh.indices.extend([0, seg, seg + 1]);
    }
    mesh
}

/// Painting content: textured canvas plane, enclosing frame box, and a
/// slightly oversized dark inner cutout so the canvas reads as inset.
pub fn painting_with_frame() -> Parts {
    let canvas = MeshPart {
        mesh: plane(PAINTING_WIDTH, PAINTING_HEIGHT, 0.0),
        base_color: [1.0, 1.0, 1.0, 1.0],
        textured: true,
    };
    let frame = MeshPart {
        mesh: box_mesh(
            PAINTING_WIDTH + FRAME_THICKNESS * 2.0,
            PAINTING_HEIGHT + FRAME_THICKNESS * 2.0,
            FRAME_DEPTH,
            [0.0, 0.0, FRAME_Z_OFFSET],
            false,
        ),
        base_color: FRAME_COLOR,
        textured: false,
    };
    let cutout = MeshPart {
        mesh: box_mesh(
            PAINTING_WIDTH + CUTOUT_MARGIN,
            PAINTING_HEIGHT + CUTOUT_MARGIN,
            FRAME_DEPTH + CUTOUT_MARGIN,
            [0.0, 0.0, FRAME_Z_OFFSET],
            true,
        ),
        base_color: CUTOUT_COLOR,
        textured: false,
    };
    smallvec![canvas, frame, cutout]
}

/// Stand-in solid for sculptures without a registered model and for any
/// non-painting category.
pub fn placeholder_solid() -> Parts {
    smallvec![MeshPart {
        mesh: uv_sphere(PLACEHOLDER_RADIUS, PLACEHOLDER_SEGMENTS, PLACEHOLDER_SEGMENTS),
        base_color: [1.0, 1.0, 1.0, 1.0],
        textured: true,
    }]
}

pub fn floor_disc() -> MeshPart {
    MeshPart {
        mesh: disc_y(FLOOR_RADIUS, FLOOR_SEGMENTS, FLOOR_Y),
        base_color: FLOOR_COLOR,
        textured: false,
    }
}

/// Axis-aligned bounds of a position set; `None` when empty.
pub fn aabb(positions: &[[f32; 3]]) -> Option<([f32; 3], [f32; 3])> {
    let first = positions.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in positions {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    Some((min, max))
}

pub fn max_dimension(min: [f32; 3], max: [f32; 3]) -> f32 {
    (max[0] - min[0]).max(max[1] - min[1]).max(max[2] - min[2])
}

/// Uniform scale that brings a model's largest dimension into
/// `[FIT_MIN, FIT_MAX]`: small models scale up, large ones scale down,
/// in-range ones are untouched.
pub fn fit_scale(max_dim: f32) -> f32 {
    if !max_dim.is_finite() || max_dim <= 0.0 {
        return 1.0;
    }
    if max_dim < FIT_MIN {
        FIT_MIN / max_dim
    } else if max_dim > FIT_MAX {
        FIT_MAX / max_dim
    } else {
        1.0
    }
}
