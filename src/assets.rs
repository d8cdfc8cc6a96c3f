//! Asset loading: 2D image textures and binary glTF models, fetched by URL
//! and decoded into CPU-side data the renderer can upload.

use anyhow::{anyhow, bail, Context};
use glam::Mat4;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::mesh::{self, MeshData};

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow!("fetch {url}: {e:?}"))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow!("fetch {url}: not a Response: {e:?}"))?;
    if !resp.ok() {
        bail!("fetch {url}: HTTP {}", resp.status());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| anyhow!("{e:?}"))?)
        .await
        .map_err(|e| anyhow!("fetch {url}: body: {e:?}"))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Decoded RGBA8 pixels ready for texture upload.
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub fn decode_image(bytes: &[u8]) -> anyhow::Result<DecodedImage> {
    let img = image::load_from_memory(bytes)
        .context("decode image")?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(DecodedImage {
        width,
        height,
        rgba: img.into_raw(),
    })
}

pub async fn fetch_image(url: &str) -> anyhow::Result<DecodedImage> {
    let bytes = fetch_bytes(url).await?;
    decode_image(&bytes)
}

/// One glTF primitive flattened into world space, with its base color and
/// optional baked base-color texture.
pub struct ModelPart {
    pub mesh: MeshData,
    pub base_color: [f32; 4],
    pub texture: Option<DecodedImage>,
}

pub struct LoadedModel {
    pub parts: Vec<ModelPart>,
    /// Uniform normalization factor from the model's bounding box.
    pub scale: f32,
}

/// Parse a binary glTF and flatten its default scene: node transforms are
/// baked into the vertices, and the whole-model bounding box drives the
/// normalization scale.
pub fn parse_glb(bytes: &[u8]) -> anyhow::Result<LoadedModel> {
    let (document, buffers, images) = gltf::import_slice(bytes).context("parse glb")?;

    let mut parts = Vec::new();
    for scene in document.scenes() {
        for node in scene.nodes() {
            collect_node(&node, Mat4::IDENTITY, &buffers, &images, &mut parts);
        }
    }
    if parts.is_empty() {
        bail!("glb contains no mesh primitives");
    }

    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for part in &parts {
        if let Some((pmin, pmax)) = mesh::aabb(&part.mesh.positions) {
            for axis in 0..3 {
                min[axis] = min[axis].min(pmin[axis]);
                max[axis] = max[axis].max(pmax[axis]);
            }
        }
    }
    let max_dim = mesh::max_dimension(min, max);
    let scale = mesh::fit_scale(max_dim);
    if scale != 1.0 {
        log::info!("model max dimension {max_dim:.2}, normalizing by {scale:.3}");
    } else {
        log::info!("model max dimension {max_dim:.2} within range, no scaling");
    }

    Ok(LoadedModel { parts, scale })
}

fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
    out: &mut Vec<ModelPart>,
) {
    let model = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(gltf_mesh) = node.mesh() {
        for primitive in gltf_mesh.primitives() {
            match read_primitive(&primitive, model, buffers, images) {
                Ok(part) => out.push(part),
                Err(e) => log::warn!("skipping glb primitive: {e:#}"),
            }
        }
    }
    for child in node.children() {
        collect_node(&child, model, buffers, images, out);
    }
}

fn read_primitive(
    primitive: &gltf::Primitive,
    model: Mat4,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
) -> anyhow::Result<ModelPart> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|b| &b.0[..]));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .ok_or_else(|| anyhow!("primitive has no positions"))?
        .map(|p| {
            let v = model.transform_point3(p.into());
            [v.x, v.y, v.z]
        })
        .collect();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(idx) => idx.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let normals: Vec<[f32; 3]> = match reader.read_normals() {
        Some(normals) => normals
            .map(|n| {
                let v = model.transform_vector3(n.into()).normalize_or_zero();
                [v.x, v.y, v.z]
            })
            .collect(),
        None => flat_normals(&positions, &indices),
    };

    let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
        Some(uvs) => uvs.into_f32().collect(),
        None => vec![[0.0, 0.0]; positions.len()],
    };

    let pbr = primitive.material().pbr_metallic_roughness();
    let base_color = pbr.base_color_factor();
    let texture = pbr
        .base_color_texture()
        .and_then(|info| images.get(info.texture().source().index()))
        .and_then(image_to_rgba);

    Ok(ModelPart {
        mesh: MeshData {
            positions,
            normals,
            uvs,
            indices,
        },
        base_color,
        texture,
    })
}

fn image_to_rgba(data: &gltf::image::Data) -> Option<DecodedImage> {
    use gltf::image::Format;
    let rgba = match data.format {
        Format::R8G8B8A8 => data.pixels.clone(),
        Format::R8G8B8 => data
            .pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        other => {
            log::warn!("unsupported glb texture format {other:?}; leaving untextured");
            return None;
        }
    };
    Some(DecodedImage {
        width: data.width,
        height: data.height,
        rgba,
    })
}

/// Area-weighted vertex normals for primitives that ship without them.
fn flat_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![glam::Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = glam::Vec3::from(positions[a]);
        let pb = glam::Vec3::from(positions[b]);
        let pc = glam::Vec3::from(positions[c]);
        let n = (pb - pa).cross(pc - pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| {
            let v = n.normalize_or_zero();
            [v.x, v.y, v.z]
        })
        .collect()
}
