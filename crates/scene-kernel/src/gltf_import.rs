//! Binary glTF import.
//!
//! Parses `.glb` (and embedded-buffer `.gltf`) bytes into a
//! [`SceneDocument`]. Assets must be self-contained: buffers and images may
//! live in the binary chunk or in `data:` URIs, but references to external
//! files are rejected because the workshop runs on a single byte buffer.

use std::collections::HashMap;

use base64::Engine;
use tracing::{info, instrument};

use crate::traits::SceneImporter;
use crate::types::{ImageData, MaterialData, PartNode, Primitive, SceneDocument, SceneError};

#[derive(Debug, Clone, Copy, Default)]
pub struct GltfImporter;

impl GltfImporter {
    pub fn new() -> Self {
        Self
    }
}

impl SceneImporter for GltfImporter {
    #[instrument(skip(self, bytes), fields(byte_len = bytes.len()))]
    fn import(&self, bytes: &[u8]) -> Result<SceneDocument, SceneError> {
        let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| SceneError::Parse {
            reason: e.to_string(),
        })?;

        let buffers = resolve_buffers(&gltf)?;

        let source = gltf
            .default_scene()
            .or_else(|| gltf.scenes().next())
            .ok_or_else(|| SceneError::Import {
                reason: "asset contains no scenes".into(),
            })?;

        let mut scene = SceneDocument {
            name: source.name().map(str::to_owned),
            ..SceneDocument::default()
        };
        // glTF image index -> slot in scene.images, filled lazily so only
        // images a material actually references survive the import.
        let mut image_slots: HashMap<usize, usize> = HashMap::new();

        for node in source.nodes() {
            collect_node(&node, &buffers, &mut scene, &mut image_slots)?;
        }

        info!(
            parts = scene.parts.len(),
            images = scene.images.len(),
            "scene imported"
        );
        Ok(scene)
    }
}

fn resolve_buffers(gltf: &gltf::Gltf) -> Result<Vec<Vec<u8>>, SceneError> {
    let mut data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => match gltf.blob.as_deref() {
                Some(blob) => data.push(blob.to_vec()),
                None => return Err(SceneError::MissingBlob),
            },
            gltf::buffer::Source::Uri(uri) => {
                if uri.starts_with("data:") {
                    data.push(decode_data_uri(uri)?);
                } else {
                    return Err(SceneError::ExternalResource {
                        uri: uri.to_string(),
                    });
                }
            }
        }
    }
    Ok(data)
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>, SceneError> {
    let encoded = uri
        .split_once(";base64,")
        .map(|(_, rest)| rest)
        .ok_or_else(|| SceneError::UnsupportedDataUri {
            uri: truncate_uri(uri),
        })?;
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| SceneError::UnsupportedDataUri {
            uri: truncate_uri(uri),
        })
}

// Data URIs embed whole buffers; keep error payloads readable.
fn truncate_uri(uri: &str) -> String {
    uri.chars().take(48).collect()
}

fn collect_node(
    node: &gltf::Node,
    buffers: &[Vec<u8>],
    scene: &mut SceneDocument,
    image_slots: &mut HashMap<usize, usize>,
) -> Result<(), SceneError> {
    if let Some(mesh) = node.mesh() {
        let name = node
            .name()
            .or_else(|| mesh.name())
            .map(str::to_owned)
            .unwrap_or_else(|| format!("part_{}", node.index()));

        let mut primitives = Vec::new();
        for primitive in mesh.primitives() {
            primitives.push(read_primitive(
                &primitive,
                &name,
                buffers,
                scene,
                image_slots,
            )?);
        }

        scene.parts.push(PartNode {
            name,
            matrix: flatten_transform(node),
            primitives,
        });
    }

    for child in node.children() {
        collect_node(&child, buffers, scene, image_slots)?;
    }
    Ok(())
}

fn read_primitive(
    primitive: &gltf::Primitive,
    part: &str,
    buffers: &[Vec<u8>],
    scene: &mut SceneDocument,
    image_slots: &mut HashMap<usize, usize>,
) -> Result<Primitive, SceneError> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.as_slice()));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .ok_or_else(|| SceneError::MissingPositions {
            part: part.to_string(),
        })?
        .collect();
    let normals = reader.read_normals().map(|iter| iter.collect());
    let tex_coords = reader
        .read_tex_coords(0)
        .map(|iter| iter.into_f32().collect());
    let indices = reader.read_indices().map(|iter| iter.into_u32().collect());

    // Each primitive gets its own material instance, so recoloring one part
    // never bleeds into another that shared a material in the source file.
    let material = read_material(&primitive.material(), buffers, scene, image_slots)?;

    Ok(Primitive {
        positions,
        normals,
        tex_coords,
        indices,
        material,
    })
}

fn read_material(
    material: &gltf::Material,
    buffers: &[Vec<u8>],
    scene: &mut SceneDocument,
    image_slots: &mut HashMap<usize, usize>,
) -> Result<MaterialData, SceneError> {
    let pbr = material.pbr_metallic_roughness();
    let base_color_image = match pbr.base_color_texture() {
        Some(info) => Some(intern_image(
            &info.texture().source(),
            buffers,
            scene,
            image_slots,
        )?),
        None => None,
    };

    Ok(MaterialData {
        name: material.name().map(str::to_owned),
        base_color: pbr.base_color_factor(),
        native_color: pbr.base_color_factor(),
        metallic: pbr.metallic_factor(),
        roughness: pbr.roughness_factor(),
        base_color_image,
    })
}

fn intern_image(
    image: &gltf::Image,
    buffers: &[Vec<u8>],
    scene: &mut SceneDocument,
    image_slots: &mut HashMap<usize, usize>,
) -> Result<usize, SceneError> {
    if let Some(&slot) = image_slots.get(&image.index()) {
        return Ok(slot);
    }

    let data = match image.source() {
        gltf::image::Source::View { view, mime_type } => {
            let buffer = buffers
                .get(view.buffer().index())
                .ok_or(SceneError::MissingBlob)?;
            let start = view.offset();
            let end = start + view.length();
            let bytes = buffer.get(start..end).ok_or_else(|| SceneError::Parse {
                reason: format!("image view out of range in buffer {}", view.buffer().index()),
            })?;
            ImageData {
                bytes: bytes.to_vec(),
                mime: mime_type.to_string(),
            }
        }
        gltf::image::Source::Uri { uri, mime_type } => {
            if !uri.starts_with("data:") {
                return Err(SceneError::ExternalResource {
                    uri: uri.to_string(),
                });
            }
            let mime = mime_type
                .map(str::to_owned)
                .or_else(|| mime_of_data_uri(uri))
                .unwrap_or_else(|| "image/png".to_string());
            ImageData {
                bytes: decode_data_uri(uri)?,
                mime,
            }
        }
    };

    let slot = scene.images.len();
    scene.images.push(data);
    image_slots.insert(image.index(), slot);
    Ok(slot)
}

fn mime_of_data_uri(uri: &str) -> Option<String> {
    let rest = uri.strip_prefix("data:")?;
    let (mime, _) = rest.split_once(';')?;
    if mime.is_empty() {
        None
    } else {
        Some(mime.to_string())
    }
}

fn flatten_transform(node: &gltf::Node) -> Option<[f32; 16]> {
    const IDENTITY: [[f32; 4]; 4] = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    let m = node.transform().matrix();
    if m == IDENTITY {
        return None;
    }
    let mut flat = [0.0f32; 16];
    for (col, column) in m.iter().enumerate() {
        for (row, v) in column.iter().enumerate() {
            flat[col * 4 + row] = *v;
        }
    }
    Some(flat)
}
