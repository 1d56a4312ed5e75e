//! Asset export: minimal glTF 2.0 writer plus GLB container.
//!
//! The document is rebuilt from the [`SceneDocument`] alone — geometry,
//! painted material colors, node transforms, and embedded images — so the
//! output is self-contained.
//!
//! GLB layout:
//! - 12 bytes: header — magic `glTF` (0x46546C67 LE), version 2, total length
//! - JSON chunk: u32 LE length, tag 0x4E4F534A (`JSON`), payload space-padded
//!   to a 4-byte boundary
//! - BIN chunk (only when buffer data exists): u32 LE length, tag 0x004E4942
//!   (`BIN\0`), payload zero-padded to a 4-byte boundary

use std::collections::BTreeMap;

use base64::Engine;
use scene_kernel::{PartNode, SceneDocument};
use serde::Serialize;
use tracing::info;

use crate::errors::ExportError;

/// MIME type of a binary GLB payload.
pub const GLB_MIME: &str = "model/gltf-binary";
/// MIME type of the JSON fallback payload.
pub const GLTF_MIME: &str = "model/gltf+json";

const GLB_MAGIC: u32 = 0x4654_6C67;
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

const COMPONENT_F32: u32 = 5126;
const COMPONENT_U32: u32 = 5125;
const TARGET_ARRAY_BUFFER: u32 = 34962;
const TARGET_ELEMENT_ARRAY: u32 = 34963;

/// Deterministic download name for an exported asset.
pub fn asset_file_name(product: &str, binary: bool) -> String {
    let ext = if binary { "glb" } else { "gltf" };
    format!("{}_Asset.{}", product, ext)
}

/// Export the scene as a self-contained binary GLB.
///
/// An empty scene is valid and produces a minimal asset with no geometry.
pub fn export_glb(scene: &SceneDocument) -> Result<Vec<u8>, ExportError> {
    let mut builder = GltfBuilder::new(scene);
    builder.add_parts(scene)?;
    let (doc, bin) = builder.finish(scene, None);

    let json = serde_json::to_string(&doc).map_err(|e| ExportError::JsonEncode(e.to_string()))?;
    let payload = wrap_glb(&json, &bin);
    info!(
        parts = scene.parts.len(),
        bytes = payload.len(),
        "exported glb asset"
    );
    Ok(payload)
}

/// Export the scene as glTF JSON with the buffer embedded as a data URI.
///
/// The structured fallback for hosts that request non-binary output; the
/// document is the same as [`export_glb`] produces, only the buffer
/// placement differs.
pub fn export_gltf_json(scene: &SceneDocument) -> Result<String, ExportError> {
    let mut builder = GltfBuilder::new(scene);
    builder.add_parts(scene)?;

    let uri = if builder.bin.is_empty() {
        None
    } else {
        Some(format!(
            "data:application/octet-stream;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&builder.bin)
        ))
    };

    let (doc, _) = builder.finish(scene, uri);
    serde_json::to_string(&doc).map_err(|e| ExportError::JsonEncode(e.to_string()))
}

// ---- glTF 2.0 JSON schema (the subset this exporter emits) ----

#[derive(Serialize)]
struct DocJson {
    asset: AssetJson,
    #[serde(skip_serializing_if = "Option::is_none")]
    scene: Option<usize>,
    scenes: Vec<SceneJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    nodes: Vec<NodeJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    meshes: Vec<MeshJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    materials: Vec<MaterialJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    textures: Vec<TextureJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<ImageJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    accessors: Vec<AccessorJson>,
    #[serde(rename = "bufferViews", skip_serializing_if = "Vec::is_empty")]
    buffer_views: Vec<BufferViewJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    buffers: Vec<BufferJson>,
}

#[derive(Serialize)]
struct AssetJson {
    version: &'static str,
    generator: &'static str,
}

#[derive(Serialize)]
struct SceneJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    nodes: Vec<usize>,
}

#[derive(Serialize)]
struct NodeJson {
    name: String,
    mesh: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix: Option<[f32; 16]>,
}

#[derive(Serialize)]
struct MeshJson {
    name: String,
    primitives: Vec<PrimitiveJson>,
}

#[derive(Serialize)]
struct PrimitiveJson {
    attributes: BTreeMap<&'static str, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    indices: Option<usize>,
    material: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MaterialJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    pbr_metallic_roughness: PbrJson,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PbrJson {
    base_color_factor: [f32; 4],
    metallic_factor: f32,
    roughness_factor: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_color_texture: Option<TextureRefJson>,
}

#[derive(Serialize)]
struct TextureRefJson {
    index: usize,
}

#[derive(Serialize)]
struct TextureJson {
    source: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageJson {
    buffer_view: usize,
    mime_type: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccessorJson {
    buffer_view: usize,
    component_type: u32,
    count: usize,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<Vec<f32>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BufferViewJson {
    buffer: usize,
    byte_offset: usize,
    byte_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BufferJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    uri: Option<String>,
    byte_length: usize,
}

// ---- document assembly ----

struct GltfBuilder {
    bin: Vec<u8>,
    buffer_views: Vec<BufferViewJson>,
    accessors: Vec<AccessorJson>,
    nodes: Vec<NodeJson>,
    meshes: Vec<MeshJson>,
    materials: Vec<MaterialJson>,
    textures: Vec<TextureJson>,
    images: Vec<ImageJson>,
}

impl GltfBuilder {
    /// Start a document with every scene image written up front, one
    /// texture per image, so material texture indices line up 1:1 with the
    /// scene's image table.
    fn new(scene: &SceneDocument) -> Self {
        let mut builder = Self {
            bin: Vec::new(),
            buffer_views: Vec::new(),
            accessors: Vec::new(),
            nodes: Vec::new(),
            meshes: Vec::new(),
            materials: Vec::new(),
            textures: Vec::new(),
            images: Vec::new(),
        };
        for image in &scene.images {
            let view = builder.push_view(&image.bytes, None);
            builder.images.push(ImageJson {
                buffer_view: view,
                mime_type: image.mime.clone(),
            });
            builder.textures.push(TextureJson {
                source: builder.images.len() - 1,
            });
        }
        builder
    }

    fn add_parts(&mut self, scene: &SceneDocument) -> Result<(), ExportError> {
        for part in &scene.parts {
            self.add_part(part, scene)?;
        }
        Ok(())
    }

    fn add_part(&mut self, part: &PartNode, scene: &SceneDocument) -> Result<(), ExportError> {
        let mut primitives = Vec::new();
        for prim in &part.primitives {
            // A primitive without geometry has nothing to carry.
            if prim.positions.is_empty() {
                continue;
            }

            let mut attributes = BTreeMap::new();
            attributes.insert("POSITION", self.push_positions(&prim.positions));
            if let Some(normals) = &prim.normals {
                attributes.insert("NORMAL", self.push_vec3(normals));
            }
            if let Some(tex_coords) = &prim.tex_coords {
                attributes.insert("TEXCOORD_0", self.push_vec2(tex_coords));
            }
            let indices = prim.indices.as_deref().map(|idx| self.push_indices(idx));

            let base_color_texture = match prim.material.base_color_image {
                Some(index) if index < scene.images.len() => {
                    Some(TextureRefJson { index })
                }
                Some(index) => {
                    return Err(ExportError::MissingImage {
                        index,
                        count: scene.images.len(),
                    })
                }
                None => None,
            };
            self.materials.push(MaterialJson {
                name: prim.material.name.clone(),
                pbr_metallic_roughness: PbrJson {
                    base_color_factor: prim.material.base_color,
                    metallic_factor: prim.material.metallic,
                    roughness_factor: prim.material.roughness,
                    base_color_texture,
                },
            });

            primitives.push(PrimitiveJson {
                attributes,
                indices,
                material: self.materials.len() - 1,
            });
        }

        if primitives.is_empty() {
            return Ok(());
        }
        self.meshes.push(MeshJson {
            name: part.name.clone(),
            primitives,
        });
        self.nodes.push(NodeJson {
            name: part.name.clone(),
            mesh: self.meshes.len() - 1,
            matrix: part.matrix,
        });
        Ok(())
    }

    /// Append raw bytes as a buffer view, 4-byte aligned.
    fn push_view(&mut self, data: &[u8], target: Option<u32>) -> usize {
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        let byte_offset = self.bin.len();
        self.bin.extend_from_slice(data);
        self.buffer_views.push(BufferViewJson {
            buffer: 0,
            byte_offset,
            byte_length: data.len(),
            target,
        });
        self.buffer_views.len() - 1
    }

    /// POSITION accessor with the min/max bounds the format requires.
    fn push_positions(&mut self, positions: &[[f32; 3]]) -> usize {
        let mut min = positions[0];
        let mut max = positions[0];
        for p in positions {
            for c in 0..3 {
                min[c] = min[c].min(p[c]);
                max[c] = max[c].max(p[c]);
            }
        }
        let view = self.push_view(&flatten_f32(positions.iter().flatten()), Some(TARGET_ARRAY_BUFFER));
        self.accessors.push(AccessorJson {
            buffer_view: view,
            component_type: COMPONENT_F32,
            count: positions.len(),
            kind: "VEC3",
            min: Some(min.to_vec()),
            max: Some(max.to_vec()),
        });
        self.accessors.len() - 1
    }

    fn push_vec3(&mut self, values: &[[f32; 3]]) -> usize {
        let view = self.push_view(&flatten_f32(values.iter().flatten()), Some(TARGET_ARRAY_BUFFER));
        self.accessors.push(AccessorJson {
            buffer_view: view,
            component_type: COMPONENT_F32,
            count: values.len(),
            kind: "VEC3",
            min: None,
            max: None,
        });
        self.accessors.len() - 1
    }

    fn push_vec2(&mut self, values: &[[f32; 2]]) -> usize {
        let view = self.push_view(&flatten_f32(values.iter().flatten()), Some(TARGET_ARRAY_BUFFER));
        self.accessors.push(AccessorJson {
            buffer_view: view,
            component_type: COMPONENT_F32,
            count: values.len(),
            kind: "VEC2",
            min: None,
            max: None,
        });
        self.accessors.len() - 1
    }

    fn push_indices(&mut self, indices: &[u32]) -> usize {
        let mut bytes = Vec::with_capacity(indices.len() * 4);
        for i in indices {
            bytes.extend_from_slice(&i.to_le_bytes());
        }
        let view = self.push_view(&bytes, Some(TARGET_ELEMENT_ARRAY));
        self.accessors.push(AccessorJson {
            buffer_view: view,
            component_type: COMPONENT_U32,
            count: indices.len(),
            kind: "SCALAR",
            min: None,
            max: None,
        });
        self.accessors.len() - 1
    }

    fn finish(self, scene: &SceneDocument, buffer_uri: Option<String>) -> (DocJson, Vec<u8>) {
        let buffers = if self.bin.is_empty() {
            Vec::new()
        } else {
            vec![BufferJson {
                uri: buffer_uri,
                byte_length: self.bin.len(),
            }]
        };
        let doc = DocJson {
            asset: AssetJson {
                version: "2.0",
                generator: "atelier",
            },
            scene: Some(0),
            scenes: vec![SceneJson {
                name: scene.name.clone(),
                nodes: (0..self.nodes.len()).collect(),
            }],
            nodes: self.nodes,
            meshes: self.meshes,
            materials: self.materials,
            textures: self.textures,
            images: self.images,
            accessors: self.accessors,
            buffer_views: self.buffer_views,
            buffers,
        };
        (doc, self.bin)
    }
}

fn flatten_f32<'a>(values: impl Iterator<Item = &'a f32>) -> Vec<u8> {
    let mut bytes = Vec::new();
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Wrap a glTF JSON document and its binary buffer into a GLB container.
fn wrap_glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json_chunk = json.as_bytes().to_vec();
    while json_chunk.len() % 4 != 0 {
        json_chunk.push(b' ');
    }
    let mut bin_chunk = bin.to_vec();
    while bin_chunk.len() % 4 != 0 {
        bin_chunk.push(0);
    }

    let mut total = 12 + 8 + json_chunk.len();
    if !bin_chunk.is_empty() {
        total += 8 + bin_chunk.len();
    }

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());

    out.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json_chunk);

    if !bin_chunk.is_empty() {
        out.extend_from_slice(&(bin_chunk.len() as u32).to_le_bytes());
        out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        out.extend_from_slice(&bin_chunk);
    }
    out
}
