/// glTF 文件加载器
///
/// 使用 gltf crate 加载 glTF 2.0（`.gltf` 内嵌或外部缓冲区、`.glb`）。
/// 保留源文件的节点层级：每个 glTF 节点对应一个带局部变换的分组节点，
/// 每个三角形图元对应一个网格子节点。
use super::MeshLoader;
use crate::component::Transform;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::math_utils::reconstruct_normals;
use crate::geometry::mesh::MeshData;
use crate::geometry::vertex::Vertex;
use crate::math::Color;
use crate::scene::{Material, Node};
use std::path::Path;

/// glTF 格式加载器
pub struct GltfLoader;

impl GltfLoader {
    fn build_tree(name: &str, document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Result<Node> {
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| MeshLoadError::ValidationError("glTF 文件不包含场景".to_string()))?;

        let mut root = Node::group(name);
        for node in scene.nodes() {
            root.add(Self::build_node(&node, buffers)?);
        }

        tracing::info!(
            "成功加载 glTF: {} 个网格节点, {} 个材质",
            root.mesh_count(),
            document.materials().len()
        );

        Ok(root)
    }

    fn build_node(node: &gltf::Node, buffers: &[gltf::buffer::Data]) -> Result<Node> {
        let (translation, rotation, scale) = node.transform().decomposed();
        let mut group = Node::group(node.name().unwrap_or_default())
            .with_transform(Transform::from_trs(translation, rotation, scale));

        if let Some(mesh) = node.mesh() {
            let mesh_name = mesh.name().or(node.name()).unwrap_or_default();
            for primitive in mesh.primitives() {
                if primitive.mode() != gltf::mesh::Mode::Triangles {
                    tracing::warn!(
                        "跳过非三角形图元: mesh '{}' primitive {} ({:?})",
                        mesh_name,
                        primitive.index(),
                        primitive.mode()
                    );
                    continue;
                }
                if let Some(child) = Self::build_primitive(mesh_name, &primitive, buffers)? {
                    group.add(child);
                }
            }
        }

        for child in node.children() {
            group.add(Self::build_node(&child, buffers)?);
        }

        Ok(group)
    }

    fn build_primitive(
        mesh_name: &str,
        primitive: &gltf::Primitive,
        buffers: &[gltf::buffer::Data],
    ) -> Result<Option<Node>> {
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));

        let positions: Vec<[f32; 3]> = match reader.read_positions() {
            Some(positions) => positions.collect(),
            None => {
                tracing::warn!("跳过缺少 POSITION 属性的图元: mesh '{}'", mesh_name);
                return Ok(None);
            }
        };
        let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|n| n.collect());
        let texcoords: Option<Vec<[f32; 2]>> =
            reader.read_tex_coords(0).map(|t| t.into_f32().collect());

        let mut mesh_data = MeshData::with_name(mesh_name);
        mesh_data.vertices = positions
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                let normal = normals.as_ref().and_then(|n| n.get(i).copied()).unwrap_or_default();
                let texcoord = texcoords.as_ref().and_then(|t| t.get(i).copied()).unwrap_or_default();
                Vertex::new(position, normal, texcoord)
            })
            .collect();

        // 无索引图元使用顺序索引
        mesh_data.indices = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..mesh_data.vertices.len() as u32).collect(),
        };

        if mesh_data.indices.len() % 3 != 0 {
            return Err(MeshLoadError::InvalidGeometry(format!(
                "mesh '{}' 的索引数量 {} 不是 3 的倍数",
                mesh_name,
                mesh_data.indices.len()
            ))
            .into());
        }

        mesh_data
            .validate()
            .map_err(MeshLoadError::ValidationError)?;

        if normals.is_none() {
            reconstruct_normals(&mut mesh_data.vertices, &mesh_data.indices);
        }

        let gltf_material = primitive.material();
        let [r, g, b, a] = gltf_material.pbr_metallic_roughness().base_color_factor();
        let mut material = Material::with_color(
            gltf_material.name().unwrap_or_default(),
            Color::new(r, g, b, a),
        );
        material.double_sided = gltf_material.double_sided();

        Ok(Some(Node::mesh(mesh_name, mesh_data, material)))
    }
}

impl MeshLoader for GltfLoader {
    fn load_from_file(path: &Path) -> Result<Node> {
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let (document, buffers, _images) = gltf::import(path)
            .map_err(|e| MeshLoadError::ParseError(format!("glTF 解析失败: {}", e)))?;

        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Unnamed");
        Self::build_tree(name, &document, &buffers)
    }

    fn load_from_memory(data: &[u8]) -> Result<Node> {
        let (document, buffers, _images) = gltf::import_slice(data)
            .map_err(|e| MeshLoadError::ParseError(format!("glTF 解析失败: {}", e)))?;

        Self::build_tree("Unnamed", &document, &buffers)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["gltf", "glb"]
    }
}

/// 测试用的内嵌缓冲区 glTF：一个 1×1 的四边形（红色材质），
/// 外加一个会被跳过的线段图元。父节点平移 (10, 0, 0)，子节点缩放 2 倍。
#[cfg(test)]
pub(crate) const QUAD_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0] } ],
  "nodes": [
    { "name": "root", "translation": [10.0, 0.0, 0.0], "children": [1] },
    { "name": "quad", "mesh": 0, "scale": [2.0, 2.0, 2.0] }
  ],
  "meshes": [
    {
      "name": "quad",
      "primitives": [
        { "attributes": { "POSITION": 0 }, "indices": 1, "material": 0 },
        { "attributes": { "POSITION": 0 }, "mode": 1 }
      ]
    }
  ],
  "materials": [
    { "name": "red", "pbrMetallicRoughness": { "baseColorFactor": [1.0, 0.0, 0.0, 1.0] } }
  ],
  "buffers": [
    {
      "byteLength": 60,
      "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAACAPwAAgD8AAAAAAAAAAAAAgD8AAAAAAAABAAIAAAACAAMA"
    }
  ],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 48, "target": 34962 },
    { "buffer": 0, "byteOffset": 48, "byteLength": 12, "target": 34963 }
  ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 4, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
    { "bufferView": 1, "componentType": 5123, "count": 6, "type": "SCALAR" }
  ]
}"#;
