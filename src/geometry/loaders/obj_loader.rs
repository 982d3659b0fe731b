/// OBJ 文件加载器
///
/// 使用 tobj crate 加载 Wavefront OBJ 格式的3D模型。
/// 每个 OBJ 对象生成一个网格节点，材质名取自 `usemtl`，颜色取自 MTL（若能加载），
/// 缺失的法线会按面重建。
use super::MeshLoader;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::math_utils::reconstruct_normals;
use crate::geometry::mesh::MeshData;
use crate::geometry::vertex::Vertex;
use crate::math::Color;
use crate::scene::{Material, Node};
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;

/// OBJ 格式加载器
///
/// # 特性
///
/// - 使用 tobj crate 解析 OBJ 文件
/// - 自动三角化，使用单一索引
/// - MTL 缺失时只记录警告，材质名仍取自 `usemtl`
/// - 自动重建缺失的法线
///
/// # 使用示例
///
/// ```rust,no_run
/// use model_viewer::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let root = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// println!("加载了 {} 个网格", root.mesh_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ObjLoader;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,  // 自动三角化
        single_index: true, // 使用单一索引
        ..Default::default()
    }
}

/// 占位材质库的名称，由加载器注入到 OBJ 开头
const USEMTL_LIBRARY: &str = "<usemtl>";

/// 收集 `usemtl` 引用的材质名，按首次出现顺序去重
fn usemtl_names(data: &[u8]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for line in data.lines().map_while(std::result::Result::ok) {
        if let Some(("usemtl", name)) = line.trim().split_once(char::is_whitespace) {
            let name = name.trim();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// 只有名称的材质库。真实 MTL 在其后加载，同名条目会覆盖这里的索引。
fn placeholder_library(names: &[String]) -> tobj::MTLLoadResult {
    let materials = names
        .iter()
        .map(|name| tobj::Material {
            name: name.clone(),
            ..Default::default()
        })
        .collect();
    let map = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect();
    Ok((materials, map))
}

impl ObjLoader {
    /// 解析 OBJ 数据
    ///
    /// `mtl_loader` 加载 `mtllib` 引用的真实材质库。
    fn parse<F>(name: &str, data: &[u8], mtl_loader: F) -> Result<Node>
    where
        F: Fn(&Path) -> tobj::MTLLoadResult,
    {
        let names = usemtl_names(data);
        let header = if names.is_empty() {
            String::new()
        } else {
            format!("mtllib {}\n", USEMTL_LIBRARY)
        };
        let mut reader = BufReader::new(Cursor::new(header.into_bytes()).chain(data));

        let (models, materials) = tobj::load_obj_buf(&mut reader, &load_options(), |path| {
            if path == Path::new(USEMTL_LIBRARY) {
                return placeholder_library(&names);
            }
            mtl_loader(path).map_err(|e| {
                tracing::warn!("OBJ 材质库 '{}' 加载失败，只保留材质名: {}", path.display(), e);
                e
            })
        })
        .map_err(|e| MeshLoadError::ParseError(format!("tobj 解析失败: {}", e)))?;

        Self::build_tree(name, models, materials)
    }

    /// 把 tobj 的结果组装成节点树
    fn build_tree(
        name: &str,
        models: Vec<tobj::Model>,
        materials: std::result::Result<Vec<tobj::Material>, tobj::LoadError>,
    ) -> Result<Node> {
        let materials = materials.unwrap_or_else(|e| {
            tracing::warn!("OBJ 材质库加载失败，使用默认材质: {}", e);
            Vec::new()
        });

        let mut root = Node::group(name);

        for model in models {
            let mesh = &model.mesh;

            let positions = &mesh.positions;
            let normals = &mesh.normals;
            let texcoords = &mesh.texcoords;

            if positions.len() % 3 != 0 {
                return Err(MeshLoadError::InvalidGeometry(format!(
                    "顶点位置数据不完整: {} 个浮点数",
                    positions.len()
                ))
                .into());
            }

            let vertex_count = positions.len() / 3;
            let has_normals = normals.len() >= vertex_count * 3 && !normals.is_empty();

            let mut mesh_data = MeshData::with_capacity(vertex_count, mesh.indices.len());
            mesh_data.name = Some(model.name.clone());

            for i in 0..vertex_count {
                let position = [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]];

                let normal = if has_normals {
                    [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]]
                } else {
                    [0.0, 0.0, 0.0]
                };

                let texcoord = if texcoords.len() >= (i + 1) * 2 {
                    [texcoords[i * 2], texcoords[i * 2 + 1]]
                } else {
                    [0.0, 0.0]
                };

                mesh_data.vertices.push(Vertex::new(position, normal, texcoord));
            }
            mesh_data.indices.extend_from_slice(&mesh.indices);

            mesh_data
                .validate()
                .map_err(MeshLoadError::ValidationError)?;

            if !has_normals && !mesh_data.is_empty() {
                tracing::debug!("OBJ 对象 '{}' 缺少法线数据，正在重建", model.name);
                reconstruct_normals(&mut mesh_data.vertices, &mesh_data.indices);
            }

            let material = match mesh.material_id.and_then(|id| materials.get(id)) {
                Some(mtl) => Material::with_color(
                    mtl.name.clone(),
                    mtl.diffuse.map(Color::from_array).unwrap_or(Color::WHITE),
                ),
                None => Material::default(),
            };

            root.add(Node::mesh(model.name.clone(), mesh_data, material));
        }

        tracing::info!(
            "成功加载 OBJ: {} 个对象, {} 个材质",
            root.children.len(),
            materials.len()
        );

        Ok(root)
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<Node> {
        // 检查文件是否存在
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let data = std::fs::read(path)
            .map_err(|e| MeshLoadError::ParseError(format!("读取 OBJ 文件失败: {}", e)))?;

        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Unnamed");
        let base = path.parent().unwrap_or(Path::new(""));
        Self::parse(name, &data, |mtl_path| tobj::load_mtl(base.join(mtl_path)))
    }

    fn load_from_memory(data: &[u8]) -> Result<Node> {
        // 内存中没有 MTL 可供引用
        Self::parse("Unnamed", data, |_| Err(tobj::LoadError::OpenFileFailed))
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;

    const TWO_OBJECTS: &str = "\
o first
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
o second
v 0 0 1
v 1 0 1
v 0 1 1
vn 0 0 1
f 5//1 6//1 7//1
";

    #[test]
    fn test_supported_extensions() {
        let exts = ObjLoader::supported_extensions();
        assert_eq!(exts, &["obj"]);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ObjLoader::load_from_file(Path::new("nonexistent.obj"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_memory_objects() {
        let root = ObjLoader::load_from_memory(TWO_OBJECTS.as_bytes()).unwrap();
        assert_eq!(root.children.len(), 2);

        let first = root.children[0].as_mesh().unwrap();
        // 四边形被三角化
        assert_eq!(first.geometry.triangle_count(), 2);
        // 没有 MTL，材质名为空
        assert_eq!(first.material.name, "");

        let second = root.children[1].as_mesh().unwrap();
        assert_eq!(second.geometry.vertex_count(), 3);
        assert_eq!(second.geometry.vertices[0].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_normals_reconstructed() {
        let root = ObjLoader::load_from_memory(TWO_OBJECTS.as_bytes()).unwrap();
        let first = root.children[0].as_mesh().unwrap();
        for v in &first.geometry.vertices {
            assert!((v.normal[2] - 1.0).abs() < 1e-5);
        }
    }

    const USEMTL_OBJECTS: &str = "\
mtllib parts.mtl
o bolt
v 0 0 0
v 1 0 0
v 0 1 0
usemtl steel
f 1 2 3
o grip
v 0 0 1
v 1 0 1
v 0 1 1
usemtl rubber
f 4 5 6
";

    #[test]
    fn test_usemtl_names_without_mtl() {
        let root = ObjLoader::load_from_memory(USEMTL_OBJECTS.as_bytes()).unwrap();
        let names: Vec<&str> = root
            .children
            .iter()
            .map(|c| c.as_mesh().unwrap().material.name.as_str())
            .collect();
        assert_eq!(names, vec!["steel", "rubber"]);
        assert_eq!(root.children[0].as_mesh().unwrap().material.color, Color::WHITE);
    }

    #[test]
    fn test_usemtl_names_collected_once() {
        let names = usemtl_names(b"usemtl a\nf 1 2 3\n  usemtl   b \nusemtl a\nusemtlx c\n");
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_load_from_file_with_mtl() {
        let dir = std::env::temp_dir().join(format!("model_viewer_obj_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("parts.mtl"), "newmtl steel\nKd 0.5 0.25 1.0\n").unwrap();
        let obj_path = dir.join("parts.obj");
        std::fs::write(&obj_path, USEMTL_OBJECTS).unwrap();

        let root = ObjLoader::load_from_file(&obj_path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(root.name(), "parts");
        // MTL 中的颜色覆盖占位材质，缺失的 rubber 仍保留名称
        let bolt = root.children[0].as_mesh().unwrap();
        assert_eq!(bolt.material.name, "steel");
        assert_eq!(bolt.material.color, Color::rgb(0.5, 0.25, 1.0));
        let grip = root.children[1].as_mesh().unwrap();
        assert_eq!(grip.material.name, "rubber");
        assert_eq!(grip.material.color, Color::WHITE);
    }
}
