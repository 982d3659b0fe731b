//! 加载后规范化
//!
//! 把加载器给出的任意层级节点树变成扁平结构：
//!
//! ```text
//! Group
//! ├── LineSegments  (每个源网格一条黑色轮廓线)
//! ├── ...
//! └── Mesh          (每种材质一个合并网格，世界变换已烘焙)
//! ```
//!
//! 同一材质名的网格归入同一个桶，桶的顺序按首次出现排列。

use std::collections::HashMap;

use crate::component::Component;
use crate::geometry::edges::extract_edges;
use crate::geometry::mesh::MeshData;
use crate::math::Matrix4;
use crate::scene::{LineMaterial, Material, Node, NodeKind, PolygonOffset};

/// 轮廓线提取使用的二面角阈值（度）。180° 时只保留边界边。
pub const OUTLINE_THRESHOLD_ANGLE: f32 = 180.0;

/// 同一材质名下的源网格
struct MaterialBucket {
    material: Material,
    geometries: Vec<MeshData>,
}

/// 把整棵树设为可见，包括线段和源文件中隐藏的节点
pub fn force_visible(node: &mut Node) {
    node.traverse_mut(&mut |n| n.visible = true);
}

/// 规范化原始节点树
pub fn normalize(mut raw: Node) -> Node {
    let _span = tracing::debug_span!("normalize", model = raw.name()).entered();

    force_visible(&mut raw);

    // 按材质名分桶，几何体烘焙世界变换
    let mut bucket_index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<MaterialBucket> = Vec::new();
    raw.traverse_with_world(&Matrix4::identity(), &mut |node, world| {
        if let NodeKind::Mesh(mesh) = &node.kind {
            let baked = mesh.geometry.transformed(world);
            match bucket_index.get(&mesh.material.name) {
                Some(&i) => buckets[i].geometries.push(baked),
                None => {
                    bucket_index.insert(mesh.material.name.clone(), buckets.len());
                    buckets.push(MaterialBucket {
                        material: mesh.material.clone(),
                        geometries: vec![baked],
                    });
                }
            }
        }
    });

    let mut root = Node::group(raw.name());
    let mut merged_count = 0;

    for bucket in buckets {
        for geometry in &bucket.geometries {
            let edges = extract_edges(geometry, OUTLINE_THRESHOLD_ANGLE);
            let name = geometry.name.clone().unwrap_or_default();
            root.add(Node::line_segments(name, edges, LineMaterial::outline()));
        }

        let Some(merged) = MeshData::merge(&bucket.geometries) else {
            tracing::debug!("材质 '{}' 的合并结果为空，只保留轮廓线", bucket.material.name);
            continue;
        };

        let mut material = bucket.material;
        material.polygon_offset = Some(PolygonOffset::default());

        let mut node = Node::mesh(material.name.clone(), merged, material);
        if let Some(mesh) = node.as_mesh_mut() {
            mesh.cast_shadow = true;
            mesh.receive_shadow = true;
        }
        root.add(node);
        merged_count += 1;
    }

    tracing::debug!(
        "规范化完成: {} 个合并网格, {} 条轮廓线",
        merged_count,
        root.line_count()
    );

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Transform;
    use crate::geometry::loaders::gltf_loader::QUAD_GLTF;
    use crate::geometry::edges::LineGeometry;
    use crate::geometry::loaders::{GltfLoader, MeshLoader, ObjLoader};
    use crate::math::{Color, Vector3};

    fn mesh(name: &str, material: &str, offset: f32) -> Node {
        Node::mesh(
            name,
            MeshData::cuboid(1.0, 1.0, 1.0),
            Material::with_color(material, Color::rgb(0.2, 0.4, 0.6)),
        )
        .with_transform(Transform::from_position(Vector3::new(offset, 0.0, 0.0)))
    }

    fn raw_tree() -> Node {
        let mut root = Node::group("part");
        let mut hidden = Node::group("hidden");
        hidden.visible = false;
        hidden.add(mesh("a", "steel", 0.0));
        hidden.add(mesh("b", "rubber", 2.0));
        root.add(hidden);
        root.add(mesh("c", "steel", 4.0));
        root
    }

    #[test]
    fn test_buckets_by_material() {
        let normalized = normalize(raw_tree());

        // 3 条轮廓线 + 2 个合并网格，全部是直接子节点
        assert_eq!(normalized.children.len(), 5);
        assert_eq!(normalized.line_count(), 3);
        assert_eq!(normalized.mesh_count(), 2);
        assert!(normalized.children.iter().all(|c| c.children.is_empty()));

        let names: Vec<&str> = normalized
            .children
            .iter()
            .filter_map(|c| c.as_mesh())
            .map(|m| m.material.name.as_str())
            .collect();
        assert_eq!(names, vec!["steel", "rubber"]);
    }

    #[test]
    fn test_merged_mesh_properties() {
        let normalized = normalize(raw_tree());
        let steel = normalized.children.iter().find_map(|c| c.as_mesh()).unwrap();

        assert_eq!(steel.geometry.vertex_count(), 48);
        assert_eq!(steel.material.polygon_offset, Some(PolygonOffset::default()));
        assert_eq!(steel.material.color, Color::rgb(0.2, 0.4, 0.6));
        assert!(steel.cast_shadow && steel.receive_shadow);
    }

    #[test]
    fn test_world_transform_baked() {
        let raw = raw_tree();
        let before = raw.bounding_box();
        let normalized = normalize(raw);

        for child in &normalized.children {
            assert!(child.transform.is_identity());
            assert!(child.visible);
        }
        let after = normalized.bounding_box();
        assert!((before.min - after.min).norm() < 1e-5);
        assert!((before.max - after.max).norm() < 1e-5);
    }

    #[test]
    fn test_closed_mesh_has_no_outline_segments() {
        let normalized = normalize(raw_tree());
        for line in normalized.children.iter().filter_map(|c| c.as_line()) {
            assert!(line.geometry.is_empty());
            assert_eq!(line.material, LineMaterial::outline());
        }
    }

    #[test]
    fn test_empty_mesh_contributes_outline_only() {
        let mut root = Node::group("empty");
        root.add(Node::mesh("nothing", MeshData::new(), Material::new("void")));
        let normalized = normalize(root);

        assert_eq!(normalized.children.len(), 1);
        assert!(normalized.children[0].is_line());
    }

    #[test]
    fn test_gltf_quad_outline() {
        let raw = GltfLoader::load_from_memory(QUAD_GLTF.as_bytes()).unwrap();
        let normalized = normalize(raw);

        assert_eq!(normalized.children.len(), 2);
        let outline = normalized.children[0].as_line().unwrap();
        assert_eq!(outline.geometry.segment_count(), 4);

        let quad = normalized.children[1].as_mesh().unwrap();
        assert_eq!(quad.material.name, "red");
        let aabb = quad.geometry.bounding_box();
        assert!((aabb.max - Vector3::new(12.0, 2.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_force_visible_reaches_lines_and_meshes() {
        let mut root = Node::group("part");
        root.visible = false;
        let mut lines = Node::line_segments("wire", LineGeometry::new(), LineMaterial::outline());
        lines.visible = false;
        root.add(lines);
        let mut body = mesh("body", "steel", 0.0);
        body.visible = false;
        root.add(body);

        force_visible(&mut root);

        let mut hidden = 0;
        root.traverse(&mut |n| hidden += usize::from(!n.visible));
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_hidden_source_nodes_still_normalized() {
        let mut root = Node::group("part");
        let mut wire = Node::line_segments("wire", LineGeometry::new(), LineMaterial::outline());
        wire.visible = false;
        root.add(wire);
        let mut body = mesh("body", "steel", 0.0);
        body.visible = false;
        root.add(body);

        let normalized = normalize(root);

        // 隐藏网格照常合并，源线段不会带到输出中
        assert_eq!(normalized.mesh_count(), 1);
        assert_eq!(normalized.line_count(), 1);
        assert!(normalized.visible);
        assert!(normalized.children.iter().all(|c| c.visible));
    }

    #[test]
    fn test_obj_usemtl_buckets() {
        let obj = "\
o a
v 0 0 0
v 1 0 0
v 0 1 0
usemtl steel
f 1 2 3
o b
v 0 0 1
v 1 0 1
v 0 1 1
usemtl rubber
f 4 5 6
o c
v 0 0 2
v 1 0 2
v 0 1 2
usemtl steel
f 7 8 9
";
        let raw = ObjLoader::load_from_memory(obj.as_bytes()).unwrap();
        let normalized = normalize(raw);

        assert_eq!(normalized.line_count(), 3);
        let names: Vec<&str> = normalized
            .children
            .iter()
            .filter_map(|c| c.as_mesh())
            .map(|m| m.material.name.as_str())
            .collect();
        assert_eq!(names, vec!["steel", "rubber"]);

        let steel = normalized.children.iter().find_map(|c| c.as_mesh()).unwrap();
        assert_eq!(steel.geometry.triangle_count(), 2);
    }
}
