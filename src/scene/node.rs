//! 场景图节点
//!
//! 节点是一棵所有权树：每个节点独占其子节点。节点类型只有三种：
//! 分组、网格和线段。

use crate::component::{Component, Transform};
use crate::geometry::{LineGeometry, MeshData};
use crate::math::{Aabb, Matrix4};

use super::material::{LineMaterial, Material};

/// 网格节点数据
#[derive(Debug, Clone)]
pub struct MeshNode {
    pub geometry: MeshData,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// 线段节点数据
#[derive(Debug, Clone)]
pub struct LineNode {
    pub geometry: LineGeometry,
    pub material: LineMaterial,
}

/// 节点类型
#[derive(Debug, Clone)]
pub enum NodeKind {
    Group,
    Mesh(MeshNode),
    LineSegments(LineNode),
}

/// 场景图节点
#[derive(Debug, Clone)]
pub struct Node {
    name: String,

    /// 是否可见
    pub visible: bool,

    /// 相对父节点的变换
    pub transform: Transform,

    pub kind: NodeKind,

    pub children: Vec<Node>,
}

impl Node {
    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            visible: true,
            transform: Transform::identity(),
            kind,
            children: Vec::new(),
        }
    }

    /// 分组节点
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group)
    }

    /// 网格节点（默认不投射/接收阴影）
    pub fn mesh(name: impl Into<String>, geometry: MeshData, material: Material) -> Self {
        Self::with_kind(
            name,
            NodeKind::Mesh(MeshNode {
                geometry,
                material,
                cast_shadow: false,
                receive_shadow: false,
            }),
        )
    }

    /// 线段节点
    pub fn line_segments(name: impl Into<String>, geometry: LineGeometry, material: LineMaterial) -> Self {
        Self::with_kind(name, NodeKind::LineSegments(LineNode { geometry, material }))
    }

    /// 添加子节点
    pub fn add(&mut self, child: Node) {
        self.children.push(child);
    }

    /// 链式设置变换
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh(_))
    }

    pub fn is_line(&self) -> bool {
        matches!(self.kind, NodeKind::LineSegments(_))
    }

    pub fn as_mesh(&self) -> Option<&MeshNode> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut MeshNode> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&LineNode> {
        match &self.kind {
            NodeKind::LineSegments(line) => Some(line),
            _ => None,
        }
    }

    /// 局部矩阵
    pub fn local_matrix(&self) -> Matrix4 {
        self.transform.to_matrix()
    }

    /// 先序遍历自身及所有后代
    pub fn traverse<F: FnMut(&Node)>(&self, f: &mut F) {
        f(self);
        for child in &self.children {
            child.traverse(f);
        }
    }

    /// 先序遍历自身及所有后代（可变）
    pub fn traverse_mut<F: FnMut(&mut Node)>(&mut self, f: &mut F) {
        f(self);
        for child in self.children.iter_mut() {
            child.traverse_mut(f);
        }
    }

    /// 先序遍历，同时给出每个节点的世界矩阵
    ///
    /// `parent_world` 是本节点父级的世界矩阵；根节点传单位矩阵。
    pub fn traverse_with_world<F: FnMut(&Node, &Matrix4)>(&self, parent_world: &Matrix4, f: &mut F) {
        let world = parent_world * self.local_matrix();
        f(self, &world);
        for child in &self.children {
            child.traverse_with_world(&world, f);
        }
    }

    /// 世界空间包围盒，包含所有后代的网格和线段几何（不考虑可见性）
    pub fn bounding_box(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        self.traverse_with_world(&Matrix4::identity(), &mut |node, world| {
            let local = match &node.kind {
                NodeKind::Mesh(mesh) => mesh.geometry.bounding_box(),
                NodeKind::LineSegments(line) => line.geometry.bounding_box(),
                NodeKind::Group => return,
            };
            aabb.union(&local.transformed(world));
        });
        aabb
    }

    /// 后代（含自身）中网格节点的数量
    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if node.is_mesh() {
                count += 1;
            }
        });
        count
    }

    /// 后代（含自身）中线段节点的数量
    pub fn line_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if node.is_line() {
                count += 1;
            }
        });
        count
    }
}

impl Component for Node {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    fn sample_tree() -> Node {
        let mut root = Node::group("root");
        let mut child = Node::group("child")
            .with_transform(Transform::from_position(Vector3::new(10.0, 0.0, 0.0)));
        child.add(Node::mesh("cube", MeshData::cuboid(2.0, 2.0, 2.0), Material::new("steel")));
        root.add(child);
        root.add(Node::line_segments("lines", LineGeometry::new(), LineMaterial::outline()));
        root
    }

    #[test]
    fn test_kind_flags() {
        let root = sample_tree();
        assert!(!root.is_mesh());
        assert!(root.children[1].is_line());
        assert_eq!(root.mesh_count(), 1);
        assert_eq!(root.line_count(), 1);
    }

    #[test]
    fn test_traverse_order() {
        let mut names = Vec::new();
        sample_tree().traverse(&mut |node| names.push(node.name().to_string()));
        assert_eq!(names, vec!["root", "child", "cube", "lines"]);
    }

    #[test]
    fn test_world_bounding_box() {
        let aabb = sample_tree().bounding_box();
        assert_eq!(aabb.min, Vector3::new(9.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(11.0, 1.0, 1.0));
    }

    #[test]
    fn test_empty_group_box() {
        assert!(Node::group("empty").bounding_box().is_empty());
    }
}
