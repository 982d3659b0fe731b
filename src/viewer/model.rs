//! 查看器中的模型
//!
//! 给一个规范化后的节点加上名称和样式状态。所有样式操作只作用于
//! 包装节点的直接子节点。

use std::rc::Rc;

use crate::math::{Aabb, Color};
use crate::scene::{CubeTexture, Node, NodeKind};

/// 具名模型
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    object: Node,
    has_custom_color: bool,
    color: Color,
    edges_visible: bool,
}

impl Model {
    pub fn new(name: impl Into<String>, object: Node) -> Self {
        Self {
            name: name.into(),
            object,
            has_custom_color: false,
            color: Color::WHITE,
            edges_visible: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 包装的场景节点
    pub fn object(&self) -> &Node {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut Node {
        &mut self.object
    }

    pub fn is_edges_visible(&self) -> bool {
        self.edges_visible
    }

    pub fn has_custom_color(&self) -> bool {
        self.has_custom_color
    }

    /// 自定义颜色，未设置时为白色
    pub fn color(&self) -> Color {
        self.color
    }

    /// 设置轮廓线可见性，状态未变时不做任何修改
    pub fn set_edges_visibility(&mut self, visible: bool) {
        if visible == self.edges_visible {
            return;
        }
        self.edges_visible = visible;
        for child in self.object.children.iter_mut().filter(|c| c.is_line()) {
            child.visible = visible;
        }
    }

    /// 设置自定义颜色
    pub fn set_custom_color(&mut self, color: Color) {
        self.has_custom_color = true;
        self.color = color;
        for child in self.object.children.iter_mut() {
            if let NodeKind::Mesh(mesh) = &mut child.kind {
                mesh.material.color = color;
            }
        }
    }

    /// 设置环境贴图
    pub fn set_env_map(&mut self, env_map: Rc<CubeTexture>) {
        for child in self.object.children.iter_mut() {
            if let NodeKind::Mesh(mesh) = &mut child.kind {
                mesh.material.env_map = Some(Rc::clone(&env_map));
            }
        }
    }

    /// 世界空间包围盒
    pub fn bounding_box(&self) -> Aabb {
        self.object.bounding_box()
    }
}
