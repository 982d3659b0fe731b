//! 无窗口渲染后端
//!
//! 遍历场景中可见的节点，统计每帧的绘制调用和图元数量。
//! 用于命令行工具和测试。

use tracing::{debug, trace};

use super::{RenderBackend, RenderView};
use crate::core::error::{Result, ViewerError};
use crate::scene::{Node, NodeKind};

/// 最近一帧的统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// 累计渲染帧数
    pub frames: u64,
    /// 网格绘制次数
    pub mesh_draws: usize,
    /// 线段绘制次数
    pub line_draws: usize,
    /// 三角形数量
    pub triangles: usize,
    /// 线段数量
    pub segments: usize,
    /// 是否有头灯参与
    pub directional_light: bool,
    pub width: u32,
    pub height: u32,
}

/// 无窗口渲染器
#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    stats: FrameStats,
}

impl HeadlessRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            stats: FrameStats {
                width,
                height,
                ..FrameStats::default()
            },
        }
    }

    /// 最近一帧的统计
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// 累计渲染帧数
    pub fn frame_count(&self) -> u64 {
        self.stats.frames
    }

    fn collect(node: &Node, stats: &mut FrameStats) {
        // 不可见节点连同子树一起跳过
        if !node.visible {
            return;
        }
        match &node.kind {
            NodeKind::Mesh(mesh) if !mesh.geometry.is_empty() => {
                stats.mesh_draws += 1;
                stats.triangles += mesh.geometry.triangle_count();
            }
            NodeKind::LineSegments(line) if !line.geometry.is_empty() => {
                stats.line_draws += 1;
                stats.segments += line.geometry.segment_count();
            }
            _ => {}
        }
        for child in &node.children {
            Self::collect(child, stats);
        }
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl RenderBackend for HeadlessRenderer {
    fn backend_name(&self) -> &str {
        "Headless"
    }

    fn set_size(&mut self, width: u32, height: u32) {
        debug!(width, height, "Headless viewport resized");
        self.stats.width = width;
        self.stats.height = height;
    }

    fn render(&mut self, view: &RenderView<'_>) -> Result<()> {
        if self.stats.width == 0 || self.stats.height == 0 {
            return Err(ViewerError::Render(format!(
                "invalid viewport {}x{}",
                self.stats.width, self.stats.height
            )));
        }

        let mut frame = FrameStats {
            frames: self.stats.frames + 1,
            width: self.stats.width,
            height: self.stats.height,
            directional_light: view.scene.is_camera_attached() && view.camera.light().is_some(),
            ..FrameStats::default()
        };
        for object in &view.objects {
            Self::collect(object, &mut frame);
        }

        trace!(
            frame = frame.frames,
            meshes = frame.mesh_draws,
            lines = frame.line_draws,
            triangles = frame.triangles,
            "Frame rendered"
        );
        self.stats = frame;
        Ok(())
    }
}
