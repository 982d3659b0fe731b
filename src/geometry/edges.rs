//! 轮廓边提取
//!
//! 从三角形网格中提取"硬边"：相邻两个面的夹角超过阈值的共享边，以及
//! 只属于一个面的边界边。顶点按量化后的位置归并，所以在 UV/法线接缝处
//! 被拆开的顶点仍被视为同一条边的端点。
//!
//! 阈值为 180° 时，只有边界边和完全反向折叠的面之间的边会被保留，
//! 即只输出真正的边界/剪影线。

use std::collections::HashMap;

use super::math_utils::{dot, face_normal};
use super::mesh::MeshData;
use crate::math::{utils, Aabb};

/// 位置量化精度（小数位数）
const PRECISION_POINTS: i32 = 4;

/// 线段几何：`positions` 中每两个点构成一条线段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineGeometry {
    pub positions: Vec<[f32; 3]>,
}

impl LineGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 线段数量
    pub fn segment_count(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn push_segment(&mut self, a: [f32; 3], b: [f32; 3]) {
        self.positions.push(a);
        self.positions.push(b);
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(self.positions.iter())
    }
}

type PositionKey = (i64, i64, i64);

struct EdgeEntry {
    index0: u32,
    index1: u32,
    normal: [f32; 3],
}

fn quantize(p: [f32; 3], precision: f32) -> PositionKey {
    (
        (p[0] * precision).round() as i64,
        (p[1] * precision).round() as i64,
        (p[2] * precision).round() as i64,
    )
}

/// 提取硬边
///
/// # 参数
///
/// - `mesh`: 三角形网格
/// - `threshold_angle`: 二面角阈值（度）。相邻面法线夹角不小于该值的共享边被保留。
pub fn extract_edges(mesh: &MeshData, threshold_angle: f32) -> LineGeometry {
    let precision = 10f32.powi(PRECISION_POINTS);
    let threshold_dot = utils::deg_to_rad(threshold_angle).cos();

    // 值为 None 表示该边已被相邻面匹配消费
    let mut edge_data: HashMap<(PositionKey, PositionKey), Option<EdgeEntry>> = HashMap::new();
    // 保持插入顺序，输出确定
    let mut edge_order: Vec<(PositionKey, PositionKey)> = Vec::new();
    let mut lines = LineGeometry::new();

    for triangle in mesh.indices.chunks_exact(3) {
        let idx = [triangle[0], triangle[1], triangle[2]];
        let pos = idx.map(|i| mesh.vertices[i as usize].position);
        let hashes = pos.map(|p| quantize(p, precision));

        // 退化三角形
        if hashes[0] == hashes[1] || hashes[1] == hashes[2] || hashes[2] == hashes[0] {
            continue;
        }

        let normal = face_normal(pos[0], pos[1], pos[2]);

        for j in 0..3 {
            let next = (j + 1) % 3;
            let key = (hashes[j], hashes[next]);
            let reverse_key = (hashes[next], hashes[j]);

            match edge_data.get_mut(&reverse_key) {
                Some(slot) if slot.is_some() => {
                    if let Some(entry) = slot.take() {
                        if dot(normal, entry.normal) <= threshold_dot {
                            lines.push_segment(pos[j], pos[next]);
                        }
                    }
                }
                _ => {
                    if !edge_data.contains_key(&key) {
                        edge_data.insert(
                            key,
                            Some(EdgeEntry {
                                index0: idx[j],
                                index1: idx[next],
                                normal,
                            }),
                        );
                        edge_order.push(key);
                    }
                }
            }
        }
    }

    // 剩余未匹配的边是边界边
    for key in &edge_order {
        if let Some(Some(entry)) = edge_data.get(key) {
            lines.push_segment(
                mesh.vertices[entry.index0 as usize].position,
                mesh.vertices[entry.index1 as usize].position,
            );
        }
    }

    lines
}
