//! 几何数学工具模块
//!
//! 网格后处理用到的数学函数：
//! - 法线重建（从三角形面计算顶点法线）
//! - 三角形面法线

use crate::geometry::vertex::Vertex;

/// 从三角形面重建顶点法线
///
/// 遍历所有三角形，把面法线（未归一化，面积加权）累加到三个顶点，
/// 最后归一化所有顶点的法线向量。
///
/// # 示例
///
/// ```rust
/// use model_viewer::geometry::math_utils::reconstruct_normals;
/// use model_viewer::geometry::Vertex;
///
/// let mut vertices = vec![
///     Vertex::from_position([0.0, 0.0, 0.0]),
///     Vertex::from_position([1.0, 0.0, 0.0]),
///     Vertex::from_position([0.0, 1.0, 0.0]),
/// ];
/// reconstruct_normals(&mut vertices, &[0, 1, 2]);
/// assert_eq!(vertices[0].normal, [0.0, 0.0, 1.0]);
/// ```
pub fn reconstruct_normals(vertices: &mut [Vertex], indices: &[u32]) {
    for vertex in vertices.iter_mut() {
        vertex.normal = [0.0, 0.0, 0.0];
    }

    for triangle in indices.chunks_exact(3) {
        let i0 = triangle[0] as usize;
        let i1 = triangle[1] as usize;
        let i2 = triangle[2] as usize;

        let face_normal = face_normal_unnormalized(
            vertices[i0].position,
            vertices[i1].position,
            vertices[i2].position,
        );

        for &i in &[i0, i1, i2] {
            vertices[i].normal[0] += face_normal[0];
            vertices[i].normal[1] += face_normal[1];
            vertices[i].normal[2] += face_normal[2];
        }
    }

    for vertex in vertices.iter_mut() {
        vertex.normal = normalize(vertex.normal);
    }
}

/// 三角形单位法线，退化三角形返回零向量
pub fn face_normal(p0: [f32; 3], p1: [f32; 3], p2: [f32; 3]) -> [f32; 3] {
    normalize(face_normal_unnormalized(p0, p1, p2))
}

fn face_normal_unnormalized(p0: [f32; 3], p1: [f32; 3], p2: [f32; 3]) -> [f32; 3] {
    let edge1 = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
    let edge2 = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];
    cross(edge1, edge2)
}

/// 向量叉乘
#[inline]
pub(crate) fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// 向量点乘
#[inline]
pub(crate) fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// 向量归一化，零向量保持不变
#[inline]
pub(crate) fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = dot(v, v).sqrt();
    if length > 1e-8 {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross() {
        assert_eq!(cross([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(normalize([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_face_normal_degenerate() {
        let n = face_normal([0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert_eq!(n, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_reconstruct_normals_quad() {
        let mut vertices = vec![
            Vertex::from_position([0.0, 0.0, 0.0]),
            Vertex::from_position([1.0, 0.0, 0.0]),
            Vertex::from_position([1.0, 0.0, -1.0]),
            Vertex::from_position([0.0, 0.0, -1.0]),
        ];
        reconstruct_normals(&mut vertices, &[0, 1, 2, 0, 2, 3]);

        for v in &vertices {
            assert!((v.normal[1] - 1.0).abs() < 1e-6);
        }
    }
}
