/// 网格数据结构模块
///
/// 定义 CPU 侧的网格数据容器，用于存储从文件加载的三角形几何，
/// 以及归一化流程需要的克隆、变换烘焙和合并操作。

use super::math_utils::normalize;
use super::vertex::Vertex;
use crate::math::{matrix, Aabb, Matrix4, Point3, Vector3};

/// CPU 侧网格数据
///
/// 索引三角形列表。加载器保证总是有索引（源数据无索引时生成顺序索引）。
///
/// # 示例
///
/// ```rust
/// use model_viewer::geometry::{MeshData, Vertex};
///
/// let mesh = MeshData {
///     vertices: vec![
///         Vertex::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
///         Vertex::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
///         Vertex::new([0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 1.0]),
///     ],
///     indices: vec![0, 1, 2],
///     name: Some("Triangle".to_string()),
/// };
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// 顶点数组
    pub vertices: Vec<Vertex>,

    /// 索引数组，每 3 个索引定义一个三角形
    pub indices: Vec<u32>,

    /// 网格名称（可选）
    pub name: Option<String>,
}

impl MeshData {
    /// 创建一个空的网格数据
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建一个指定名称的空网格数据
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// 创建一个带容量预分配的网格数据
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
            name: None,
        }
    }

    /// 轴对齐长方体，中心在原点
    ///
    /// 每个面 4 个独立顶点（硬法线），逆时针绕序朝外。
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
        // (法线, 面内 u 轴, 面内 v 轴)
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];
        let half = [hx, hy, hz];

        let mut mesh = MeshData::with_capacity(24, 36);
        for (normal, u, v) in faces.iter() {
            let base = mesh.vertices.len() as u32;
            for (su, sv) in [(-1.0f32, -1.0f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let mut position = [0.0f32; 3];
                for axis in 0..3 {
                    position[axis] = (normal[axis] + su * u[axis] + sv * v[axis]) * half[axis];
                }
                let texcoord = [(su + 1.0) * 0.5, (sv + 1.0) * 0.5];
                mesh.vertices.push(Vertex::new(position, *normal, texcoord));
            }
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 是否没有任何顶点
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// 验证网格数据的有效性
    ///
    /// 检查索引数量是 3 的倍数，且所有索引都在顶点范围内。
    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "Index count must be a multiple of 3, got {}",
                self.indices.len()
            ));
        }

        let vertex_count = self.vertices.len() as u32;
        if let Some((i, &index)) = self.indices.iter().enumerate().find(|(_, idx)| **idx >= vertex_count) {
            return Err(format!(
                "Index {} at position {} is out of vertex range ({} vertices)",
                index, i, vertex_count
            ));
        }

        Ok(())
    }

    /// 把变换矩阵烘焙进顶点
    ///
    /// 位置按完整矩阵变换，法线按法线矩阵变换后重新归一化。
    pub fn apply_matrix(&mut self, m: &Matrix4) {
        let normal_matrix = matrix::normal_matrix(m);
        for vertex in self.vertices.iter_mut() {
            let p = m.transform_point(&Point3::from(vertex.position));
            vertex.position = [p.x, p.y, p.z];

            let n = normal_matrix * Vector3::from(vertex.normal);
            vertex.normal = normalize([n.x, n.y, n.z]);
        }
    }

    /// 克隆并烘焙变换
    pub fn transformed(&self, m: &Matrix4) -> MeshData {
        let mut out = self.clone();
        out.apply_matrix(m);
        out
    }

    /// 局部空间包围盒
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// 把多个网格合并为一个
    ///
    /// 顶点依次拼接，索引按顶点偏移重定位。列表为空或所有网格都没有顶点时
    /// 返回 `None`。
    pub fn merge(meshes: &[MeshData]) -> Option<MeshData> {
        let vertex_total: usize = meshes.iter().map(MeshData::vertex_count).sum();
        if vertex_total == 0 {
            return None;
        }
        let index_total: usize = meshes.iter().map(MeshData::index_count).sum();

        let mut merged = MeshData::with_capacity(vertex_total, index_total);
        for mesh in meshes {
            let offset = merged.vertices.len() as u32;
            merged.vertices.extend_from_slice(&mesh.vertices);
            merged.indices.extend(mesh.indices.iter().map(|&i| i + offset));
        }
        Some(merged)
    }

    /// 清空所有数据
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.name = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        MeshData {
            vertices: vec![
                Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
                Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
                Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
            ],
            indices: vec![0, 1, 2],
            name: None,
        }
    }

    #[test]
    fn test_mesh_data_creation() {
        let mesh = MeshData::new();

        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.index_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.name.is_none());
    }

    #[test]
    fn test_mesh_data_with_capacity() {
        let mesh = MeshData::with_capacity(100, 300);

        assert!(mesh.vertices.capacity() >= 100);
        assert!(mesh.indices.capacity() >= 300);
    }

    #[test]
    fn test_mesh_data_validation() {
        assert!(triangle().validate().is_ok());

        let mut mesh = triangle();
        mesh.indices.push(0);
        assert!(mesh.validate().is_err());

        let mut mesh = triangle();
        mesh.indices = vec![0, 1, 5];
        let result = mesh.validate();
        assert!(result.unwrap_err().contains("out of vertex range"));
    }

    #[test]
    fn test_cuboid() {
        let cube = MeshData::cuboid(2.0, 4.0, 6.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.validate().is_ok());

        let aabb = cube.bounding_box();
        assert_eq!(aabb.min, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 2.0, 3.0));

        // 三角形绕序与法线一致
        for tri in cube.indices.chunks_exact(3) {
            let p = |i: u32| cube.vertices[i as usize].position;
            let n = crate::geometry::math_utils::face_normal(p(tri[0]), p(tri[1]), p(tri[2]));
            let expected = cube.vertices[tri[0] as usize].normal;
            assert!(crate::geometry::math_utils::dot(n, expected) > 0.99);
        }
    }

    #[test]
    fn test_apply_matrix() {
        let mut mesh = triangle();
        mesh.apply_matrix(&matrix::translation(0.0, 0.0, 5.0));
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 5.0]);
        assert_eq!(mesh.vertices[1].normal, [0.0, 0.0, 1.0]);

        let rotated = triangle().transformed(&Matrix4::from_axis_angle(
            &Vector3::x_axis(),
            std::f32::consts::FRAC_PI_2,
        ));
        let n = rotated.vertices[0].normal;
        assert!((n[1] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_merge() {
        let a = triangle();
        let b = triangle().transformed(&matrix::translation(2.0, 0.0, 0.0));

        let merged = MeshData::merge(&[a, b]).unwrap();
        assert_eq!(merged.vertex_count(), 6);
        assert_eq!(merged.indices, vec![0, 1, 2, 3, 4, 5]);
        assert!(merged.validate().is_ok());
    }

    #[test]
    fn test_merge_nothing() {
        assert!(MeshData::merge(&[]).is_none());
        assert!(MeshData::merge(&[MeshData::new(), MeshData::new()]).is_none());
    }

    #[test]
    fn test_mesh_data_clear() {
        let mut mesh = triangle();
        mesh.name = Some("Test".to_string());
        mesh.clear();

        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.index_count(), 0);
        assert!(mesh.name.is_none());
    }
}
