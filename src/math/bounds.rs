//! 包围体
//!
//! 轴对齐包围盒和包围球，用于场景范围计算和相机取景。

use super::{Matrix4, Point3, Vector3};

/// 轴对齐包围盒
///
/// 空盒的 `min` 为 +∞、`max` 为 -∞，因此扩展任何点都能得到正确结果。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    /// 空包围盒
    pub fn empty() -> Self {
        Self {
            min: Vector3::repeat(f32::INFINITY),
            max: Vector3::repeat(f32::NEG_INFINITY),
        }
    }

    /// 由两个角点构造
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// 由点集构造
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a [f32; 3]>,
    {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand_by_point(&Vector3::from(*p));
        }
        aabb
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// 用一个点扩展
    pub fn expand_by_point(&mut self, p: &Vector3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// 与另一个包围盒合并
    pub fn union(&mut self, other: &Aabb) {
        if other.is_empty() {
            return;
        }
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    /// 尺寸，空盒返回零向量
    pub fn size(&self) -> Vector3 {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }

    /// 中心，空盒返回原点
    pub fn center(&self) -> Vector3 {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// 经过矩阵变换后的包围盒（变换 8 个角点）
    pub fn transformed(&self, m: &Matrix4) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        let mut out = Aabb::empty();
        for i in 0..8 {
            let corner = Point3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.expand_by_point(&m.transform_point(&corner).coords);
        }
        out
    }

    /// 外接球：中心为盒中心，半径为半对角线长度
    pub fn bounding_sphere(&self) -> Sphere {
        if self.is_empty() {
            return Sphere::empty();
        }
        Sphere {
            center: self.center(),
            radius: self.size().norm() * 0.5,
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

/// 包围球
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vector3,
    pub radius: f32,
}

impl Sphere {
    /// 空球，半径为 -1
    pub fn empty() -> Self {
        Self {
            center: Vector3::zeros(),
            radius: -1.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.radius < 0.0
    }
}
