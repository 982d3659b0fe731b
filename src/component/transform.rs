//! Transform 组件
//!
//! 管理场景节点的局部变换（位置、旋转、缩放）

use crate::math::{Matrix4, Quaternion, Vector3};

/// 局部变换
///
/// 组合顺序为 T * R * S。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// 位置
    pub position: Vector3,

    /// 旋转
    pub rotation: Quaternion,

    /// 缩放
    pub scale: Vector3,
}

impl Transform {
    /// 单位变换
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Quaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// 只有平移的变换
    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// 由平移、旋转（四元数 x, y, z, w）、缩放数组构造
    pub fn from_trs(translation: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> Self {
        let [x, y, z, w] = rotation;
        Self {
            position: Vector3::from(translation),
            rotation: Quaternion::from_quaternion(nalgebra::Quaternion::new(w, x, y, z)),
            scale: Vector3::from(scale),
        }
    }

    /// 设置欧拉角（度数，按 roll/pitch/yaw 顺序应用）
    pub fn set_euler_angle_xyz(&mut self, x: f32, y: f32, z: f32) {
        use std::f32::consts::PI;
        self.rotation = Quaternion::from_euler_angles(x * PI / 180.0, y * PI / 180.0, z * PI / 180.0);
    }

    /// 是否为单位变换
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// 局部矩阵
    pub fn to_matrix(&self) -> Matrix4 {
        let translation = Matrix4::new_translation(&self.position);
        let rotation = self.rotation.to_homogeneous();
        let scale = Matrix4::new_nonuniform_scaling(&self.scale);

        translation * rotation * scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let t = Transform::default();
        assert!(t.is_identity());
        assert_eq!(t.to_matrix(), Matrix4::identity());
    }

    #[test]
    fn test_trs_order() {
        let t = Transform::from_trs([1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0], [2.0, 2.0, 2.0]);
        let m = t.to_matrix();

        // 先缩放再平移
        let p = m.transform_point(&crate::math::Point3::new(1.0, 0.0, 0.0));
        assert!((p.x - 3.0).abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
        assert!((p.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_euler_rotation() {
        let mut t = Transform::identity();
        t.set_euler_angle_xyz(0.0, 90.0, 0.0);
        let v = t.to_matrix().transform_vector(&Vector3::new(1.0, 0.0, 0.0));
        assert!((v.z + 1.0).abs() < 1e-5);
    }
}
