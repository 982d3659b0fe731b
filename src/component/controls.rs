//! 轨道控制器
//!
//! 让相机绕目标点旋转。控制器本身不持有相机，每次操作传入相机的可变引用，
//! 返回值表示相机是否发生了变化，调用方据此决定是否重绘。

use super::Camera;
use crate::math::{Quaternion, Vector3};

const EPS: f32 = 1e-6;

/// 轨道控制器
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// 环绕目标点
    pub target: Vector3,

    /// 相机到目标的最小距离
    pub min_distance: f32,

    /// 相机到目标的最大距离
    pub max_distance: f32,

    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
}

impl OrbitControls {
    pub fn new(target: Vector3) -> Self {
        Self {
            target,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
        }
    }

    /// 把相机拉回允许的距离范围并朝向目标
    ///
    /// 返回相机是否发生变化。
    pub fn update(&self, camera: &mut Camera) -> bool {
        let before = (camera.position(), camera.look());

        let offset = camera.position() - self.target;
        let distance = offset.norm();
        if distance > EPS {
            let clamped = distance.clamp(self.min_distance, self.max_distance);
            if (clamped - distance).abs() > EPS {
                camera.set_position(self.target + offset * (clamped / distance));
            }
        }
        camera.look_at(self.target);

        changed(before, (camera.position(), camera.look()))
    }

    /// 绕目标做球面旋转
    ///
    /// `azimuth` 绕上向量旋转，`polar` 改变仰角（弧度）。极角被限制在 (0, π) 内，
    /// 相机不会翻越极点。
    pub fn rotate(&self, camera: &mut Camera, azimuth: f32, polar: f32) -> bool {
        if !self.enable_rotate {
            return false;
        }

        // 转到 Y 轴朝上的空间计算球坐标
        let to_y_up = Quaternion::rotation_between(&camera.up(), &Vector3::y())
            .unwrap_or_else(|| Quaternion::from_axis_angle(&Vector3::x_axis(), std::f32::consts::PI));
        let from_y_up = to_y_up.inverse();

        let offset = to_y_up * (camera.position() - self.target);
        let radius = offset.norm();
        if radius <= EPS {
            return false;
        }

        let theta = offset.x.atan2(offset.z) + azimuth;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + polar)
            .clamp(EPS, std::f32::consts::PI - EPS);

        let rotated = Vector3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        camera.set_position(self.target + from_y_up * rotated);

        self.update(camera) || azimuth != 0.0 || polar != 0.0
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vector3::zeros())
    }
}

fn changed(before: (Vector3, Vector3), after: (Vector3, Vector3)) -> bool {
    (before.0 - after.0).norm() > EPS || (before.1 - after.1).norm() > EPS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(position: Vector3) -> Camera {
        let mut camera = Camera::default();
        camera.set_position(position);
        camera
    }

    #[test]
    fn test_update_clamps_distance() {
        let mut controls = OrbitControls::default();
        controls.max_distance = 5.0;

        let mut camera = camera_at(Vector3::new(0.0, 0.0, 10.0));
        assert!(controls.update(&mut camera));
        assert!((camera.position() - Vector3::new(0.0, 0.0, 5.0)).norm() < 1e-5);

        // 已在范围内且朝向目标时不再变化
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_rotate_keeps_radius() {
        let controls = OrbitControls::new(Vector3::new(1.0, 0.0, 0.0));
        let mut camera = camera_at(Vector3::new(1.0, 0.0, 4.0));
        controls.update(&mut camera);

        assert!(controls.rotate(&mut camera, std::f32::consts::FRAC_PI_2, 0.0));
        let offset = camera.position() - controls.target;
        assert!((offset.norm() - 4.0).abs() < 1e-4);
        assert!((offset - Vector3::new(4.0, 0.0, 0.0)).norm() < 1e-4);
        assert!((camera.look() - Vector3::new(-1.0, 0.0, 0.0)).norm() < 1e-4);
    }

    #[test]
    fn test_rotate_clamps_polar() {
        let controls = OrbitControls::default();
        let mut camera = camera_at(Vector3::new(0.0, 0.0, 3.0));
        controls.rotate(&mut camera, 0.0, -10.0);
        // 停在极点附近但不越过
        assert!(camera.position().y > 2.99);
        assert!(camera.position().y <= 3.0);
    }

    #[test]
    fn test_rotate_disabled() {
        let mut controls = OrbitControls::default();
        controls.enable_rotate = false;
        let mut camera = camera_at(Vector3::new(0.0, 0.0, 3.0));
        assert!(!controls.rotate(&mut camera, 1.0, 0.0));
    }
}
