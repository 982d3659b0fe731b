//! Camera 组件
//!
//! 支持透视和正交两种投影。相机可以携带一个方向光（头灯），
//! 头灯方向始终等于相机视线方向。

use super::{Component, DirectionalLight};
use crate::math::{matrix, utils, Matrix4, Vector3};

/// 投影类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Perspective,
    Orthographic,
}

/// Camera 组件
#[derive(Debug, Clone)]
pub struct Camera {
    name: String,

    projection: Projection,

    /// 相机位置
    position: Vector3,

    /// 上向量（look-at 使用的参考上方向）
    up: Vector3,

    /// 前向量（归一化）
    look: Vector3,

    /// 垂直视场角（度）
    fov: f32,

    /// 宽高比
    aspect: f32,

    /// 近裁剪面距离
    near: f32,

    /// 远裁剪面距离
    far: f32,

    /// 缩放系数（正交投影使用）
    zoom: f32,

    /// 正交视口半高
    ortho_half_height: f32,

    /// 投影矩阵
    proj_matrix: Matrix4,

    /// 头灯
    light: Option<DirectionalLight>,
}

impl Camera {
    fn with_projection(
        name: impl Into<String>,
        projection: Projection,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut camera = Self {
            name: name.into(),
            projection,
            position: Vector3::zeros(),
            up: Vector3::new(0.0, 1.0, 0.0),
            look: Vector3::new(0.0, 0.0, -1.0),
            fov,
            aspect,
            near,
            far,
            zoom: 1.0,
            ortho_half_height: 1.0,
            proj_matrix: Matrix4::identity(),
            light: None,
        };
        camera.update_projection_matrix();
        camera
    }

    /// 创建透视相机
    ///
    /// # 参数
    /// - `fov`: 垂直视场角（度）
    /// - `aspect`: 宽高比
    /// - `near` / `far`: 裁剪面距离
    pub fn perspective(name: impl Into<String>, fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::with_projection(name, Projection::Perspective, fov, aspect, near, far)
    }

    /// 创建正交相机
    ///
    /// 视口高度为 `2 * half_height`，宽度由宽高比决定。`fov` 只用于取景距离计算。
    pub fn orthographic(
        name: impl Into<String>,
        half_height: f32,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut camera = Self::with_projection(name, Projection::Orthographic, fov, aspect, near, far);
        camera.ortho_half_height = half_height;
        camera.update_projection_matrix();
        camera
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn is_perspective(&self) -> bool {
        self.projection == Projection::Perspective
    }

    pub fn is_orthographic(&self) -> bool {
        self.projection == Projection::Orthographic
    }

    // ========== 位置与朝向 ==========

    /// 获取相机位置
    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// 设置相机位置（不改变朝向）
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    /// 获取上向量
    pub fn up(&self) -> Vector3 {
        self.up
    }

    /// 设置参考上向量
    pub fn set_up(&mut self, up: Vector3) {
        if up.norm_squared() > 0.0 {
            self.up = up.normalize();
        }
    }

    /// 获取前向量（视线方向）
    pub fn look(&self) -> Vector3 {
        self.look
    }

    /// 获取右向量
    pub fn right(&self) -> Vector3 {
        let right = self.look.cross(&self.up);
        if right.norm_squared() > 1e-12 {
            right.normalize()
        } else {
            Vector3::x()
        }
    }

    /// 朝向目标点
    ///
    /// 目标与相机重合时保持原朝向。
    pub fn look_at(&mut self, target: Vector3) {
        let dir = target - self.position;
        if dir.norm_squared() > 1e-12 {
            self.look = dir.normalize();
            self.sync_light();
        }
    }

    // ========== 视锥体属性 ==========

    /// 获取垂直 FOV（度）
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// 获取垂直 FOV（弧度）
    pub fn fov_radians(&self) -> f32 {
        utils::deg_to_rad(self.fov)
    }

    /// 获取宽高比
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// 设置宽高比，需调用 `update_projection_matrix` 生效
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// 获取近裁剪面距离
    pub fn near(&self) -> f32 {
        self.near
    }

    /// 获取远裁剪面距离
    pub fn far(&self) -> f32 {
        self.far
    }

    /// 设置裁剪面，需调用 `update_projection_matrix` 生效
    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    /// 正交视口宽度（未缩放），|right - left|
    pub fn ortho_width(&self) -> f32 {
        2.0 * self.ortho_half_height * self.aspect
    }

    /// 正交视口高度（未缩放），|top - bottom|
    pub fn ortho_height(&self) -> f32 {
        2.0 * self.ortho_half_height
    }

    // ========== 矩阵 ==========

    /// 重新计算投影矩阵
    pub fn update_projection_matrix(&mut self) {
        self.proj_matrix = match self.projection {
            Projection::Perspective => {
                matrix::perspective(self.fov_radians(), self.aspect, self.near, self.far)
            }
            Projection::Orthographic => {
                let half_h = self.ortho_half_height / self.zoom;
                let half_w = half_h * self.aspect;
                matrix::orthographic(-half_w, half_w, -half_h, half_h, self.near, self.far)
            }
        };
    }

    /// 获取投影矩阵
    pub fn proj_matrix(&self) -> Matrix4 {
        self.proj_matrix
    }

    /// 获取视图矩阵
    pub fn view_matrix(&self) -> Matrix4 {
        let target = self.position + self.look;
        matrix::look_at(&self.position, &target, &self.up)
    }

    // ========== 头灯 ==========

    /// 挂载方向光，方向与视线同步
    pub fn attach_light(&mut self, light: DirectionalLight) {
        self.light = Some(light);
        self.sync_light();
    }

    /// 取下方向光
    pub fn detach_light(&mut self) -> Option<DirectionalLight> {
        self.light.take()
    }

    pub fn light(&self) -> Option<&DirectionalLight> {
        self.light.as_ref()
    }

    fn sync_light(&mut self) {
        let look = self.look;
        if let Some(light) = self.light.as_mut() {
            light.set_direction(look);
        }
    }
}

impl Component for Camera {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective("MainCamera", 45.0, 1.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at() {
        let mut camera = Camera::default();
        camera.set_position(Vector3::new(0.0, 0.0, 10.0));
        camera.look_at(Vector3::zeros());
        assert!((camera.look() - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
        assert!((camera.right() - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-6);

        // 与目标重合时保持朝向
        camera.set_position(Vector3::zeros());
        camera.look_at(Vector3::zeros());
        assert!((camera.look() - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_view_matrix_maps_target_to_negative_z() {
        let mut camera = Camera::default();
        camera.set_position(Vector3::new(5.0, 0.0, 0.0));
        camera.look_at(Vector3::zeros());
        let p = camera.view_matrix().transform_point(&crate::math::Point3::origin());
        assert!((p.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_orthographic_extent() {
        let mut camera = Camera::orthographic("Ortho", 2.0, 45.0, 2.0, 0.1, 100.0);
        assert!(camera.is_orthographic());
        assert_eq!(camera.ortho_height(), 4.0);
        assert_eq!(camera.ortho_width(), 8.0);

        camera.set_aspect(1.0);
        camera.update_projection_matrix();
        assert_eq!(camera.ortho_width(), 4.0);
    }

    #[test]
    fn test_headlight_follows_look() {
        let mut camera = Camera::default();
        camera.attach_light(DirectionalLight::headlight());
        camera.set_position(Vector3::new(0.0, 10.0, 0.0));
        camera.set_up(Vector3::new(0.0, 0.0, -1.0));
        camera.look_at(Vector3::zeros());

        let dir = camera.light().unwrap().direction;
        assert!((dir - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-6);
        assert!(camera.detach_light().is_some());
        assert!(camera.light().is_none());
    }
}
