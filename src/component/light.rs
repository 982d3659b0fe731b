//! 光照组件模块
//!
//! 查看器只用到两种光源：场景常驻的半球光，以及挂在相机上、
//! 随视线方向照射的方向光。

use crate::component::Component;
use crate::math::{Color, Vector3};

/// 光源类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// 半球光（天空色 / 地面色插值）
    Hemisphere,
    /// 方向光
    Directional,
}

/// 光源基础 trait
pub trait Light: Component {
    /// 获取光源类型
    fn light_type(&self) -> LightType;

    /// 获取光照强度
    fn intensity(&self) -> f32;

    /// 设置光照强度
    fn set_intensity(&mut self, intensity: f32);

    /// 获取光照颜色
    fn color(&self) -> &Color;

    /// 获取光源方向（如果适用）
    fn direction(&self) -> Option<Vector3> {
        None
    }
}

/// 半球光
#[derive(Debug, Clone)]
pub struct HemisphereLight {
    name: String,
    /// 天空色
    pub sky_color: Color,
    /// 地面色
    pub ground_color: Color,
    /// 光照强度
    pub intensity: f32,
}

impl HemisphereLight {
    pub fn new(name: impl Into<String>, sky_color: Color, ground_color: Color, intensity: f32) -> Self {
        Self {
            name: name.into(),
            sky_color,
            ground_color,
            intensity,
        }
    }

    /// 查看器默认的暖色环境光
    pub fn viewer_default() -> Self {
        Self::new(
            "HemisphereLight",
            Color::from_hex(0xffeeb1),
            Color::from_hex(0x080820),
            0.5,
        )
    }
}

impl Component for HemisphereLight {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Light for HemisphereLight {
    fn light_type(&self) -> LightType {
        LightType::Hemisphere
    }

    fn intensity(&self) -> f32 {
        self.intensity
    }

    fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    fn color(&self) -> &Color {
        &self.sky_color
    }
}

/// 方向光（平行光）
///
/// 挂在相机上时方向由相机的视线决定。
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    name: String,
    /// 光照强度
    pub intensity: f32,
    /// 光照颜色
    pub color: Color,
    /// 光照方向（归一化向量）
    pub direction: Vector3,
    /// 是否投射阴影
    pub cast_shadow: bool,
}

impl DirectionalLight {
    /// 创建新的方向光
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            intensity: 1.0,
            color: Color::WHITE,
            direction: Vector3::new(0.0, 0.0, -1.0),
            cast_shadow: false,
        }
    }

    /// 创建完全自定义的方向光
    pub fn with_params(
        name: impl Into<String>,
        color: Color,
        intensity: f32,
        direction: Vector3,
    ) -> Self {
        Self {
            name: name.into(),
            intensity,
            color,
            direction: direction.normalize(),
            cast_shadow: false,
        }
    }

    /// 查看器的头灯：暖橙色，强度 4，投射阴影
    pub fn headlight() -> Self {
        Self {
            cast_shadow: true,
            ..Self::with_params("Headlight", Color::from_hex(0xffa95c), 4.0, Vector3::new(0.0, 0.0, -1.0))
        }
    }

    /// 设置光照方向
    pub fn set_direction(&mut self, direction: Vector3) {
        self.direction = direction.normalize();
    }
}

impl Component for DirectionalLight {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Light for DirectionalLight {
    fn light_type(&self) -> LightType {
        LightType::Directional
    }

    fn intensity(&self) -> f32 {
        self.intensity
    }

    fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    fn color(&self) -> &Color {
        &self.color
    }

    fn direction(&self) -> Option<Vector3> {
        Some(self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemisphere_default() {
        let light = HemisphereLight::viewer_default();
        assert_eq!(light.light_type(), LightType::Hemisphere);
        assert_eq!(light.intensity(), 0.5);
        assert!((light.sky_color.g - 238.0 / 255.0).abs() < 1e-6);
        assert!(light.direction().is_none());
    }

    #[test]
    fn test_headlight() {
        let light = DirectionalLight::headlight();
        assert_eq!(light.light_type(), LightType::Directional);
        assert_eq!(light.intensity(), 4.0);
        assert!(light.cast_shadow);
        assert!((light.color().b - 92.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_direction_normalizes() {
        let mut light = DirectionalLight::new("Sun");
        light.set_direction(Vector3::new(0.0, -10.0, 0.0));
        assert!((light.direction.norm() - 1.0).abs() < 1e-6);
    }
}
