//! 材质
//!
//! 网格材质和线段材质。网格材质持有环境贴图的共享引用，
//! 颜色等可变状态按实例独立保存。

use std::rc::Rc;

use super::texture::CubeTexture;
use crate::math::Color;

/// 多边形偏移，用于避免填充面与叠加轮廓线之间的深度冲突
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonOffset {
    pub factor: f32,
    pub units: f32,
}

impl Default for PolygonOffset {
    fn default() -> Self {
        Self { factor: 1.0, units: 1.0 }
    }
}

/// 网格材质
#[derive(Debug, Clone)]
pub struct Material {
    /// 材质名称（分组键）
    pub name: String,

    /// 基础颜色
    pub color: Color,

    /// 环境贴图
    pub env_map: Option<Rc<CubeTexture>>,

    /// 多边形偏移，`None` 表示关闭
    pub polygon_offset: Option<PolygonOffset>,

    /// 双面渲染
    pub double_sided: bool,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Color::WHITE,
            env_map: None,
            polygon_offset: None,
            double_sided: false,
        }
    }

    pub fn with_color(name: impl Into<String>, color: Color) -> Self {
        Self {
            color,
            ..Self::new(name)
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new("")
    }
}

/// 线段材质
#[derive(Debug, Clone, PartialEq)]
pub struct LineMaterial {
    pub color: Color,
    pub line_width: f32,
}

impl LineMaterial {
    /// 黑色 1 像素轮廓线
    pub fn outline() -> Self {
        Self {
            color: Color::BLACK,
            line_width: 1.0,
        }
    }
}

impl Default for LineMaterial {
    fn default() -> Self {
        Self::outline()
    }
}
