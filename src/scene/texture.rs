//! 纹理
//!
//! 纯色立方体贴图，用作场景背景和网格的环境贴图。

use std::rc::Rc;

use image::{Rgba, RgbaImage};

use crate::math::Color;

/// 立方体贴图的面数
pub const CUBE_FACE_COUNT: usize = 6;

/// 立方体贴图
///
/// 六个面可以共享同一张图像。
#[derive(Debug, Clone)]
pub struct CubeTexture {
    faces: [Rc<RgbaImage>; CUBE_FACE_COUNT],
}

impl CubeTexture {
    /// 六个面引用同一张图像
    pub fn uniform(face: RgbaImage) -> Self {
        let face = Rc::new(face);
        Self {
            faces: std::array::from_fn(|_| Rc::clone(&face)),
        }
    }

    pub fn faces(&self) -> &[Rc<RgbaImage>; CUBE_FACE_COUNT] {
        &self.faces
    }

    /// 面边长（像素），各面尺寸相同
    pub fn size(&self) -> u32 {
        self.faces[0].width()
    }
}

/// 生成纯色立方体贴图
///
/// 每个面是 `size`×`size` 的 RGBA 图像，RGB 通道为 `floor(c * 255)`，
/// alpha 通道固定为 0，不取自 `color.a`。
pub fn generate_cube_texture(size: u32, color: Color) -> CubeTexture {
    let [r, g, b] = color.to_rgb8();
    CubeTexture::uniform(RgbaImage::from_pixel(size, size, Rgba([r, g, b, 0])))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_faces(texture: &CubeTexture, size: u32, expected: [u8; 4]) {
        assert_eq!(texture.faces().len(), 6);
        for face in texture.faces() {
            assert_eq!(face.dimensions(), (size, size));
            assert!(face.pixels().all(|p| p.0 == expected));
        }
    }

    #[test]
    fn test_white_cube_texture() {
        let texture = generate_cube_texture(4, Color::WHITE);
        assert_eq!(texture.size(), 4);
        assert_faces(&texture, 4, [255, 255, 255, 0]);
    }

    #[test]
    fn test_black_cube_texture() {
        assert_faces(&generate_cube_texture(8, Color::BLACK), 8, [0, 0, 0, 0]);
    }

    #[test]
    fn test_alpha_ignored() {
        let texture = generate_cube_texture(2, Color::new(0.5, 0.25, 1.0, 1.0));
        assert_faces(&texture, 2, [127, 63, 255, 0]);
    }

    #[test]
    fn test_faces_shared() {
        let texture = generate_cube_texture(128, Color::rgb(0.1, 0.2, 0.3));
        assert!(Rc::ptr_eq(&texture.faces()[0], &texture.faces()[5]));
        assert_eq!(texture.faces()[0].as_raw().len(), 128 * 128 * 4);
    }
}
