//! 场景模块
//!
//! 场景图节点、材质、纹理，以及保存背景和环境光的 `Scene`。
//! 模型本身由查看器持有，渲染时再和场景一起组成一帧的视图。

pub mod material;
pub mod node;
pub mod texture;

use std::rc::Rc;

use tracing::debug;

use crate::component::HemisphereLight;

pub use material::{LineMaterial, Material, PolygonOffset};
pub use node::{LineNode, MeshNode, Node, NodeKind};
pub use texture::{generate_cube_texture, CubeTexture};

/// 场景全局状态
#[derive(Debug, Clone)]
pub struct Scene {
    /// 背景立方体贴图
    background: Rc<CubeTexture>,

    /// 环境半球光
    pub hemisphere_light: HemisphereLight,

    /// 相机（以及它携带的头灯）是否挂在场景中
    camera_attached: bool,
}

impl Scene {
    pub fn new(background: Rc<CubeTexture>) -> Self {
        Self {
            background,
            hemisphere_light: HemisphereLight::viewer_default(),
            camera_attached: false,
        }
    }

    pub fn background(&self) -> &Rc<CubeTexture> {
        &self.background
    }

    pub fn set_background(&mut self, background: Rc<CubeTexture>) {
        debug!(size = background.size(), "Scene background replaced");
        self.background = background;
    }

    pub fn attach_camera(&mut self) {
        self.camera_attached = true;
    }

    pub fn detach_camera(&mut self) {
        self.camera_attached = false;
    }

    pub fn is_camera_attached(&self) -> bool {
        self.camera_attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;

    #[test]
    fn test_background_swap() {
        let mut scene = Scene::new(Rc::new(generate_cube_texture(64, Color::WHITE)));
        assert_eq!(scene.background().size(), 64);

        scene.set_background(Rc::new(generate_cube_texture(128, Color::BLACK)));
        assert_eq!(scene.background().size(), 128);
        assert_eq!(scene.background().faces()[0].get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_camera_attachment() {
        let mut scene = Scene::new(Rc::new(generate_cube_texture(1, Color::WHITE)));
        assert!(!scene.is_camera_attached());
        scene.attach_camera();
        assert!(scene.is_camera_attached());
        scene.detach_camera();
        assert!(!scene.is_camera_attached());
    }
}
