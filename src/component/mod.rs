//! 组件模块
//!
//! 场景节点的变换、相机、光源以及轨道控制器。

mod component;
mod transform;
mod camera;
mod controls;
mod light;

pub use component::Component;
pub use transform::Transform;
pub use camera::{Camera, Projection};
pub use controls::OrbitControls;
pub use light::{DirectionalLight, HemisphereLight, Light, LightType};
