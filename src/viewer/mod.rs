//! 查看器
//!
//! 持有场景、相机、轨道控制器、渲染后端以及全部模型。所有操作都是同步的，
//! 渲染是拉取式的：只有显式调用 `update_view`，或者操作的 `update` 参数为 true 时才渲染一帧。
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use model_viewer::core::Config;
//! use model_viewer::geometry::loaders::{load_model, ModelFormat};
//! use model_viewer::viewer::Viewer;
//! use std::path::Path;
//!
//! let mut viewer = Viewer::headless(&Config::default())?;
//! let node = pollster::block_on(load_model(Path::new("part.obj"), ModelFormat::Obj))?;
//! viewer.add_model("part", node);
//! viewer.fit_all_objects(true)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod model;

use std::rc::Rc;

use tracing::{debug, info};

use crate::component::{Camera, DirectionalLight, OrbitControls};
use crate::core::error::Result;
use crate::core::Config;
use crate::math::{constants, Aabb, Color, Vector3};
use crate::renderer::{HeadlessRenderer, RenderBackend, RenderView};
use crate::scene::{generate_cube_texture, Node, Scene};

pub use model::Model;

/// 启动时背景贴图的边长
pub const INITIAL_BACKGROUND_SIZE: u32 = 64;

/// 更换背景色时生成的贴图边长
pub const BACKGROUND_TEXTURE_SIZE: u32 = 128;

/// 取景时在包围盒外留出的余量
const FIT_OFFSET: f32 = 1.2;

/// 模型查看器
pub struct Viewer<R: RenderBackend = HeadlessRenderer> {
    scene: Scene,
    camera: Camera,
    controls: OrbitControls,
    renderer: R,
    models: Vec<Model>,
    show_edges: bool,
    model_color: Option<Color>,
    use_directional_light: bool,
}

impl Viewer<HeadlessRenderer> {
    /// 使用无窗口后端创建查看器
    pub fn headless(config: &Config) -> Result<Self> {
        let renderer = HeadlessRenderer::new(config.view.width, config.view.height);
        Self::new(config, renderer)
    }
}

impl<R: RenderBackend> Viewer<R> {
    /// 创建查看器
    ///
    /// 构造过程不会渲染。
    pub fn new(config: &Config, mut renderer: R) -> Result<Self> {
        config.validate()?;

        let view = &config.view;
        let cam = &config.camera;
        let mut camera = if cam.orthographic {
            // 正交视口按像素尺寸
            Camera::orthographic("MainCamera", view.height as f32 / 2.0, cam.fov, view.aspect(), cam.near, cam.far)
        } else {
            Camera::perspective("MainCamera", cam.fov, view.aspect(), cam.near, cam.far)
        };

        let mut controls = OrbitControls::new(Vector3::from(cam.target));
        controls.update(&mut camera);
        controls.enable_zoom = false;
        controls.enable_pan = false;

        renderer.set_size(view.width, view.height);

        let background = generate_cube_texture(
            INITIAL_BACKGROUND_SIZE,
            Color::from_array(config.display.background),
        );

        let mut viewer = Self {
            scene: Scene::new(Rc::new(background)),
            camera,
            controls,
            renderer,
            models: Vec::new(),
            show_edges: config.display.show_edges,
            model_color: None,
            use_directional_light: false,
        };
        viewer.use_directional_light(config.display.directional_light, false)?;

        info!(
            "Viewer initialized: {}x{}, backend {}, {} camera",
            view.width,
            view.height,
            viewer.renderer.backend_name(),
            if cam.orthographic { "orthographic" } else { "perspective" }
        );

        Ok(viewer)
    }

    // ========== 模型管理 ==========

    /// 添加模型
    ///
    /// 同名模型会先被移除。新模型沿用当前的轮廓线可见性、环境贴图和全局颜色。
    pub fn add_model(&mut self, name: impl Into<String>, object: Node) {
        let name = name.into();
        if self.detach(&name).is_some() {
            debug!("Replacing model '{}'", name);
        }

        let mut model = Model::new(name, object);
        model.set_edges_visibility(self.show_edges);
        model.set_env_map(Rc::clone(self.scene.background()));
        if let Some(color) = self.model_color {
            model.set_custom_color(color);
        }

        info!(
            "Model '{}' added: {} meshes, {} outlines",
            model.name(),
            model.object().mesh_count(),
            model.object().line_count()
        );
        self.models.push(model);
    }

    fn detach(&mut self, name: &str) -> Option<Model> {
        let index = self.models.iter().position(|m| m.name() == name)?;
        Some(self.models.remove(index))
    }

    /// 按名称移除模型，不存在时返回 false
    pub fn remove_object(&mut self, name: &str, update: bool) -> Result<bool> {
        if self.detach(name).is_none() {
            return Ok(false);
        }
        debug!("Model '{}' removed", name);
        if update {
            self.update_view()?;
        }
        Ok(true)
    }

    /// 移除全部模型
    pub fn remove_all_objects(&mut self, update: bool) -> Result<()> {
        debug!("Removing {} models", self.models.len());
        self.models.clear();
        if update {
            self.update_view()?;
        }
        Ok(())
    }

    pub fn get_model_by_name(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name() == name)
    }

    pub fn get_model_by_name_mut(&mut self, name: &str) -> Option<&mut Model> {
        self.models.iter_mut().find(|m| m.name() == name)
    }

    /// 按添加顺序排列的模型
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    // ========== 样式 ==========

    /// 更换背景色
    ///
    /// 重新生成背景立方体贴图，作为环境贴图重新应用到所有模型，并总是渲染一帧。
    pub fn set_background_color(&mut self, color: Color) -> Result<()> {
        let background = Rc::new(generate_cube_texture(BACKGROUND_TEXTURE_SIZE, color));
        self.scene.set_background(Rc::clone(&background));
        for model in &mut self.models {
            model.set_env_map(Rc::clone(&background));
        }
        self.update_view()
    }

    /// 设置所有模型的颜色，之后添加的模型也会使用该颜色
    pub fn set_color_all_models(&mut self, color: Color, update: bool) -> Result<()> {
        self.model_color = Some(color);
        for model in &mut self.models {
            model.set_custom_color(color);
        }
        if update {
            self.update_view()?;
        }
        Ok(())
    }

    /// 设置单个模型的颜色，不存在时返回 false
    pub fn set_model_color(&mut self, name: &str, color: Color, update: bool) -> Result<bool> {
        let Some(model) = self.get_model_by_name_mut(name) else {
            return Ok(false);
        };
        model.set_custom_color(color);
        if update {
            self.update_view()?;
        }
        Ok(true)
    }

    /// 全局轮廓线开关，状态未变时不做任何事
    pub fn set_edges_visibility(&mut self, visible: bool, update: bool) -> Result<()> {
        if self.show_edges == visible {
            return Ok(());
        }
        self.show_edges = visible;
        for model in &mut self.models {
            model.set_edges_visibility(visible);
        }
        if update {
            self.update_view()?;
        }
        Ok(())
    }

    pub fn is_edges_visible(&self) -> bool {
        self.show_edges
    }

    /// 开关相机头灯，状态未变时不做任何事
    pub fn use_directional_light(&mut self, enable: bool, update: bool) -> Result<()> {
        if self.use_directional_light == enable {
            return Ok(());
        }
        self.use_directional_light = enable;
        if enable {
            self.camera.attach_light(DirectionalLight::headlight());
            self.scene.attach_camera();
        } else {
            self.scene.detach_camera();
            self.camera.detach_light();
        }
        debug!("Directional light {}", if enable { "enabled" } else { "disabled" });
        if update {
            self.update_view()?;
        }
        Ok(())
    }

    pub fn is_directional_light_used(&self) -> bool {
        self.use_directional_light
    }

    // ========== 相机 ==========

    /// 所有模型包围盒的并集，没有模型时为空
    pub fn get_scene_box(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        for model in &self.models {
            aabb.union(&model.bounding_box());
        }
        aabb
    }

    /// 让所有模型充满视野
    ///
    /// 相机沿当前视线方向后退到能容纳包围盒的距离，目标点移到包围盒中心。
    /// 场景为空时什么也不做，即使 `update` 为 true 也不渲染。
    pub fn fit_all_objects(&mut self, update: bool) -> Result<()> {
        let aabb = self.get_scene_box();
        if aabb.is_empty() {
            return Ok(());
        }

        let size = aabb.size();
        let max_size = size.x.max(size.y).max(size.z);
        if max_size <= constants::EPSILON {
            debug!("Scene box is degenerate, skipping fit");
            return Ok(());
        }

        let fit_height_dist = max_size / (2.0 * (self.camera.fov_radians() / 2.0).tan());
        let fit_width_dist = fit_height_dist / self.camera.aspect();
        let dist = FIT_OFFSET * fit_height_dist.max(fit_width_dist);

        let to_target = self.controls.target - self.camera.position();
        let dir = if to_target.norm() > constants::EPSILON {
            to_target.normalize()
        } else {
            self.camera.look()
        };

        self.controls.max_distance = dist * 10.0;
        self.controls.target = aabb.center();

        self.camera.set_clip_planes(dist / 100.0, dist * 100.0);
        self.camera.update_projection_matrix();

        self.camera.set_position(self.controls.target - dir * dist);
        self.controls.update(&mut self.camera);

        debug!("Fit all objects: distance {:.4}", dist);

        if update {
            self.update_view()?;
        }
        Ok(())
    }

    /// 从指定方向观察所有模型
    ///
    /// 场景为空时什么也不做。
    pub fn set_camera_look_at(&mut self, look: Vector3, up: Vector3, update: bool) -> Result<()> {
        let aabb = self.get_scene_box();
        if aabb.is_empty() {
            return Ok(());
        }
        if look.norm() <= constants::EPSILON {
            tracing::warn!("Ignoring zero look direction");
            return Ok(());
        }

        let sphere = aabb.bounding_sphere();
        let dist = if self.camera.is_perspective() {
            sphere.radius / (self.camera.fov_radians() / 2.0).tan()
        } else {
            sphere.radius * 2.0
        };
        let look_dir = look.normalize();

        if self.camera.is_orthographic() && sphere.radius > 0.0 {
            let extent = self.camera.ortho_width().min(self.camera.ortho_height());
            self.camera.set_zoom(extent / (2.0 * sphere.radius));
            self.camera.update_projection_matrix();
        }

        self.camera.set_position(sphere.center - look_dir * dist);
        self.camera.set_up(up);
        self.camera.look_at(sphere.center);
        self.controls.target = sphere.center;

        self.fit_all_objects(update)
    }

    /// 绕目标旋转相机，相机发生变化时渲染
    pub fn orbit(&mut self, azimuth: f32, polar: f32) -> Result<bool> {
        if !self.controls.rotate(&mut self.camera, azimuth, polar) {
            return Ok(false);
        }
        self.update_view()?;
        Ok(true)
    }

    // ========== 视口 ==========

    /// 调整视口尺寸
    pub fn resize_view(&mut self, width: u32, height: u32, update: bool) -> Result<()> {
        self.renderer.set_size(width, height);
        if height > 0 {
            self.camera.set_aspect(width as f32 / height as f32);
            self.camera.update_projection_matrix();
        }
        if update {
            self.update_view()?;
        }
        Ok(())
    }

    /// 渲染一帧
    pub fn update_view(&mut self) -> Result<()> {
        let view = RenderView {
            scene: &self.scene,
            camera: &self.camera,
            objects: self.models.iter().map(Model::object).collect(),
        };
        self.renderer.render(&view)
    }

    // ========== 访问器 ==========

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
