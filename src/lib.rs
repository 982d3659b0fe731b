//! ModelViewer - glTF / OBJ 模型查看器
//!
//! 加载 glTF 和 OBJ 模型，按材质合并网格并生成轮廓线，
//! 在带轨道相机、环境贴图和颜色/轮廓线开关的场景中显示。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `math`: 数学类型、颜色和包围体
//! - `geometry`: 网格数据、轮廓线提取、模型加载与规范化
//! - `scene`: 场景图节点、材质和纹理
//! - `component`: 变换、相机、光源、轨道控制器
//! - `renderer`: 渲染后端接口和无窗口后端
//! - `viewer`: 查看器和模型
//!
//! # 使用示例
//!
//! ```no_run
//! use model_viewer::core::Config;
//! use model_viewer::geometry::loaders::{load_model, ModelFormat};
//! use model_viewer::math::Color;
//! use model_viewer::viewer::Viewer;
//! use std::path::Path;
//!
//! let mut viewer = Viewer::headless(&Config::default())?;
//!
//! let node = pollster::block_on(load_model(Path::new("bracket.glb"), ModelFormat::Gltf))?;
//! viewer.add_model("bracket", node);
//! viewer.set_model_color("bracket", Color::rgb(0.8, 0.2, 0.2), false)?;
//! viewer.fit_all_objects(true)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod math;
pub mod geometry;
pub mod scene;
pub mod component;
pub mod renderer;
pub mod viewer;
