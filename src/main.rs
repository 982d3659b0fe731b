//! ModelViewer - 模型查看器命令行入口
//!
//! 读取配置和场景描述，加载模型，完成取景后用无窗口后端渲染一帧并输出统计。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用 scene.toml 中的模型
//! cargo run
//!
//! # 直接指定模型，隐藏轮廓线并打开头灯
//! cargo run -- part.glb bracket.obj --no-edges --light
//! ```
//!
//! # 架构概览
//!
//! ```text
//! ┌─────────────┐
//! │   main.rs   │  应用程序入口
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Loader    │  glTF / OBJ → 规范化节点
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Viewer    │  模型、相机、样式
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │RenderBackend│  无窗口后端
//! └─────────────┘
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use model_viewer::core::{log, Config, SceneConfig};
use model_viewer::geometry::loaders::load_model;
use model_viewer::viewer::Viewer;

/// 带值的命令行选项
const VALUE_FLAGS: &[&str] = &["--width", "--height"];

/// 提取命令行中的模型路径（不以 `--` 开头，且不是选项的值）
fn model_paths(args: &[String]) -> Vec<&str> {
    let mut paths = Vec::new();
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            paths.push(arg.as_str());
        }
    }
    paths
}

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载查看器配置文件（config.toml）并应用命令行参数
/// 2. 初始化日志系统
/// 3. 加载场景配置文件（scene.toml），追加命令行中的模型路径
/// 4. 创建查看器，逐个加载模型
/// 5. 应用颜色、取景，渲染一帧
///
/// # 命令行参数
///
/// - `--width <value>` / `--height <value>`: 视口尺寸
/// - `--no-edges`: 隐藏轮廓线
/// - `--light`: 打开头灯
/// - `--ortho`: 使用正交相机
/// - 其余参数视为模型路径
fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");
    config.apply_args(&args);
    config.validate().context("Invalid configuration")?;

    // 2. 初始化日志系统
    let log_file = config
        .logging
        .file_output
        .then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file)
        .context("Failed to initialize logger")?;
    info!(version = env!("CARGO_PKG_VERSION"), "ModelViewer starting...");

    // 3. 加载场景配置
    let mut scene = SceneConfig::from_file_or_default("scene.toml");
    scene.push_paths(model_paths(&args));
    if scene.models.is_empty() {
        warn!("No models given, nothing to show");
    }

    // 4. 创建查看器
    let mut viewer = Viewer::headless(&config).context("Failed to create viewer")?;
    if let Some(color) = scene.model_color() {
        viewer.set_color_all_models(color, false)?;
    }

    for entry in &scene.models {
        let format = match entry.resolve_format() {
            Ok(format) => format,
            Err(e) => {
                error!("Skipping '{}': {}", entry.name, e);
                continue;
            }
        };

        let node = pollster::block_on(load_model(Path::new(&entry.path), format))
            .with_context(|| format!("Failed to load model '{}' from {}", entry.name, entry.path))?;
        viewer.add_model(entry.name.as_str(), node);

        if let Some(color) = entry.color() {
            viewer.set_model_color(&entry.name, color, false)?;
        }
    }

    // 5. 取景并渲染
    match &scene.camera_look {
        Some(look) => viewer.set_camera_look_at(look.look(), look.up(), true)?,
        None => viewer.fit_all_objects(true)?,
    }
    // 空场景时取景不会渲染
    if viewer.renderer().frame_count() == 0 {
        viewer.update_view()?;
    }

    let stats = viewer.renderer().stats();
    let scene_box = viewer.get_scene_box();
    info!(
        models = viewer.models().len(),
        meshes = stats.mesh_draws,
        outlines = stats.line_draws,
        triangles = stats.triangles,
        segments = stats.segments,
        "Frame statistics"
    );
    if !scene_box.is_empty() {
        info!(
            min = ?scene_box.min.as_slice(),
            max = ?scene_box.max.as_slice(),
            camera = ?viewer.camera().position().as_slice(),
            "Scene framing"
        );
    }

    Ok(())
}
