//! 场景配置模块
//!
//! 定义启动时要打开的模型列表，以及可选的颜色和相机朝向。
//!
//! ```toml
//! model_color = [0.8, 0.8, 0.8]
//!
//! [camera_look]
//! look = [0.0, 0.0, -1.0]
//! up = [0.0, 1.0, 0.0]
//!
//! [[models]]
//! name = "bracket"
//! path = "assets/bracket.glb"
//!
//! [[models]]
//! name = "plate"
//! path = "assets/plate.obj"
//! color = [0.2, 0.4, 0.9]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ConfigError, Result, ViewerError};
use crate::geometry::loaders::ModelFormat;
use crate::math::{Color, Vector3};

/// 单个模型条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    /// 模型名称（在查看器中唯一）
    pub name: String,

    /// 模型文件路径
    pub path: String,

    /// 文件格式，缺省时按扩展名推断
    #[serde(default)]
    pub format: Option<ModelFormat>,

    /// 该模型的自定义颜色
    #[serde(default)]
    pub color: Option<[f32; 3]>,
}

impl ModelEntry {
    /// 解析文件格式
    pub fn resolve_format(&self) -> Result<ModelFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => ModelFormat::from_path(Path::new(&self.path)),
        }
    }

    /// 自定义颜色
    pub fn color(&self) -> Option<Color> {
        self.color.map(|[r, g, b]| Color::rgb(r, g, b))
    }
}

/// 相机朝向
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraLook {
    /// 观察方向
    pub look: [f32; 3],

    /// 上方向
    #[serde(default = "default_up")]
    pub up: [f32; 3],
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

impl CameraLook {
    pub fn look(&self) -> Vector3 {
        Vector3::from(self.look)
    }

    pub fn up(&self) -> Vector3 {
        Vector3::from(self.up)
    }
}

/// 场景配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    /// 要加载的模型
    #[serde(default)]
    pub models: Vec<ModelEntry>,

    /// 所有模型的统一颜色
    #[serde(default)]
    pub model_color: Option<[f32; 3]>,

    /// 加载完成后的相机朝向
    #[serde(default)]
    pub camera_look: Option<CameraLook>,
}

impl SceneConfig {
    /// 从文件加载场景配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ViewerError::Config(ConfigError::FileNotFound(format!(
                "Failed to read scene config file '{}': {}",
                path.display(),
                e
            ))))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ViewerError::Config(ConfigError::ParseError(format!(
                "Failed to parse scene config: {}",
                e
            ))))
    }

    /// 从文件加载，如果文件不存在则返回默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded scene config from: {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load scene config: {}, using defaults", e);
                    Self::default()
                }
            }
        } else {
            tracing::info!("Scene config not found, using defaults");
            Self::default()
        }
    }

    /// 统一模型颜色
    pub fn model_color(&self) -> Option<Color> {
        self.model_color.map(|[r, g, b]| Color::rgb(r, g, b))
    }

    /// 把命令行中的模型路径追加为模型条目，名称取文件名
    pub fn push_paths<I>(&mut self, paths: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for path in paths {
            let path = path.as_ref();
            let name = Path::new(path)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(path)
                .to_string();
            self.models.push(ModelEntry {
                name,
                path: path.to_string(),
                format: None,
                color: None,
            });
        }
    }
}
