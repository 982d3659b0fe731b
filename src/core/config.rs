//! 配置管理模块
//!
//! 提供查看器配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [view]
//! width = 800
//! height = 600
//!
//! [camera]
//! fov = 5.0           # 垂直视场角（度）
//! near = 0.1
//! far = 1000.0
//! target = [0.0, 0.0, -0.2]
//! orthographic = false
//!
//! [display]
//! background = [1.0, 1.0, 1.0]
//! show_edges = true
//! directional_light = false
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 查看器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 视口配置
    #[serde(default)]
    pub view: ViewConfig,

    /// 相机配置
    #[serde(default)]
    pub camera: CameraConfig,

    /// 显示配置
    #[serde(default)]
    pub display: DisplayConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 视口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// 视口宽度（像素）
    #[serde(default = "default_width")]
    pub width: u32,

    /// 视口高度（像素）
    #[serde(default = "default_height")]
    pub height: u32,
}

/// 相机配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// 垂直视场角（度）
    #[serde(default = "default_fov")]
    pub fov: f32,

    /// 近裁剪面距离
    #[serde(default = "default_near")]
    pub near: f32,

    /// 远裁剪面距离
    #[serde(default = "default_far")]
    pub far: f32,

    /// 轨道控制器初始目标点
    #[serde(default = "default_target")]
    pub target: [f32; 3],

    /// 是否使用正交投影
    #[serde(default)]
    pub orthographic: bool,
}

/// 显示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// 背景色 (r, g, b)，范围 0.0-1.0
    #[serde(default = "default_background")]
    pub background: [f32; 3],

    /// 是否显示轮廓边
    #[serde(default = "default_show_edges")]
    pub show_edges: bool,

    /// 是否启用跟随相机的方向光
    #[serde(default)]
    pub directional_light: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_fov() -> f32 { 5.0 }
fn default_near() -> f32 { 0.1 }
fn default_far() -> f32 { 1000.0 }
fn default_target() -> [f32; 3] { [0.0, 0.0, -0.2] }
fn default_background() -> [f32; 3] { [1.0, 1.0, 1.0] }
fn default_show_edges() -> bool { true }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "model_viewer.log".to_string() }

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            target: default_target(),
            orthographic: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            show_edges: default_show_edges(),
            directional_light: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl ViewConfig {
    /// 宽高比
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use model_viewer::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), model_viewer::core::ViewerError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--width <value>`: 设置视口宽度
    /// - `--height <value>`: 设置视口高度
    /// - `--no-edges`: 隐藏轮廓边
    /// - `--light`: 启用方向光
    /// - `--ortho`: 使用正交相机
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--no-edges") {
            self.display.show_edges = false;
        }

        if args.iter().any(|a| a == "--light") {
            self.display.directional_light = true;
        }

        if args.iter().any(|a| a == "--ortho") {
            self.camera.orthographic = true;
        }

        if let Some(idx) = args.iter().position(|a| a == "--width") {
            if let Some(width) = args.get(idx + 1).and_then(|s| s.parse().ok()) {
                self.view.width = width;
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--height") {
            if let Some(height) = args.get(idx + 1).and_then(|s| s.parse().ok()) {
                self.view.height = height;
            }
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.view.width == 0 || self.view.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "view.width/height".to_string(),
                reason: "View dimensions must be greater than 0".to_string(),
            }.into());
        }

        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return Err(ConfigError::InvalidValue {
                field: "camera.fov".to_string(),
                reason: format!("Field of view must be in (0, 180) degrees, got {}", self.camera.fov),
            }.into());
        }

        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return Err(ConfigError::InvalidValue {
                field: "camera.near/far".to_string(),
                reason: "Clip planes must satisfy 0 < near < far".to_string(),
            }.into());
        }

        if self.display.background.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ConfigError::InvalidValue {
                field: "display.background".to_string(),
                reason: "Color channels must be in [0, 1]".to_string(),
            }.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.view.width, 800);
        assert_eq!(config.view.height, 600);
        assert_eq!(config.camera.fov, 5.0);
        assert!(config.display.show_edges);
        assert!(!config.display.directional_light);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.view.width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.camera.near = 2000.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.background = [1.5, 0.0, 0.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            [view]
            width = 1024

            [display]
            show_edges = false
            "#,
        )
        .unwrap();

        assert_eq!(config.view.width, 1024);
        assert_eq!(config.view.height, 600);
        assert!(!config.display.show_edges);
        assert_eq!(config.camera.target, [0.0, 0.0, -0.2]);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args(["viewer", "--width", "320", "--height", "240", "--no-edges", "--light"]);

        assert_eq!(config.view.width, 320);
        assert_eq!(config.view.height, 240);
        assert!(!config.display.show_edges);
        assert!(config.display.directional_light);
        assert!(!config.camera.orthographic);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml_str("[view\nwidth = ").is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("model_viewer_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let mut config = Config::default();
        config.view.width = 1024;
        config.save_to_file(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded.view.width, 1024);
    }

    #[test]
    fn test_save_to_missing_directory_is_io_error() {
        let path = std::env::temp_dir()
            .join(format!("model_viewer_missing_{}", std::process::id()))
            .join("config.toml");
        let err = Config::default().save_to_file(&path).unwrap_err();
        assert!(matches!(err, crate::core::error::ViewerError::Io(_)));
    }
}
