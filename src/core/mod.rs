//! 核心功能模块
//!
//! 本模块提供查看器的基础设施：日志系统、配置管理和错误处理。
//! 这些模块与具体渲染后端解耦。
//!
//! # 模块组织
//!
//! - `log`：日志系统，基于 tracing
//! - `config`：查看器配置（视口、相机、显示、日志）
//! - `scene`：启动时要加载的模型列表
//! - `error`：统一的错误类型

pub mod log;
pub mod config;
pub mod scene;
pub mod error;

// 重新导出常用类型，方便使用
pub use error::{Result, ViewerError, ConfigError, MeshLoadError};
pub use config::Config;
pub use scene::SceneConfig;
