//! 渲染器模块
//!
//! 查看器只依赖 `RenderBackend` trait：每次需要重绘时，把场景、相机和
//! 当前所有模型的根节点组成一帧 `RenderView` 交给后端。
//!
//! # 架构设计
//!
//! - `RenderBackend`：统一的渲染后端接口
//! - `RenderView`：一帧的只读视图，渲染期间借用查看器状态
//! - `HeadlessRenderer`：不依赖窗口和 GPU 的后端，只统计绘制信息

use crate::component::Camera;
use crate::core::error::Result;
use crate::scene::{Node, Scene};

pub mod headless;

pub use headless::{FrameStats, HeadlessRenderer};

/// 一帧的渲染视图
pub struct RenderView<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    /// 场景中的模型根节点
    pub objects: Vec<&'a Node>,
}

/// 统一的渲染后端接口
///
/// # 方法说明
///
/// - `backend_name()`: 后端名称，用于日志
/// - `set_size()`: 视口尺寸变化
/// - `render()`: 渲染一帧
pub trait RenderBackend {
    fn backend_name(&self) -> &str;

    /// 视口尺寸变化时调用
    fn set_size(&mut self, width: u32, height: u32);

    /// 渲染一帧画面
    ///
    /// # 返回值
    ///
    /// - `Ok(())`: 渲染成功
    /// - `Err(...)`: 渲染失败，错误会从触发渲染的查看器操作中返回
    fn render(&mut self, view: &RenderView<'_>) -> Result<()>;
}
