//! 组件基类

/// 组件 trait
///
/// 所有具名场景对象（节点、相机、光源）的基础接口
pub trait Component {
    /// 获取组件名称
    fn name(&self) -> &str;
}
