/// 模型加载器模块
///
/// 提供统一的模型加载接口和各种格式的具体实现。加载器只产出原始节点树，
/// `load_model` 再把它交给 `normalize` 得到查看器使用的扁平结构。
///
/// # 支持的格式
///
/// - **glTF**: glTF 2.0（`.gltf` / `.glb`，使用 gltf crate）
/// - **OBJ**: Wavefront OBJ 格式（使用 tobj crate）
///
/// # 使用示例
///
/// ```rust,no_run
/// use model_viewer::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let raw = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::{MeshLoadError, Result};
use crate::scene::Node;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod gltf_loader;
pub mod normalize;
pub mod obj_loader;

// 重新导出加载器
pub use gltf_loader::GltfLoader;
pub use normalize::normalize;
pub use obj_loader::ObjLoader;

/// 模型文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    Gltf,
    Obj,
}

impl ModelFormat {
    /// 根据文件扩展名判断格式（不区分大小写）
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| {
                MeshLoadError::UnsupportedFormat(format!(
                    "无法确定文件扩展名: {}",
                    path.display()
                ))
            })?;

        if GltfLoader::supported_extensions().contains(&extension.as_str()) {
            Ok(ModelFormat::Gltf)
        } else if ObjLoader::supported_extensions().contains(&extension.as_str()) {
            Ok(ModelFormat::Obj)
        } else {
            Err(MeshLoadError::UnsupportedFormat(format!("不支持的文件格式: .{}", extension)).into())
        }
    }
}

/// 网格加载器 trait
///
/// 所有格式的加载器都实现此 trait。加载器是无状态的（使用静态方法），
/// 返回的是未经处理的原始节点树，保留源文件的层级和局部变换。
pub trait MeshLoader {
    /// 从文件路径加载
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 文件格式错误或损坏
    /// - 数据验证失败
    fn load_from_file(path: &Path) -> Result<Node>;

    /// 从内存数据加载
    fn load_from_memory(data: &[u8]) -> Result<Node>;

    /// 支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 按格式加载原始节点树，不做规范化
pub fn load_raw(path: &Path, format: ModelFormat) -> Result<Node> {
    match format {
        ModelFormat::Gltf => GltfLoader::load_from_file(path),
        ModelFormat::Obj => ObjLoader::load_from_file(path),
    }
}

/// 异步加载模型并规范化
///
/// 成功时返回规范化后的分组节点：直接子节点是轮廓线和按材质合并的网格。
/// 失败时原样返回加载器的错误。
///
/// # 示例
///
/// ```rust,no_run
/// use model_viewer::geometry::loaders::{load_model, ModelFormat};
/// use std::path::Path;
///
/// let node = pollster::block_on(load_model(Path::new("part.glb"), ModelFormat::Gltf))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub async fn load_model(path: &Path, format: ModelFormat) -> Result<Node> {
    tracing::info!("Loading {:?} model: {}", format, path.display());
    let raw = load_raw(path, format)?;
    Ok(normalize(raw))
}

/// 从内存加载模型并规范化
pub async fn load_model_from_memory(data: &[u8], format: ModelFormat) -> Result<Node> {
    tracing::info!("Loading {:?} model from memory ({} bytes)", format, data.len());
    let raw = match format {
        ModelFormat::Gltf => GltfLoader::load_from_memory(data)?,
        ModelFormat::Obj => ObjLoader::load_from_memory(data)?,
    };
    Ok(normalize(raw))
}
