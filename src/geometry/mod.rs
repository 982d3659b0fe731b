/// 几何体加载和处理模块
///
/// 提供 glTF / OBJ 模型加载、网格数据结构以及几何处理工具。
///
/// # 模块结构
///
/// - `vertex`: 顶点数据结构定义
/// - `mesh`: 网格数据
/// - `math_utils`: 几何数学工具（面法线、法线重建）
/// - `edges`: 轮廓边提取
/// - `loaders`: 各种格式的模型加载器以及加载后的规范化处理
///
/// # 架构设计
///
/// ```text
/// 文件 (glTF/OBJ)
///     ↓
/// Loader (GltfLoader/ObjLoader)  → 原始节点树
///     ↓
/// normalize                      → 按材质合并的网格 + 轮廓线
///     ↓
/// Viewer
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use model_viewer::geometry::loaders::{load_model, ModelFormat};
/// use std::path::Path;
///
/// let node = pollster::block_on(load_model(Path::new("model.obj"), ModelFormat::Obj))?;
/// println!("网格数: {}", node.mesh_count());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```

pub mod vertex;
pub mod mesh;
pub mod math_utils;
pub mod edges;
pub mod loaders;

// 重新导出常用类型
pub use vertex::Vertex;
pub use mesh::MeshData;
pub use edges::{extract_edges, LineGeometry};
