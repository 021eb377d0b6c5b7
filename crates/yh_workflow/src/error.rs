// crates/yh_workflow/src/error.rs

//! 工作流层错误类型

use thiserror::Error;

/// 工作流错误
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] yh_config::ConfigError),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] yh_io::IoError),

    /// 水文计算错误
    #[error("水文计算错误: {0}")]
    Hydro(#[from] yh_hydrology::HydroError),

    /// 栅格数据错误
    #[error("栅格数据错误: {0}")]
    Grid(#[from] yh_foundation::YhError),

    /// 文件系统错误
    #[error("文件系统错误: {0}")]
    Fs(#[from] std::io::Error),

    /// 情景没有可合并的瓦片
    #[error("情景 {scenario} 在 {dir} 下没有可合并的瓦片")]
    NoTiles {
        /// 情景名
        scenario: String,
        /// 扫描的目录
        dir: String,
    },
}
