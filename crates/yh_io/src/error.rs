// crates/yh_io/src/error.rs

//! IO 层错误类型

use std::path::PathBuf;

/// IO 层结果类型
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// 底层 IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 文件不存在
    #[error("文件不存在: {0}")]
    FileNotFound(PathBuf),

    /// 文件解析错误
    #[error("解析错误: {file} 第{line}行: {message}")]
    Parse {
        /// 文件路径
        file: PathBuf,
        /// 行号（从 1 开始）
        line: usize,
        /// 错误信息
        message: String,
    },

    /// 不支持的文件格式
    #[error("不支持的文件格式: {format} (支持的格式: {supported:?})")]
    UnsupportedFormat {
        /// 输入文件格式
        format: String,
        /// 支持的格式列表
        supported: Vec<String>,
    },

    /// 功能不可用（未启用对应特性）
    #[error("功能不可用: 需要启用 {feature} 特性")]
    NotAvailable {
        /// 缺失的特性名
        feature: &'static str,
    },

    /// 栅格数据错误
    #[error(transparent)]
    Grid(#[from] yh_foundation::error::YhError),

    /// GDAL 错误
    #[cfg(feature = "gdal")]
    #[error("GDAL 错误: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
}

impl IoError {
    /// 解析错误
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}
