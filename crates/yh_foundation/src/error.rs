// crates/yh_foundation/src/error.rs

//! 错误处理模块，定义基础错误类型
//!
//! 提供 `YhError` 枚举和 `YhResult` 类型别名，用于核心数据层的错误
//! 处理。各专门层（配置、IO、水文计算）在各自 crate 中扩展自己的
//! 错误类型。
//!
//! # 设计原则
//!
//! 1. **层次化**: 基础层只定义数据级错误
//! 2. **易用性**: 提供便捷的构造方法
//! 3. **可追溯**: 支持错误链

use thiserror::Error;

/// 统一结果类型
pub type YhResult<T> = Result<T, YhError>;

/// YuHong 基础错误类型
///
/// 数据级核心错误。配置、IO 与水文计算相关的错误分别在
/// `yh_config`、`yh_io` 和 `yh_hydrology` 中定义。
#[derive(Error, Debug)]
pub enum YhError {
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 栅格不一致（形状、分辨率或对齐）
    #[error("栅格不一致: {message}")]
    GridMismatch {
        /// 具体不一致的说明
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl YhError {
    /// 从IO错误创建
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 栅格不一致
    pub fn grid_mismatch(message: impl Into<String>) -> Self {
        Self::GridMismatch {
            message: message.into(),
        }
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl YhError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> YhResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查值是否在范围内
    #[inline]
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> YhResult<()> {
        if value < min || value > max {
            Err(Self::out_of_range(field, value, min, max))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for YhError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

// ========================================================================
// 测试
// ========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = YhError::invalid_input("样本为空");
        assert!(err.to_string().contains("无效的输入数据"));
    }

    #[test]
    fn test_io_error() {
        let err = YhError::io("读取失败");
        assert!(err.to_string().contains("IO错误"));
    }

    #[test]
    fn test_grid_mismatch() {
        let err = YhError::grid_mismatch("分辨率不同");
        assert!(err.to_string().contains("栅格不一致"));
    }

    #[test]
    fn test_check_size() {
        assert!(YhError::check_size("test", 10, 10).is_ok());
        assert!(YhError::check_size("test", 10, 5).is_err());
    }

    #[test]
    fn test_check_range() {
        assert!(YhError::check_range("cn", 50.0, 0.0, 100.0).is_ok());
        assert!(YhError::check_range("cn", -1.0, 0.0, 100.0).is_err());
        assert!(YhError::check_range("cn", 101.0, 0.0, 100.0).is_err());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let yh_err: YhError = io_err.into();
        assert!(matches!(yh_err, YhError::Io { .. }));
    }
}
