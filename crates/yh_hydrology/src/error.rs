// crates/yh_hydrology/src/error.rs

//! 水文层错误类型

/// 水文计算错误
#[derive(Debug, thiserror::Error)]
pub enum HydroError {
    /// 高程样本为空
    #[error("高程样本为空: 流域内没有有效像元")]
    EmptySample,

    /// 高程样本包含非有限值
    #[error("高程样本包含非有限值: 索引{index}处为{value}")]
    NonFiniteSample {
        /// 非有限值所在索引
        index: usize,
        /// 实际值
        value: f64,
    },

    /// 像元面积非正
    #[error("像元面积必须为正: {0}")]
    InvalidCellArea(f64),

    /// CN 映射规则无效
    #[error("CN 映射规则无效: {message}")]
    InvalidMapping {
        /// 具体原因
        message: String,
    },
}

/// 水文层结果类型
pub type HydroResult<T> = Result<T, HydroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HydroError::EmptySample;
        assert!(err.to_string().contains("高程样本为空"));

        let err = HydroError::InvalidCellArea(-1.0);
        assert!(err.to_string().contains("-1"));
    }
}
