// crates/yh_foundation/src/numerics.rs

//! 数值工具模块
//!
//! 提供 Kahan 补偿求和与基础统计函数。体积累加可能跨越数百万个栅格
//! 单元，朴素求和的舍入误差会进入水位求解的收敛判断，因此统一使用
//! 补偿求和。

/// Kahan 求和器
///
/// 使用 Kahan 算法减少浮点累加误差。
///
/// # 示例
///
/// ```
/// use yh_foundation::numerics::KahanSum;
///
/// let sum = KahanSum::sum_iter([0.1f64; 1000]);
/// assert!((sum - 100.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    /// 创建新的求和器
    pub fn new() -> Self {
        Self {
            sum: 0.0,
            compensation: 0.0,
        }
    }

    /// 添加一个值
    #[inline]
    pub fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    /// 获取当前求和值
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum
    }

    /// 重置求和器
    #[inline]
    pub fn reset(&mut self) {
        self.sum = 0.0;
        self.compensation = 0.0;
    }

    /// 从迭代器求和
    pub fn sum_iter<I: IntoIterator<Item = f64>>(iter: I) -> f64 {
        let mut kahan = Self::new();
        for v in iter {
            kahan.add(v);
        }
        kahan.value()
    }
}

/// 算术平均值（补偿求和）
///
/// 空切片返回 `None`。
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(KahanSum::sum_iter(values.iter().copied()) / values.len() as f64)
}

/// 单次遍历求最小值与最大值
///
/// 空切片返回 `None`。NaN 元素会传播到结果中，由调用方检查。
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    let mut min = first;
    let mut max = first;
    for v in iter {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    Some((min, max))
}
