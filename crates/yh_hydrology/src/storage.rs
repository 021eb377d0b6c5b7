// crates/yh_hydrology/src/storage.rs

//! 蓄水体积估算
//!
//! 计算高程样本中低于指定水位的空隙总体积。求解器每次二分迭代都会
//! 调用一次，样本可能有数百万个像元，因此保持单次切片遍历，
//! 累加使用 Kahan 补偿求和。

use yh_foundation::numerics::KahanSum;

/// 指定水位以下的空隙体积
///
/// 对每个样本取 `max(surface - z, 0)`，求和后乘以像元面积。
/// 高于水位的像元贡献为零。
///
/// 对固定的样本与面积，该函数关于 `surface` 单调不减，
/// 这是二分求解正确性的前提。
///
/// # 参数
///
/// - `elevations`: 有效像元高程样本
/// - `cell_area`: 单个像元平面面积 [m^2]
/// - `surface`: 候选水面高程 [m]
pub fn volume_below(elevations: &[f64], cell_area: f64, surface: f64) -> f64 {
    let mut sum = KahanSum::new();
    for &z in elevations {
        let depth = surface - z;
        if depth > 0.0 {
            sum.add(depth);
        }
    }
    sum.value() * cell_area
}
