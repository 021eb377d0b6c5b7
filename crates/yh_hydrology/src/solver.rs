// crates/yh_hydrology/src/solver.rs

//! 淹没水位二分求解器
//!
//! 在高程样本上寻找最低的水面高程，使其以下的蓄水体积不小于目标
//! 径流体积。体积关于水位单调不减，因此用固定次数的二分搜索收敛。
//!
//! # 区间初始化
//!
//! `low = min(z)`，`high = max(z) + 0.1 * (max - min)`。10% 余量覆盖
//! 水面漫过流域最高点的常见情况，但只是启发式；若目标体积超过该
//! 上限处的容量，区间会被显式扩展到解析上界
//! `max + V / (n * A)`（水面高于所有像元时每个像元深度至少为
//! `surface - max`，该上界处容量必然不小于目标），并在解中标记。
//!
//! # 终止条件
//!
//! 固定 25 次迭代，区间宽度缩小到初始的 2^-25，对高程单位而言
//! 精度足够。返回 `high` 一侧，保证解处容量不低于目标。

use crate::error::{HydroError, HydroResult};
use crate::storage::volume_below;
use yh_foundation::numerics::min_max;

/// 二分迭代次数
pub const BISECTION_ITERATIONS: usize = 25;

/// 区间上界余量比例（相对高程范围）
pub const BRACKET_HEADROOM_RATIO: f64 = 0.1;

/// 求解结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSolution {
    /// 收敛的水面高程 [m]
    pub elevation: f64,
    /// 初始区间容量不足，上界被扩展
    pub bracket_expanded: bool,
}

/// 求淹没水位
///
/// 返回最低的水面高程，使 [`volume_below`] 不小于 `target_volume`。
///
/// # 边界情形
///
/// - `target_volume <= 0`：直接返回样本最小高程（无径流则无淹没）
/// - 空样本：返回 [`HydroError::EmptySample`]（前置条件违例，快速失败）
/// - 样本含非有限值或面积非正：同样快速失败
///
/// # 错误
///
/// 输入不满足前置条件时返回 [`HydroError`]；求解本身不会失败。
pub fn find_flood_surface(
    elevations: &[f64],
    target_volume: f64,
    cell_area: f64,
) -> HydroResult<SurfaceSolution> {
    if let Some(index) = elevations.iter().position(|z| !z.is_finite()) {
        return Err(HydroError::NonFiniteSample {
            index,
            value: elevations[index],
        });
    }
    let (min_elev, max_elev) = min_max(elevations).ok_or(HydroError::EmptySample)?;

    if !(cell_area > 0.0) {
        return Err(HydroError::InvalidCellArea(cell_area));
    }

    if target_volume <= 0.0 {
        return Ok(SurfaceSolution {
            elevation: min_elev,
            bracket_expanded: false,
        });
    }

    let mut low = min_elev;
    let mut high = max_elev + (max_elev - min_elev) * BRACKET_HEADROOM_RATIO;

    // 区间充分性检查：余量上界容量不足时扩展到解析上界
    let mut bracket_expanded = false;
    if volume_below(elevations, cell_area, high) < target_volume {
        let guaranteed = max_elev + target_volume / (elevations.len() as f64 * cell_area);
        log::warn!(
            "淹没水位区间不足: 余量上界{:.3}处容量低于目标体积{:.1}，上界扩展到{:.3}",
            high,
            target_volume,
            guaranteed
        );
        high = guaranteed;
        bracket_expanded = true;
    }

    for _ in 0..BISECTION_ITERATIONS {
        let mid = 0.5 * (low + high);
        let calc_vol = volume_below(elevations, cell_area, mid);
        if calc_vol < target_volume {
            low = mid;
        } else {
            high = mid;
        }
    }

    Ok(SurfaceSolution {
        elevation: high,
        bracket_expanded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample_fails_fast() {
        let result = find_flood_surface(&[], 100.0, 1.0);
        assert!(matches!(result, Err(HydroError::EmptySample)));
    }

    #[test]
    fn test_non_finite_sample_rejected() {
        let result = find_flood_surface(&[1.0, f64::NAN, 3.0], 10.0, 1.0);
        assert!(matches!(
            result,
            Err(HydroError::NonFiniteSample { index: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_cell_area_rejected() {
        let result = find_flood_surface(&[1.0, 2.0], 10.0, 0.0);
        assert!(matches!(result, Err(HydroError::InvalidCellArea(_))));
        let result = find_flood_surface(&[1.0, 2.0], 10.0, -4.0);
        assert!(matches!(result, Err(HydroError::InvalidCellArea(_))));
    }

    #[test]
    fn test_zero_target_returns_min() {
        let elev = [3.0, 1.5, 2.0];
        let sol = find_flood_surface(&elev, 0.0, 1.0).unwrap();
        assert_eq!(sol.elevation, 1.5);
        assert!(!sol.bracket_expanded);

        let sol = find_flood_surface(&elev, -5.0, 1.0).unwrap();
        assert_eq!(sol.elevation, 1.5);
    }

    #[test]
    fn test_unit_staircase_converges_to_3() {
        // 手算：水位 e∈[2,3] 时体积 = 3e-3，e∈[3,4] 时 = 4e-6，
        // 目标 6 m³ 的精确解为 e = 3.0
        let elev = [0.0, 1.0, 2.0, 3.0, 4.0];
        let sol = find_flood_surface(&elev, 6.0, 1.0).unwrap();
        assert!(
            (sol.elevation - 3.0).abs() < 1e-4,
            "收敛到{}",
            sol.elevation
        );
        assert!(!sol.bracket_expanded);
        // high 侧不变量：解处容量不低于目标
        assert!(volume_below(&elev, 1.0, sol.elevation) >= 6.0);
    }

    #[test]
    fn test_solution_meets_target_within_bracket() {
        let elev = [12.0, 13.0, 13.5, 14.0, 20.0];
        let area = 900.0;
        let capacity = volume_below(
            &elev,
            area,
            20.0 + (20.0 - 12.0) * BRACKET_HEADROOM_RATIO,
        );
        for frac in [0.1, 0.35, 0.6, 0.99] {
            let target = capacity * frac;
            let sol = find_flood_surface(&elev, target, area).unwrap();
            assert!(!sol.bracket_expanded);
            assert!(
                volume_below(&elev, area, sol.elevation) >= target,
                "目标比例{}处解不足",
                frac
            );
        }
    }

    #[test]
    fn test_bracket_expansion_flagged() {
        // 目标远超余量上界处容量
        let elev = [10.0, 10.5, 11.0];
        let area = 1.0;
        let buffered_capacity = volume_below(&elev, area, 11.0 + 0.1);
        let target = buffered_capacity * 100.0;

        let sol = find_flood_surface(&elev, target, area).unwrap();
        assert!(sol.bracket_expanded);
        assert!(volume_below(&elev, area, sol.elevation) >= target * (1.0 - 1e-9));
    }

    #[test]
    fn test_flat_terrain_expansion() {
        // 全平地形：范围为 0，余量上界与地面重合，必须扩展
        let elev = [5.0; 10];
        let sol = find_flood_surface(&elev, 30.0, 1.0).unwrap();
        assert!(sol.bracket_expanded);
        // 10 个像元蓄 30 m³ => 水深 3 m
        assert!((sol.elevation - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_idempotent() {
        let elev = [31.2, 28.8, 30.0, 29.5, 33.1];
        let a = find_flood_surface(&elev, 250.0, 900.0).unwrap();
        let b = find_flood_surface(&elev, 250.0, 900.0).unwrap();
        assert_eq!(a.elevation.to_bits(), b.elevation.to_bits());
    }
}
