// crates/yh_config/src/scenario.rs

//! SimulationConfig - 模拟配置（JSON）
//!
//! 对应一次完整批处理的全部输入：路径、流域清单、降雨/土地利用
//! 情景、CN 映射规则和输出约定。配置加载后即不可变。
//!
//! 流域 DEM 瓦片假定已按流域面裁剪完成（多边形裁剪与重投影由外部
//! GIS 工具链负责，不在本项目范围内）。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use yh_foundation::validation::{ValidationError, ValidationReport, ValidationWarning};
use yh_hydrology::remap::CnMapping;

/// 模拟配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 输入数据目录
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// 输出结果目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// 流域清单（每个流域一个预裁剪的 DEM 瓦片）
    pub watersheds: Vec<WatershedSpec>,

    /// 情景表：情景名 → 降雨与土地利用
    pub scenarios: BTreeMap<String, ScenarioSpec>,

    /// 土地利用 → CN 映射规则
    #[serde(default)]
    pub cn_mapping: CnMapping,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// 单个流域
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatershedSpec {
    /// 流域唯一 ID（对应原始数据的 HYBAS_ID 字段）
    pub id: String,
    /// DEM 瓦片文件名（相对输入目录）
    pub dem_file: PathBuf,
}

/// 单个情景：年份/重现期 + 降雨深度 + 土地利用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// 情景降雨深度 [mm]
    pub rainfall_mm: f64,
    /// 土地利用栅格文件名（相对输入目录，覆盖全部流域范围）
    pub landuse_file: PathBuf,
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ESRI ASCII 栅格
    #[default]
    Asc,
    /// GeoTIFF（需要 gdal 特性）
    Gtiff,
}

impl OutputFormat {
    /// 文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Gtiff => "tif",
        }
    }
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出格式
    #[serde(default)]
    pub format: OutputFormat,

    /// 深度栅格的无数据哨兵值
    ///
    /// 默认 0 沿用原始产出约定（0 同时表示"无淹没"）；
    /// 需要区分无数据与零深度时配置为独立值（如 -9999）。
    #[serde(default = "default_nodata")]
    pub nodata: f64,

    /// 合并结果文件名前缀
    #[serde(default = "default_merged_prefix")]
    pub merged_prefix: String,
}

fn default_nodata() -> f64 {
    0.0
}
fn default_merged_prefix() -> String {
    "Final_Flood_Depth".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            nodata: default_nodata(),
            merged_prefix: default_merged_prefix(),
        }
    }
}

impl SimulationConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;

        let config: SimulationConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性（硬性错误）
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watersheds.is_empty() {
            return Err(ConfigError::Missing("watersheds 清单为空".to_string()));
        }

        for ws in &self.watersheds {
            if ws.id.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "watersheds.id".to_string(),
                    value: String::new(),
                    reason: "流域 ID 不能为空".to_string(),
                });
            }
        }

        for (name, sc) in &self.scenarios {
            if !(sc.rainfall_mm >= 0.0 && sc.rainfall_mm.is_finite()) {
                return Err(ConfigError::InvalidValue {
                    key: format!("scenarios.{}.rainfall_mm", name),
                    value: sc.rainfall_mm.to_string(),
                    reason: "降雨深度必须为非负有限值".to_string(),
                });
            }
        }

        self.cn_mapping
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                key: "cn_mapping".to_string(),
                value: String::new(),
                reason: e.to_string(),
            })?;

        if !self.output.nodata.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "output.nodata".to_string(),
                value: self.output.nodata.to_string(),
                reason: "哨兵值必须有限".to_string(),
            });
        }

        Ok(())
    }

    /// 软性检查（文件存在性与可疑配置），用于 validate 命令
    pub fn check(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        for ws in &self.watersheds {
            let path = self.dem_path(ws);
            if !path.exists() {
                report.add_error(ValidationError::MissingFile {
                    field: format!("watersheds.{}.dem_file", ws.id),
                    path,
                });
            }
        }

        if self.scenarios.is_empty() {
            report.add_warning(ValidationWarning::Custom {
                message: "scenarios 为空，批处理不会产生任何输出".to_string(),
            });
        }

        for (name, sc) in &self.scenarios {
            let path = self.landuse_path(sc);
            if !path.exists() {
                // 缺失土地利用文件在运行时跳过该情景，不算硬错误
                report.add_warning(ValidationWarning::Custom {
                    message: format!(
                        "情景{}的土地利用文件不存在: {}，运行时将跳过",
                        name,
                        path.display()
                    ),
                });
            }
            if sc.rainfall_mm == 0.0 {
                report.add_warning(ValidationWarning::SuspiciousValue {
                    field: format!("scenarios.{}.rainfall_mm", name),
                    value: 0.0,
                    message: "零降雨情景不会产生淹没".to_string(),
                });
            }
        }

        report
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }

    /// 流域 DEM 瓦片的完整路径
    pub fn dem_path(&self, ws: &WatershedSpec) -> PathBuf {
        self.input_dir.join(&ws.dem_file)
    }

    /// 情景土地利用栅格的完整路径
    pub fn landuse_path(&self, sc: &ScenarioSpec) -> PathBuf {
        self.input_dir.join(&sc.landuse_file)
    }

    /// 单个流域单个情景的深度瓦片文件名
    pub fn depth_tile_name(&self, watershed_id: &str, scenario: &str) -> String {
        format!(
            "Flood_{}_{}.{}",
            watershed_id,
            scenario,
            self.output.format.extension()
        )
    }

    /// 情景合并结果文件名
    pub fn merged_name(&self, scenario: &str) -> String {
        format!(
            "{}_{}.{}",
            self.output.merged_prefix,
            scenario,
            self.output.format.extension()
        )
    }
}
