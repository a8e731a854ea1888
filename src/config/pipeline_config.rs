// ==========================================
// MSY 库存智能 - 运行配置
// ==========================================
// 来源优先级: 命令行 > 环境变量 > JSON 配置文件 > 默认值
// 红线: 管道本身不读取任何全局配置,所有参数显式传入
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

// ==========================================
// 配置键 / 默认值
// ==========================================
pub mod config_keys {
    /// 工作簿路径覆写
    pub const ENV_WORKBOOK: &str = "MSY_INVENTORY_WORKBOOK";
    /// 预测窗口覆写
    pub const ENV_FORECAST_WINDOW: &str = "MSY_INVENTORY_FORECAST_WINDOW";
    /// 导出路径覆写
    pub const ENV_OUTPUT: &str = "MSY_INVENTORY_OUTPUT";

    pub const DEFAULT_WORKBOOK: &str = "Restaurant Data.xlsx";
    pub const DEFAULT_SALES_SHEET: &str = "Restaurant Data";
    pub const DEFAULT_INGREDIENT_SHEET: &str = "CSVIngrediant";
    pub const DEFAULT_SHIPMENT_SHEET: &str = "CSVShipment";
    pub const DEFAULT_FORECAST_WINDOW: usize = 3;
    pub const DEFAULT_OUTPUT: &str = "MSY_Combined.csv";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    Read { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    Parse { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value})")]
    InvalidValue { key: String, value: String },
}

// ==========================================
// SourceConfig - 数据源
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub workbook_path: PathBuf,
    pub sales_sheet: String,
    pub ingredient_sheet: String,
    pub shipment_sheet: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from(config_keys::DEFAULT_WORKBOOK),
            sales_sheet: config_keys::DEFAULT_SALES_SHEET.to_string(),
            ingredient_sheet: config_keys::DEFAULT_INGREDIENT_SHEET.to_string(),
            shipment_sheet: config_keys::DEFAULT_SHIPMENT_SHEET.to_string(),
        }
    }
}

// ==========================================
// ForecastConfig - 预测参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// 滑动平均窗口（当前期 + 前 window-1 期）
    pub window: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window: config_keys::DEFAULT_FORECAST_WINDOW,
        }
    }
}

// ==========================================
// ExportLayout - 导出列布局
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportLayout {
    /// 全部台账列
    #[default]
    Full,
    /// 补货预警视图（7 列）
    Alerts,
}

impl FromStr for ExportLayout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(ExportLayout::Full),
            "alerts" => Ok(ExportLayout::Alerts),
            other => Err(ConfigError::InvalidValue {
                key: "export.layout".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportLayout::Full => write!(f, "full"),
            ExportLayout::Alerts => write!(f, "alerts"),
        }
    }
}

// ==========================================
// ExportConfig - 导出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: PathBuf,
    pub layout: ExportLayout,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(config_keys::DEFAULT_OUTPUT),
            layout: ExportLayout::Full,
        }
    }
}

// ==========================================
// PipelineConfig - 运行配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source: SourceConfig,
    pub forecast: ForecastConfig,
    pub export: ExportConfig,
}

impl PipelineConfig {
    /// 从 JSON 文件加载（缺失字段使用默认值）
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆写
    pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// 应用覆写（lookup: 键 → 值）
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_empty(config_keys::ENV_WORKBOOK) {
            self.source.workbook_path = PathBuf::from(path.trim());
        }

        if let Some(window) = non_empty(config_keys::ENV_FORECAST_WINDOW) {
            self.forecast.window =
                window
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: config_keys::ENV_FORECAST_WINDOW.to_string(),
                        value: window.clone(),
                    })?;
        }

        if let Some(output) = non_empty(config_keys::ENV_OUTPUT) {
            self.export.output_path = PathBuf::from(output.trim());
        }

        Ok(self)
    }
}
