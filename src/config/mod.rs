// ==========================================
// MSY 库存智能 - 配置层
// ==========================================
// 职责: 数据源 / 预测窗口 / 导出参数
// 存储: JSON 文件 + 环境变量覆写
// ==========================================

pub mod pipeline_config;

// 重导出核心配置
pub use pipeline_config::{
    config_keys, ConfigError, ExportConfig, ExportLayout, ForecastConfig, PipelineConfig,
    SourceConfig,
};
