// ==========================================
// MSY 库存智能 - 引擎层错误类型
// ==========================================
// 所有错误均为致命错误: 中止整次运行,不产出部分结果
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// 数据源不可用 / 表结构错误
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("配置无效: {0}")]
    InvalidConfig(String),

    #[error("台账导出失败: {0}")]
    Export(String),
}

impl PipelineError {
    pub fn is_schema_error(&self) -> bool {
        matches!(self, PipelineError::Import(e) if e.is_schema_error())
    }

    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, PipelineError::Import(e) if e.is_source_unavailable())
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Export(err.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Export(err.to_string())
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
