// ==========================================
// MSY 库存智能 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 数据源不可用（读取阶段） / 表结构错误（规范化阶段）
// 两类错误均为致命错误,整次运行中止,不产出部分结果
// ==========================================

use crate::domain::types::TableKind;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 数据源不可用 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("工作簿打开失败 ({path}): {message}（文件是否被 Excel 占用?）")]
    WorkbookOpen { path: String, message: String },

    #[error("工作表不存在: '{sheet}'，实际工作表: {available:?}")]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("CSV 读取失败 ({path}): {message}")]
    CsvRead { path: String, message: String },

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 表结构错误 =====
    #[error("{table} 缺少必需列: {missing:?}\n实际列: {found:?}")]
    Schema {
        table: TableKind,
        missing: Vec<String>,
        found: Vec<String>,
    },
}

impl ImportError {
    /// 是否为数据源不可用错误（读取阶段失败,尚未开始清洗）
    pub fn is_source_unavailable(&self) -> bool {
        !self.is_schema_error()
    }

    /// 是否为表结构错误
    pub fn is_schema_error(&self) -> bool {
        matches!(self, ImportError::Schema { .. })
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        let path = err
            .position()
            .map(|p| format!("line {}", p.line()))
            .unwrap_or_else(|| "<reader>".to_string());
        ImportError::CsvRead {
            path,
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
