// ==========================================
// MSY 库存智能 - 原始表结构
// ==========================================
// 用途: 文件解析产物（表头 + 字符串单元格）,规范化的输入
// 表头与单元格文本均已 TRIM
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RawTable - 原始表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub name: String,          // 来源名称（工作表名 / 文件名）
    pub headers: Vec<String>,  // 表头（保持原始顺序）
    pub rows: Vec<Vec<String>>, // 数据行（行长度可能短于表头）
}

impl RawTable {
    /// 创建原始表,表头与单元格统一 TRIM
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|v| v.trim().to_string()).collect())
                .collect(),
        }
    }

    /// 由字符串切片构造（测试 / 内存数据）
    pub fn from_rows(name: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            name,
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
    }

    /// 读取单元格（越界返回空串）
    pub fn cell<'a>(&self, row: &'a [String], col: usize) -> &'a str {
        row.get(col).map(String::as_str).unwrap_or("")
    }

    /// 可选列读取: 列不存在时返回 None
    pub fn optional_cell<'a>(&self, row: &'a [String], col: Option<usize>) -> Option<&'a str> {
        col.map(|c| self.cell(row, c))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// RawTables - 三张原始表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTables {
    pub sales: RawTable,
    pub ingredients: RawTable,
    pub shipments: RawTable,
}
