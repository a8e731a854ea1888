// ==========================================
// MSY 库存智能 - 文件解析器实现
// ==========================================
// 职责: 读取数据源 → 三张原始表（清洗开始前的唯一 I/O）
// 支持: Excel 工作簿 (.xlsx/.xls, 三个工作表) / 三个 CSV 文件
// 红线: 任何读取失败均为"数据源不可用",在清洗开始前中止
// ==========================================

use crate::config::SourceConfig;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::raw_table::{RawTable, RawTables};
use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

// ==========================================
// TableSource Trait - 数据源接口
// ==========================================
pub trait TableSource {
    /// 数据源描述（用于日志）
    fn describe(&self) -> String;

    /// 读取三张原始表
    fn load_tables(&self) -> ImportResult<RawTables>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析 CSV 文件为原始表
    pub fn parse_file(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        self.parse_reader(&name, file).map_err(|e| match e {
            ImportError::CsvRead { message, .. } => ImportError::CsvRead {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// 从任意 Reader 解析（首行为表头）
    pub fn parse_reader<R: Read>(&self, name: &str, reader: R) -> ImportResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Vec<String> = record.iter().map(|v| v.to_string()).collect();

            // 跳过完全空白的行
            if row.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            rows.push(row);
        }

        Ok(RawTable::new(name, headers, rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 按工作表名读取多个工作表（工作簿只打开一次）
    pub fn parse_sheets(&self, file_path: &Path, sheets: &[&str]) -> ImportResult<Vec<RawTable>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件
        let mut workbook = open_workbook_auto(path).map_err(|e| ImportError::WorkbookOpen {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let available = workbook.sheet_names().to_vec();
        debug!(sheets = ?available, "工作簿工作表");

        sheets
            .iter()
            .map(|sheet| {
                if !available.iter().any(|s| s == sheet) {
                    return Err(ImportError::SheetNotFound {
                        sheet: sheet.to_string(),
                        available: available.clone(),
                    });
                }

                let range = workbook
                    .worksheet_range(sheet)
                    .map_err(|e| ImportError::WorkbookOpen {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })?;

                Ok(range_to_table(sheet, &range))
            })
            .collect()
    }
}

/// 工作表区域 → 原始表（首行为表头）
fn range_to_table(name: &str, range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();

    // 空工作表 → 无表头的空表（后续由规范化报 Schema 错误）
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => return RawTable::new(name, Vec::new(), Vec::new()),
    };

    let data: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(|v| v.trim().is_empty()))
        .collect();

    RawTable::new(name, headers, data)
}

/// 单元格 → 文本
///
/// 日期单元格转为 YYYY-MM-DD（由 calamine 按工作簿的 1900 / 1904 日期系统换算）,
/// 其余使用 calamine 的文本表示
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|value| value.date().format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::DateTimeIso(s) => s.clone(),
        other => other.to_string(),
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// WorkbookSource - 单工作簿三工作表
// ==========================================
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    pub path: PathBuf,
    pub sales_sheet: String,
    pub ingredient_sheet: String,
    pub shipment_sheet: String,
}

impl From<&SourceConfig> for WorkbookSource {
    fn from(config: &SourceConfig) -> Self {
        Self {
            path: config.workbook_path.clone(),
            sales_sheet: config.sales_sheet.clone(),
            ingredient_sheet: config.ingredient_sheet.clone(),
            shipment_sheet: config.shipment_sheet.clone(),
        }
    }
}

impl TableSource for WorkbookSource {
    fn describe(&self) -> String {
        format!(
            "workbook {} [{}, {}, {}]",
            self.path.display(),
            self.sales_sheet,
            self.ingredient_sheet,
            self.shipment_sheet
        )
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_tables(&self) -> ImportResult<RawTables> {
        let mut tables = ExcelParser
            .parse_sheets(
                &self.path,
                &[
                    self.sales_sheet.as_str(),
                    self.ingredient_sheet.as_str(),
                    self.shipment_sheet.as_str(),
                ],
            )?
            .into_iter();

        // parse_sheets 成功时与请求的工作表一一对应
        let (Some(sales), Some(ingredients), Some(shipments)) =
            (tables.next(), tables.next(), tables.next())
        else {
            return Err(ImportError::FileReadError(format!(
                "工作簿读取不完整: {}",
                self.path.display()
            )));
        };

        info!(
            sales_rows = sales.row_count(),
            ingredient_rows = ingredients.row_count(),
            shipment_rows = shipments.row_count(),
            "工作簿读取完成"
        );

        Ok(RawTables {
            sales,
            ingredients,
            shipments,
        })
    }
}

// ==========================================
// CsvFileSource - 三个 CSV 文件
// ==========================================
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    pub sales: PathBuf,
    pub ingredients: PathBuf,
    pub shipments: PathBuf,
}

impl TableSource for CsvFileSource {
    fn describe(&self) -> String {
        format!(
            "csv [{}, {}, {}]",
            self.sales.display(),
            self.ingredients.display(),
            self.shipments.display()
        )
    }

    #[instrument(skip(self))]
    fn load_tables(&self) -> ImportResult<RawTables> {
        let parser = CsvParser;
        let tables = RawTables {
            sales: parser.parse_file(&self.sales)?,
            ingredients: parser.parse_file(&self.ingredients)?,
            shipments: parser.parse_file(&self.shipments)?,
        };

        info!(
            sales_rows = tables.sales.row_count(),
            ingredient_rows = tables.ingredients.row_count(),
            shipment_rows = tables.shipments.row_count(),
            "CSV 读取完成"
        );

        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let file = csv_file(" Month ,Item Name,Count\n2025-01-01, Tea ,2\n2025-02-01,Tea,3\n");

        let table = CsvParser.parse_file(file.path()).unwrap();
        assert_eq!(table.headers, vec!["Month", "Item Name", "Count"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], "Tea");
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let file = csv_file("Ingredient,QtyPerShipment\nBeef,10\n,\nRice,5\n");

        let table = CsvParser.parse_file(file.path()).unwrap();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_csv_parser_flexible_rows() {
        let table = CsvParser
            .parse_reader("inline", "A,B,C\n1,2\n".as_bytes())
            .unwrap();
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.cell(&table.rows[0], 2), "");
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let err = CsvParser
            .parse_file(Path::new("non_existent.csv"))
            .unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
        assert!(err.is_source_unavailable());
    }

    #[test]
    fn test_excel_parser_rejects_other_extensions() {
        let file = csv_file("A\n1\n");
        let err = ExcelParser.parse_sheets(file.path(), &["Sheet1"]).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_date_cell_1900_system() {
        let cell = Data::DateTime(ExcelDateTime::new(45658.0, ExcelDateTimeType::DateTime, false));
        assert_eq!(cell_to_string(&cell), "2025-01-01");

        // 时间部分不影响日期
        let cell = Data::DateTime(ExcelDateTime::new(45689.75, ExcelDateTimeType::DateTime, false));
        assert_eq!(cell_to_string(&cell), "2025-02-01");
    }

    #[test]
    fn test_date_cell_1904_system() {
        // 1904 日期系统: 序列号比 1900 系统小 1462 天
        let cell = Data::DateTime(ExcelDateTime::new(44196.0, ExcelDateTimeType::DateTime, true));
        assert_eq!(cell_to_string(&cell), "2025-01-01");
    }

    #[test]
    fn test_plain_cells_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Float(10.0)), "10");
        assert_eq!(cell_to_string(&Data::String("Beef".to_string())), "Beef");
    }
}
