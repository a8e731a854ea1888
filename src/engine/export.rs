// ==========================================
// MSY 库存智能 - 台账 CSV 导出
// ==========================================
// 布局:
// - full:   Month, Ingredient, TotalUsed, Orders, TotalReceived, WeeklySupply,
//           Unit, ForecastNextMonth, Gap_Received_vs_Used, ReorderFlag
// - alerts: Month, Ingredient, TotalUsed, TotalReceived, ForecastNextMonth,
//           Unit, ReorderFlag
// 格式: 含表头,无索引列；Month 为 YYYY-MM-DD；缺失供给值写空字段
// 红线: 按传入顺序逐行写出,不重新排序
// ==========================================

use crate::config::ExportLayout;
use crate::domain::ledger::CombinedLedgerRow;
use crate::domain::types::ReorderFlag;
use crate::engine::error::{PipelineError, PipelineResult};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

const MONTH_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize)]
struct FullRow<'a> {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Ingredient")]
    ingredient: &'a str,
    #[serde(rename = "TotalUsed")]
    total_used: f64,
    #[serde(rename = "Orders")]
    orders: f64,
    #[serde(rename = "TotalReceived")]
    total_received: Option<f64>,
    #[serde(rename = "WeeklySupply")]
    weekly_supply: Option<f64>,
    #[serde(rename = "Unit")]
    unit: &'a str,
    #[serde(rename = "ForecastNextMonth")]
    forecast_next_month: f64,
    #[serde(rename = "Gap_Received_vs_Used")]
    gap_received_vs_used: f64,
    #[serde(rename = "ReorderFlag")]
    reorder_flag: ReorderFlag,
}

impl<'a> From<&'a CombinedLedgerRow> for FullRow<'a> {
    fn from(row: &'a CombinedLedgerRow) -> Self {
        Self {
            month: row.month.format(MONTH_FORMAT).to_string(),
            ingredient: &row.ingredient,
            total_used: row.total_used,
            orders: row.orders,
            total_received: row.total_received,
            weekly_supply: row.weekly_supply,
            unit: &row.unit,
            forecast_next_month: row.forecast_next_month,
            gap_received_vs_used: row.gap_received_vs_used,
            reorder_flag: row.reorder_flag,
        }
    }
}

#[derive(Serialize)]
struct AlertRow<'a> {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Ingredient")]
    ingredient: &'a str,
    #[serde(rename = "TotalUsed")]
    total_used: f64,
    #[serde(rename = "TotalReceived")]
    total_received: Option<f64>,
    #[serde(rename = "ForecastNextMonth")]
    forecast_next_month: f64,
    #[serde(rename = "Unit")]
    unit: &'a str,
    #[serde(rename = "ReorderFlag")]
    reorder_flag: ReorderFlag,
}

impl<'a> From<&'a CombinedLedgerRow> for AlertRow<'a> {
    fn from(row: &'a CombinedLedgerRow) -> Self {
        Self {
            month: row.month.format(MONTH_FORMAT).to_string(),
            ingredient: &row.ingredient,
            total_used: row.total_used,
            total_received: row.total_received,
            forecast_next_month: row.forecast_next_month,
            unit: &row.unit,
            reorder_flag: row.reorder_flag,
        }
    }
}

pub struct LedgerExporter {
    layout: ExportLayout,
}

impl LedgerExporter {
    pub fn new(layout: ExportLayout) -> Self {
        Self { layout }
    }

    /// 写出到任意 writer
    pub fn write<W: Write>(&self, ledger: &[CombinedLedgerRow], writer: W) -> PipelineResult<W> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if ledger.is_empty() {
            // 空台账仍写表头
            csv_writer.write_record(self.headers())?;
        }

        for row in ledger {
            match self.layout {
                ExportLayout::Full => csv_writer.serialize(FullRow::from(row))?,
                ExportLayout::Alerts => csv_writer.serialize(AlertRow::from(row))?,
            }
        }

        csv_writer
            .into_inner()
            .map_err(|e| PipelineError::Export(e.to_string()))
    }

    /// 写出为字符串
    pub fn to_csv_string(&self, ledger: &[CombinedLedgerRow]) -> PipelineResult<String> {
        let bytes = self.write(ledger, Vec::new())?;
        String::from_utf8(bytes).map_err(|e| PipelineError::Export(e.to_string()))
    }

    /// 写出到文件（覆盖已存在的文件）
    #[instrument(skip(self, ledger), fields(rows = ledger.len(), layout = %self.layout))]
    pub fn write_to_path(&self, ledger: &[CombinedLedgerRow], path: &Path) -> PipelineResult<()> {
        let file = std::fs::File::create(path).map_err(|e| {
            PipelineError::Export(format!("无法创建导出文件 {}: {}", path.display(), e))
        })?;
        let mut file = self.write(ledger, file)?;
        file.flush()?;

        info!(path = %path.display(), "台账已导出");
        Ok(())
    }

    fn headers(&self) -> &'static [&'static str] {
        match self.layout {
            ExportLayout::Full => &[
                "Month",
                "Ingredient",
                "TotalUsed",
                "Orders",
                "TotalReceived",
                "WeeklySupply",
                "Unit",
                "ForecastNextMonth",
                "Gap_Received_vs_Used",
                "ReorderFlag",
            ],
            ExportLayout::Alerts => &[
                "Month",
                "Ingredient",
                "TotalUsed",
                "TotalReceived",
                "ForecastNextMonth",
                "Unit",
                "ReorderFlag",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ledger() -> Vec<CombinedLedgerRow> {
        vec![
            CombinedLedgerRow {
                month: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                ingredient: "Beef".to_string(),
                total_used: 10.0,
                orders: 10.0,
                total_received: Some(15.0),
                weekly_supply: Some(15.0),
                unit: "lbs".to_string(),
                forecast_next_month: 10.0,
                gap_received_vs_used: -5.0,
                reorder_flag: ReorderFlag::Ok,
            },
            CombinedLedgerRow {
                month: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                ingredient: "Scallion".to_string(),
                total_used: 5.0,
                orders: 10.0,
                total_received: None,
                weekly_supply: None,
                unit: String::new(),
                forecast_next_month: 5.0,
                gap_received_vs_used: 5.0,
                reorder_flag: ReorderFlag::ReorderSoon,
            },
        ]
    }

    #[test]
    fn test_full_layout() {
        let csv = LedgerExporter::new(ExportLayout::Full)
            .to_csv_string(&ledger())
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Month,Ingredient,TotalUsed,Orders,TotalReceived,WeeklySupply,Unit,ForecastNextMonth,Gap_Received_vs_Used,ReorderFlag"
        );
        assert_eq!(lines[1], "2025-01-01,Beef,10.0,10.0,15.0,15.0,lbs,10.0,-5.0,OK");
        assert_eq!(lines[2], "2025-01-01,Scallion,5.0,10.0,,,,5.0,5.0,Reorder Soon");
    }

    #[test]
    fn test_alerts_layout() {
        let csv = LedgerExporter::new(ExportLayout::Alerts)
            .to_csv_string(&ledger())
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Month,Ingredient,TotalUsed,TotalReceived,ForecastNextMonth,Unit,ReorderFlag"
        );
        assert_eq!(lines[2], "2025-01-01,Scallion,5.0,,5.0,,Reorder Soon");
    }

    #[test]
    fn test_empty_ledger_writes_header_only() {
        let csv = LedgerExporter::new(ExportLayout::Alerts)
            .to_csv_string(&[])
            .unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("Month,Ingredient"));
    }

    #[test]
    fn test_write_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MSY_Combined.csv");

        LedgerExporter::new(ExportLayout::Full)
            .write_to_path(&ledger(), &path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
