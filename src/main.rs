// ==========================================
// MSY 库存智能 - 命令行入口
// ==========================================
// 流程: 加载配置 → 读取数据源 → 对账与预测 → 导出 CSV → 打印 KPI
// 配置优先级: 命令行 > 环境变量 > JSON 配置文件 > 默认值
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use msy_inventory::config::{ExportLayout, PipelineConfig};
use msy_inventory::engine::{DashboardSummary, InventoryPipeline, LedgerExporter};
use msy_inventory::importer::{CsvFileSource, TableSource, WorkbookSource};
use msy_inventory::logging;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "msy-inventory")]
#[command(version, about = "Mai Shan Yun 库存对账与补货预警")]
struct Cli {
    /// JSON 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// Excel 工作簿（含销售 / 配料映射 / 到货三个工作表）
    #[arg(long, conflicts_with_all = ["sales", "ingredients", "shipments"])]
    workbook: Option<PathBuf>,

    /// 销售 CSV
    #[arg(long, requires_all = ["ingredients", "shipments"])]
    sales: Option<PathBuf>,

    /// 配料映射 CSV
    #[arg(long, requires_all = ["sales", "shipments"])]
    ingredients: Option<PathBuf>,

    /// 到货 CSV
    #[arg(long, requires_all = ["sales", "ingredients"])]
    shipments: Option<PathBuf>,

    /// 台账导出路径
    #[arg(long)]
    output: Option<PathBuf>,

    /// 导出布局: full | alerts
    #[arg(long)]
    layout: Option<ExportLayout>,

    /// 滑动平均窗口
    #[arg(long)]
    window: Option<usize>,

    /// 以 JSON 打印驾驶舱汇总
    #[arg(long, default_value_t = false)]
    summary: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<PipelineConfig> {
        let config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("加载配置失败: {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        let mut config = config
            .apply_env_overrides()
            .context("环境变量覆写失败")?;

        if let Some(path) = &self.workbook {
            config.source.workbook_path = path.clone();
        }
        if let Some(path) = &self.output {
            config.export.output_path = path.clone();
        }
        if let Some(layout) = self.layout {
            config.export.layout = layout;
        }
        if let Some(window) = self.window {
            config.forecast.window = window;
        }

        Ok(config)
    }

    fn source(&self, config: &PipelineConfig) -> Box<dyn TableSource> {
        match (&self.sales, &self.ingredients, &self.shipments) {
            (Some(sales), Some(ingredients), Some(shipments)) => Box::new(CsvFileSource {
                sales: sales.clone(),
                ingredients: ingredients.clone(),
                shipments: shipments.clone(),
            }),
            _ => Box::new(WorkbookSource::from(&config.source)),
        }
    }
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    tracing::info!(
        version = msy_inventory::VERSION,
        window = config.forecast.window,
        layout = %config.export.layout,
        "{} 启动",
        msy_inventory::APP_NAME
    );

    let pipeline = InventoryPipeline::new(&config.forecast)?;
    let source = cli.source(&config);
    let report = pipeline
        .run_source(source.as_ref())
        .with_context(|| format!("对账失败: {}", source.describe()))?;

    LedgerExporter::new(config.export.layout)
        .write_to_path(&report.ledger, &config.export.output_path)
        .with_context(|| format!("导出失败: {}", config.export.output_path.display()))?;

    let reorder = report.reorder_rows().count();
    println!("Total Sales:   ${:.2}", report.totals.total_sales);
    println!("Total Orders:  {}", report.totals.total_orders);
    println!("Ledger Rows:   {}", report.ledger.len());
    println!("Reorder Soon:  {}", reorder);
    println!("Output:        {}", config.export.output_path.display());

    if cli.summary {
        let summary = DashboardSummary::from_report(&report);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
