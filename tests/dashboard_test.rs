// ==========================================
// 驾驶舱汇总集成测试
// ==========================================
// 测试目标: KPI / 到货 vs 用量 / 月度趋势
// ==========================================


use msy_inventory::config::ForecastConfig;
use msy_inventory::engine::{DashboardSummary, InventoryPipeline};
use test_helpers::create_default_fixture;

fn summary() -> DashboardSummary {
    let fixture = create_default_fixture().unwrap();
    let report = InventoryPipeline::new(&ForecastConfig::default())
        .unwrap()
        .run_source(&fixture.source())
        .unwrap();
    DashboardSummary::from_report(&report)
}

#[test]
fn test_kpis() {
    let summary = summary();
    assert_eq!(summary.kpis.total_sales, 2000.0);
    assert_eq!(summary.kpis.total_orders, 78.0);
    assert_eq!(summary.kpis.ingredients_tracked, 4);
}

#[test]
fn test_received_vs_used() {
    let summary = summary();
    let names: Vec<&str> = summary
        .received_vs_used
        .iter()
        .map(|b| b.ingredient.as_str())
        .collect();
    assert_eq!(names, vec!["Beef", "Rice", "Scallion", "Tofu"]);

    let beef = &summary.received_vs_used[0];
    assert_eq!(beef.used, 60.0);
    assert_eq!(beef.received, Some(15.0));
    assert_eq!(beef.usage_rate_pct, Some(400.0));

    let scallion = &summary.received_vs_used[2];
    assert_eq!(scallion.used, 32.5);
    assert_eq!(scallion.received, None);
    assert_eq!(scallion.usage_rate_pct, None);
}

#[test]
fn test_usage_rate_ranking() {
    let summary = summary();
    let ranking: Vec<&str> = summary
        .by_usage_rate()
        .iter()
        .map(|b| b.ingredient.as_str())
        .collect();
    // Rice 与 Tofu 同为 50%,按名称
    assert_eq!(ranking, vec!["Beef", "Rice", "Tofu", "Scallion"]);
}

#[test]
fn test_monthly_trend() {
    let summary = summary();
    let trend: Vec<(String, f64)> = summary
        .trend
        .iter()
        .map(|p| (p.month.to_string(), p.total_used))
        .collect();
    assert_eq!(
        trend,
        vec![
            ("2025-01-01".to_string(), 28.0),
            ("2025-02-01".to_string(), 49.5),
            ("2025-03-01".to_string(), 45.0),
        ]
    );
}

#[test]
fn test_summary_serializes_to_json() {
    let json = serde_json::to_value(summary()).unwrap();
    assert_eq!(json["kpis"]["ingredients_tracked"], 4);
    assert_eq!(json["trend"][0]["month"], "2025-01-01");
}
