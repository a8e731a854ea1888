// ==========================================
// MSY 库存智能 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 数值强制转换 / 金额清洗 / 月份归一化
// 红线: 无法解析的数值一律静默置 0,不报错也不告警
// ==========================================

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// 纯月份文本（如 "January"）的补全后缀
const BARE_MONTH_SUFFIX: &str = " 1, 2025";

// 完整日期格式（按顺序尝试）
// 格式中的空格可匹配零个空白: 不要加入 "%B %d %Y",否则 "March 2025" 会被读成 0025 年
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%d %B %Y",
];

// 日期时间格式
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%SZ",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

// 年月格式（无日,补 "01" 后解析）
const YEAR_MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y/%m", "%m/%Y", "%B %Y"];

pub struct DataCleaner;

impl DataCleaner {
    /// 清洗文本（TRIM）
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 数值强制转换: 空 / 无法解析 / 非有限值 → 0.0
    pub fn coerce_f64(&self, value: &str) -> f64 {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// 金额清洗: 去除 "$" 与 "," 后转换,无法解析 → 0.0
    pub fn coerce_amount(&self, value: &str) -> f64 {
        let stripped: String = value.chars().filter(|c| *c != '$' && *c != ',').collect();
        self.coerce_f64(&stripped)
    }

    /// 解析单个月份值,归一化到月初
    pub fn parse_month(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        let date = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                    .map(|dt| dt.date())
            })
            .or_else(|| {
                let padded = format!("{} 01", value);
                YEAR_MONTH_FORMATS.iter().find_map(|fmt| {
                    NaiveDate::parse_from_str(&padded, &format!("{} %d", fmt)).ok()
                })
            })?;

        month_start(date)
    }

    /// 纯月份名兜底: 追加 " 1, 2025" 后再解析
    pub fn parse_bare_month(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let patched = format!("{}{}", value, BARE_MONTH_SUFFIX);
        NaiveDate::parse_from_str(&patched, "%B %d, %Y")
            .ok()
            .and_then(month_start)
    }

    /// 整列月份归一化
    ///
    /// # 规则
    /// 1. 逐值按常见日期格式解析
    /// 2. 若整列全部解析失败 → 每个值追加 " 1, 2025" 重试（纯月份名）
    /// 3. 日一律归一化为 1 号
    pub fn normalize_months(&self, values: &[&str]) -> Vec<Option<NaiveDate>> {
        let parsed: Vec<Option<NaiveDate>> = values.iter().map(|v| self.parse_month(v)).collect();

        if parsed.iter().any(Option::is_some) {
            return parsed;
        }

        values.iter().map(|v| self.parse_bare_month(v)).collect()
    }
}

/// 归一化到月初
fn month_start(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_coerce_f64_defaults_to_zero() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.coerce_f64(" 3.5 "), 3.5);
        assert_eq!(cleaner.coerce_f64(""), 0.0);
        assert_eq!(cleaner.coerce_f64("n/a"), 0.0);
        assert_eq!(cleaner.coerce_f64("NaN"), 0.0);
        assert_eq!(cleaner.coerce_f64("inf"), 0.0);
    }

    #[test]
    fn test_coerce_amount_strips_currency() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.coerce_amount("$1,234.50"), 1234.5);
        assert_eq!(cleaner.coerce_amount("12"), 12.0);
        assert_eq!(cleaner.coerce_amount("$"), 0.0);
        assert_eq!(cleaner.coerce_amount("free"), 0.0);
    }

    #[test]
    fn test_parse_month_formats() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_month("2025-03-17"), Some(ym(2025, 3)));
        assert_eq!(cleaner.parse_month("2025-03-17 08:30:00"), Some(ym(2025, 3)));
        assert_eq!(cleaner.parse_month("03/17/2025"), Some(ym(2025, 3)));
        assert_eq!(cleaner.parse_month("2025-03"), Some(ym(2025, 3)));
        assert_eq!(cleaner.parse_month("March 2025"), Some(ym(2025, 3)));
        assert_eq!(cleaner.parse_month("Feb 2025"), Some(ym(2025, 2)));
        assert_eq!(cleaner.parse_month("Mar 5, 2025"), Some(ym(2025, 3)));
        assert_eq!(cleaner.parse_month("March"), None);
        assert_eq!(cleaner.parse_month(""), None);
    }

    #[test]
    fn test_normalize_months_bare_month_fallback() {
        let cleaner = DataCleaner;
        let months = cleaner.normalize_months(&["January", "feb", "March"]);
        assert_eq!(
            months,
            vec![Some(ym(2025, 1)), Some(ym(2025, 2)), Some(ym(2025, 3))]
        );
    }

    #[test]
    fn test_normalize_months_no_fallback_when_any_parses() {
        let cleaner = DataCleaner;
        // 已有可解析值时不触发兜底,纯月份名保持为 None
        let months = cleaner.normalize_months(&["2025-01-15", "February"]);
        assert_eq!(months, vec![Some(ym(2025, 1)), None]);
    }
}
