//! 存储格式与业务类型之间的转换
//!
//! 日期以 `YYYY-MM-DD` 文本存储，时间戳为 unix 秒，JSON 字段以文本存储。

use chrono::{DateTime, NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// 解析已入库的日期，格式损坏时返回默认值
pub fn parse_stored_date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, DATE_FORMAT).unwrap_or_default()
}

pub fn timestamp_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub fn parse_json_text(text: Option<&str>) -> Option<serde_json::Value> {
    text.and_then(|t| serde_json::from_str(t).ok())
}

pub fn json_to_text(value: Option<&serde_json::Value>) -> Option<String> {
    value.filter(|v| !v.is_null()).map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_text() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        assert_eq!(format_date(date), "2024-09-02");
        assert_eq!(parse_stored_date("2024-09-02"), date);
        assert_eq!(parse_stored_date("garbage"), NaiveDate::default());
    }

    #[test]
    fn test_json_text() {
        let value = serde_json::json!({"allergies": ["peanuts"]});
        let text = json_to_text(Some(&value)).unwrap();
        assert_eq!(parse_json_text(Some(&text)), Some(value));
        assert_eq!(json_to_text(Some(&serde_json::Value::Null)), None);
        assert_eq!(parse_json_text(Some("{broken")), None);
    }
}
