/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a new order id (UUID v4, hyphenated)
pub fn new_order_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Format epoch millis as a local calendar date (`YYYY-MM-DD`)
///
/// Falls back to the raw number when the timestamp is out of range.
pub fn format_date(millis: i64) -> String {
    use chrono::{Local, TimeZone};

    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => millis.to_string(),
    }
}
