//! 通用辅助函数。

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// Last.fm 在摘要末尾附加的 “Read more on Last.fm” 链接。
static READ_MORE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\s*<a\s+href="[^"]*"[^>]*>\s*Read more on Last\.fm\s*</a>\.?\s*$"#)
        .expect("编译 READ_MORE_ANCHOR 失败")
});

/// 去掉摘要末尾的 “Read more on Last.fm” 链接和多余空白。
pub fn strip_read_more(summary: &str) -> String {
    READ_MORE_ANCHOR.replace(summary, "").trim().to_string()
}

/// 把 Last.fm 的日期文本（例如 `"    6 Apr 1999, 00:00"`）解析为 UTC Unix 时间戳（秒）。
///
/// 同时接受不带时间的 `"6 Apr 1999"`。无法解析时返回 `None`。
pub fn parse_release_date(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%d %b %Y, %H:%M") {
        return Some(datetime.and_utc().timestamp());
    }
    NaiveDate::parse_from_str(trimmed, "%d %b %Y")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc().timestamp())
}
