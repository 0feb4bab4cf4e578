//! 表示用フォーマット

use chrono::{DateTime, Utc};

/// 目撃日時が無いときの表示
pub const NEVER: &str = "Never";

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_MONTH: i64 = 43200;

/// 座標（小数点以下6桁）
pub fn format_coordinate(value: f64) -> String {
    format!("{:.6}", value)
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// 2時刻間の距離を英語で表す（"about 3 hours" など）
pub fn distance_words(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let seconds = (to - from).num_seconds().abs();
    let minutes = (seconds as f64 / 60.0).round() as i64;

    if seconds < 30 {
        "less than a minute".to_string()
    } else if minutes < 2 {
        "1 minute".to_string()
    } else if minutes < 45 {
        plural(minutes, "minute")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_IN_DAY {
        let hours = (minutes as f64 / 60.0).round() as i64;
        format!("about {}", plural(hours, "hour"))
    } else if minutes < 2520 {
        "1 day".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        plural((minutes as f64 / MINUTES_IN_DAY as f64).round() as i64, "day")
    } else if minutes < MINUTES_IN_MONTH * 2 {
        let months = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
        format!("about {}", plural(months, "month"))
    } else {
        let months = minutes / MINUTES_IN_MONTH;
        if months < 12 {
            return plural(months, "month");
        }
        let years = months / 12;
        match months % 12 {
            0..=2 => format!("about {}", plural(years, "year")),
            3..=8 => format!("over {}", plural(years, "year")),
            _ => format!("almost {}", plural(years + 1, "year")),
        }
    }
}

/// `now` から見た相対時刻（"3 hours ago" / "in 2 days"）
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let words = distance_words(timestamp, now);
    if timestamp > now {
        format!("in {}", words)
    } else {
        format!("{} ago", words)
    }
}

/// 最終目撃日時の表示。無ければ "Never"
pub fn format_last_seen(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match timestamp {
        Some(ts) => format_relative(ts, now),
        None => NEVER.to_string(),
    }
}
