use std::sync::LazyLock;

use regex::Regex;

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("valid non-digit pattern"));

/// Minutes from a free-text duration ("90", "90 min"); 0 when no number can be read
pub fn parse_duration(value: &str) -> u32 {
    let digits = NON_DIGITS.replace_all(value, "");
    digits.parse().unwrap_or(0)
}

/// Human readable total, e.g. `2 hrs 5 mins`
pub fn format_duration(minutes: i64) -> String {
    if minutes <= 0 {
        return "0 mins".to_string();
    }

    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours == 0 {
        return plural(mins, "min", "mins");
    }

    let hours_part = plural(hours, "hr", "hrs");
    if mins > 0 {
        format!("{} {}", hours_part, plural(mins, "min", "mins"))
    } else {
        hours_part
    }
}

fn plural(count: i64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
