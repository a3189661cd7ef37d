use chrono::{DateTime, NaiveDate, Utc};

/// Shown wherever a value is missing.
pub const PLACEHOLDER: &str = "—";

/// Thousands-grouped display: 1234567 -> "1,234,567". Rounded to one
/// decimal up front so the carry propagates into the integer part.
pub fn format_number(value: Option<f64>) -> String {
    let Some(n) = value else {
        return PLACEHOLDER.to_string();
    };
    let rounded = (n * 10.0).round() / 10.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let mut grouped = group_thousands(whole);
    let fract = abs.fract();
    if fract > 1e-9 {
        grouped.push_str(&format!("{fract:.1}")[1..]);
    }
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Compact display: 1234 -> "1.2K", 1234567 -> "1.2M".
pub fn format_compact(value: Option<f64>) -> String {
    let Some(n) = value else {
        return PLACEHOLDER.to_string();
    };
    if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        format!("{n}")
    }
}

/// Fraction as percent: 0.482 -> "48.2%".
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(n) => format!("{:.1}%", n * 100.0),
        None => PLACEHOLDER.to_string(),
    }
}

/// Seconds as minutes:seconds: 174 -> "2:54".
pub fn format_duration(value: Option<f64>) -> String {
    let Some(seconds) = value else {
        return PLACEHOLDER.to_string();
    };
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// "2026-02-26" -> "Feb 26". Unparsable input passes through unchanged.
pub fn format_date_short(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%b %-d").to_string(),
        Err(_) => date.to_string(),
    }
}

/// "2026-02-26" -> "Wednesday, Feb 26".
pub fn format_date_full(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%A, %b %-d").to_string(),
        Err(_) => date.to_string(),
    }
}

/// ISO timestamp relative to `now`: "2h ago", "3d ago", short date beyond a week.
pub fn format_relative(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(ts) = DateTime::parse_from_rfc3339(timestamp) else {
        return PLACEHOLDER.to_string();
    };
    let diff = now.signed_duration_since(ts.with_timezone(&Utc));
    let minutes = diff.num_minutes().max(0);
    let hours = diff.num_hours().max(0);
    let days = diff.num_days().max(0);

    if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        format_date_short(&timestamp[..10.min(timestamp.len())])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
    Neutral,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Positive => "positive",
            Direction::Negative => "negative",
            Direction::Neutral => "neutral",
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Positive => "↑",
            Direction::Negative => "↓",
            Direction::Neutral => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    pub pct: f64,
    pub direction: Direction,
    pub formatted: String,
}

impl Delta {
    fn neutral() -> Self {
        Delta {
            pct: 0.0,
            direction: Direction::Neutral,
            formatted: PLACEHOLDER.to_string(),
        }
    }
}

/// Percent change between a current and a prior value. Neutral with a
/// placeholder whenever the prior value is missing or zero, or the current
/// value is missing.
pub fn calc_delta(current: Option<f64>, previous: Option<f64>) -> Delta {
    let (Some(current), Some(previous)) = (current, previous) else {
        return Delta::neutral();
    };
    if previous == 0.0 {
        return Delta::neutral();
    }
    let pct = (current - previous) / previous.abs() * 100.0;
    let direction = if pct > 0.5 {
        Direction::Positive
    } else if pct < -0.5 {
        Direction::Negative
    } else {
        Direction::Neutral
    };
    let sign = if pct > 0.0 { "+" } else { "" };
    Delta {
        pct,
        direction,
        formatted: format!("{sign}{pct:.1}%"),
    }
}

/// Display format for a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Number,
    Compact,
    Percent,
    Duration,
}

impl ValueFormat {
    pub fn apply(self, value: Option<f64>) -> String {
        match self {
            ValueFormat::Number => format_number(value),
            ValueFormat::Compact => format_compact(value),
            ValueFormat::Percent => format_percent(value),
            ValueFormat::Duration => format_duration(value),
        }
    }
}

fn group_thousands(mut n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let mut groups = Vec::new();
    while n >= 1000 {
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    let mut out = n.to_string();
    for group in groups.iter().rev() {
        out.push(',');
        out.push_str(group);
    }
    out
}
