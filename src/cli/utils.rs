//! Shared utilities for CLI commands

use tabled::{Table, settings::Style};

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Format a duration in minutes as "1h 30m"
pub fn format_minutes(minutes: Option<i64>) -> String {
    match minutes {
        Some(m) if m >= 60 && m % 60 == 0 => format!("{}h", m / 60),
        Some(m) if m >= 60 => format!("{}h {}m", m / 60, m % 60),
        Some(m) => format!("{}m", m),
        None => "-".to_string(),
    }
}

/// Format an optional price
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p == 0.0 => "free".to_string(),
        Some(p) => format!("{:.2}", p),
        None => "-".to_string(),
    }
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}
