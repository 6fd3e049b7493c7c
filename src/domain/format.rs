//! Display formatting shared by entity table rows.

use chrono::NaiveDateTime;

/// Placeholder shown for absent values.
pub const EMPTY_CELL: &str = "-";

/// Formats a timestamp as `dd/mm/yyyy`, or `-` when absent.
#[must_use]
pub fn format_date(value: Option<&NaiveDateTime>) -> String {
    value.map_or_else(|| EMPTY_CELL.to_string(), |d| d.format("%d/%m/%Y").to_string())
}

/// Formats a timestamp as `dd/mm/yyyy HH:MM`, or `-` when absent.
#[must_use]
pub fn format_date_time(value: Option<&NaiveDateTime>) -> String {
    value.map_or_else(
        || EMPTY_CELL.to_string(),
        |d| d.format("%d/%m/%Y %H:%M").to_string(),
    )
}

/// Formats an amount as pesos with thousands separators, e.g. `$25,000.00`.
///
/// # Examples
///
/// ```
/// use recluta::domain::format::format_currency;
///
/// assert_eq!(format_currency(Some(25000.0)), "$25,000.00");
/// assert_eq!(format_currency(Some(-1234.5)), "-$1,234.50");
/// assert_eq!(format_currency(None), "-");
/// ```
#[must_use]
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(amount) = amount else {
        return EMPTY_CELL.to_string();
    };

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Formats a salary range, collapsing missing bounds.
#[must_use]
pub fn format_range(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (None, None) => EMPTY_CELL.to_string(),
        (Some(_), None) => format!("desde {}", format_currency(min)),
        (None, Some(_)) => format!("hasta {}", format_currency(max)),
        (Some(_), Some(_)) => format!("{} - {}", format_currency(min), format_currency(max)),
    }
}

/// Truncates text to `max_chars` characters, appending `...` when cut.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars).collect();
        format!("{kept}...")
    }
}

/// Formats an optional displayable value, or `-` when absent.
#[must_use]
pub fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| EMPTY_CELL.to_string(), |v| v.to_string())
}
