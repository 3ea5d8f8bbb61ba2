//! Human-readable number formatting for reports

/// Compact form of a valuation figure: `1.2B`, `3.4M`, `5.6K`, or `987`.
pub fn format_value(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        group_thousands(value)
    }
}

/// Compact form of a count: `1.2M`, `35K`, or `987`.
pub fn format_number(count: f64) -> String {
    if count >= 1e6 {
        format!("{:.1}M", count / 1e6)
    } else if count >= 1e3 {
        format!("{:.0}K", count / 1e3)
    } else {
        group_thousands(count)
    }
}

/// `0.65` -> `65%`
pub fn format_percent(rate: f64) -> String {
    format!("{}%", (rate * 100.0).round())
}

/// `2.345` -> `2.3x`
pub fn format_multiplier(multiplier: f64) -> String {
    format!("{:.1}x", multiplier)
}

/// Rounded integer with `,` between thousands groups
fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
