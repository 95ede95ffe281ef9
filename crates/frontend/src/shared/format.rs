//! Number formatting for cards and tables.

/// Thousands separated by a non-breaking space: `12345` -> `"12 345"`.
pub fn format_thousands(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('\u{00a0}');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Fixed decimals with thousands grouping: `(1234.5, 2)` -> `"1 234.50"`.
pub fn format_decimal(val: f64, decimals: usize) -> String {
    let formatted = format!("{:.prec$}", val.abs(), prec = decimals);
    let (int_part, frac) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    let grouped = format_thousands(int_part.parse::<i64>().unwrap_or(0));
    let sign = if val < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Energy in kWh. Meter values arrive in Wh.
pub fn format_energy_wh(wh: f64) -> String {
    format!("{} kWh", format_decimal(wh / 1000.0, 2))
}

pub fn format_kwh(kwh: f64) -> String {
    format!("{} kWh", format_decimal(kwh, 2))
}

pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.0}%", v),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(12345), "12\u{a0}345");
        assert_eq!(format_thousands(-1234567), "-1\u{a0}234\u{a0}567");
    }

    #[test]
    fn decimals_keep_grouping() {
        assert_eq!(format_decimal(1234.5, 2), "1\u{a0}234.50");
        assert_eq!(format_decimal(-0.001, 2), "0.00");
        assert_eq!(format_decimal(-12.0, 1), "-12.0");
        assert_eq!(format_decimal(7.0, 0), "7");
    }

    #[test]
    fn energy_and_percent() {
        assert_eq!(format_energy_wh(15250.0), "15.25 kWh");
        assert_eq!(format_kwh(3.456), "3.46 kWh");
        assert_eq!(format_percent(Some(66.666)), "67%");
        assert_eq!(format_percent(None), "—");
    }
}
