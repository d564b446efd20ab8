//! Formatting helpers for tdisview-gui.

/// Format a number with comma separators for readability.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_number(12345678), "12,345,678");
/// assert_eq!(format_number(42), "42");
/// ```
#[must_use]
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format an optional measurement, or a dash when absent.
#[must_use]
pub fn format_optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "–".to_string(), |v| format!("{v:.precision$}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(12_345_678), "12,345,678");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(1.234_56), 2), "1.23");
        assert_eq!(format_optional(None, 2), "–");
    }
}
