//! Brazilian Real amount parsing and formatting
//!
//! Rate tables and form input use the Brazilian convention: `.` groups
//! thousands and `,` separates decimals, optionally prefixed with `R$`.

/// Parse an amount such as `"R$ 10.000,01"`, `"75.000,50"` or `"89,9"`
///
/// With a comma present, dots are thousands separators. Without one, a
/// single dot followed by other than three digits is a decimal point
/// (`"75000.50"`), otherwise dots group thousands (`"75.000"`).
pub fn parse_brl_amount(text: &str) -> Option<f64> {
    let cleaned: String = text.replace("R$", "").chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if cleaned.matches('.').count() == 1 && !has_thousands_tail(&cleaned) {
        cleaned
    } else {
        cleaned.replace('.', "")
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// True when the last `.` is followed by exactly three digits (`"1.500"`)
pub(crate) fn has_thousands_tail(text: &str) -> bool {
    text.rsplit_once('.')
        .map(|(_, tail)| tail.len() == 3 && tail.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

/// Format as `R$ 1.234,56`
pub fn format_brl(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("R$ {}{},{}", sign, grouped, frac_part)
}

/// Format an optional amount, rendering missing values as `N/A`
pub fn format_brl_opt(value: Option<f64>) -> String {
    value.map(format_brl).unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_brazilian_amounts() {
        assert_eq!(parse_brl_amount("10.000,01"), Some(10_000.01));
        assert_eq!(parse_brl_amount("R$ 20.000,00"), Some(20_000.0));
        assert_eq!(parse_brl_amount("  75.000,50 "), Some(75_000.5));
        assert_eq!(parse_brl_amount("0,01"), Some(0.01));
        assert_eq!(parse_brl_amount("150000"), Some(150_000.0));
        assert_eq!(parse_brl_amount("R$1.234,5"), Some(1_234.5));
    }

    #[test]
    fn test_parse_without_comma() {
        assert_eq!(parse_brl_amount("75000.50"), Some(75_000.5));
        assert_eq!(parse_brl_amount("89.9"), Some(89.9));
        assert_eq!(parse_brl_amount("75.000"), Some(75_000.0));
        assert_eq!(parse_brl_amount("1.234.567"), Some(1_234_567.0));
    }

    #[test]
    fn test_parse_rejects_text() {
        assert_eq!(parse_brl_amount(""), None);
        assert_eq!(parse_brl_amount("R$"), None);
        assert_eq!(parse_brl_amount("sob consulta"), None);
        assert_eq!(parse_brl_amount("1,2,3"), None);
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(89.9), "R$ 89,90");
        assert_eq!(format_brl(1_234.56), "R$ 1.234,56");
        assert_eq!(format_brl(100_000.0), "R$ 100.000,00");
        assert_eq!(format_brl(1_234_567.891), "R$ 1.234.567,89");
        assert_eq!(format_brl(-1_500.0), "R$ -1.500,00");
    }

    #[test]
    fn test_format_missing() {
        assert_eq!(format_brl_opt(None), "N/A");
        assert_eq!(format_brl_opt(Some(150.0)), "R$ 150,00");
    }
}
