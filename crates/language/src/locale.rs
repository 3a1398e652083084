//! Locale-aware currency formatting
//!
//! Closed set of known currency codes with per-locale separator conventions;
//! unknown codes fall back to a generic `"<CODE> <amount>"` rendering.

/// Format `amount` for the given currency code and language.
pub fn format_currency(amount: f64, currency: &str, language: &str) -> String {
    let grouped = group_thousands(amount);

    match language {
        "pt-BR" | "es" => match currency {
            "BRL" => format!("R$ {}", swap_separators(&grouped)),
            "USD" => format!("US$ {}", swap_separators(&grouped)),
            _ => format!("{} {}", currency, grouped),
        },
        _ => match currency {
            "BRL" => format!("R$ {}", grouped),
            "USD" => format!("${}", grouped),
            _ => format!("{} {}", currency, grouped),
        },
    }
}

/// Render with two decimals and comma thousands separators ("1,234.56").
fn group_thousands(amount: f64) -> String {
    let raw = format!("{:.2}", amount.abs());
    let (integer, decimal) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, decimal)
}

/// Swap en-style separators to pt/es style ("1,234.56" -> "1.234,56").
fn swap_separators(formatted: &str) -> String {
    formatted
        .chars()
        .map(|c| match c {
            ',' => '.',
            '.' => ',',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brl_in_portuguese() {
        assert_eq!(format_currency(1234.56, "BRL", "pt-BR"), "R$ 1.234,56");
    }

    #[test]
    fn test_brl_in_english() {
        assert_eq!(format_currency(1234.56, "BRL", "en"), "R$ 1,234.56");
    }

    #[test]
    fn test_usd_in_english() {
        assert_eq!(format_currency(1234.56, "USD", "en"), "$1,234.56");
    }

    #[test]
    fn test_usd_in_spanish() {
        assert_eq!(format_currency(99.9, "USD", "es"), "US$ 99,90");
    }

    #[test]
    fn test_small_amount() {
        assert_eq!(format_currency(0.75, "BRL", "pt-BR"), "R$ 0,75");
    }

    #[test]
    fn test_large_amount_grouping() {
        assert_eq!(format_currency(1_000_000.0, "USD", "en"), "$1,000,000.00");
    }

    #[test]
    fn test_unknown_currency_falls_back_generic() {
        assert_eq!(format_currency(1234.5, "XYZ", "en"), "XYZ 1,234.50");
        assert_eq!(format_currency(1234.5, "XYZ", "pt-BR"), "XYZ 1,234.50");
    }

    #[test]
    fn test_unknown_language_uses_english_table() {
        assert_eq!(format_currency(10.0, "USD", "fr"), "$10.00");
    }
}
