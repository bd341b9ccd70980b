/// Lenient coercion of currency-like strings into numbers.
///
/// Back-office forms and legacy API payloads carry amounts as strings like
/// `"$1,500"` or `"1500.50"`. Parsing strips the currency sigil, grouping
/// commas and surrounding whitespace; anything that still fails to parse
/// degrades to zero rather than erroring.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    cleaned.trim().parse::<f64>().unwrap_or(0.0)
}

/// Sale minus cost.
pub fn profit(sale: f64, cost: f64) -> f64 {
    sale - cost
}

/// Sum of sale amounts over (cost, sale) line items.
pub fn total_sale(lines: &[(f64, f64)]) -> f64 {
    lines.iter().map(|(_, sale)| sale).sum()
}

/// Sum of cost amounts over (cost, sale) line items.
pub fn total_cost(lines: &[(f64, f64)]) -> f64 {
    lines.iter().map(|(cost, _)| cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_currency_strings() {
        assert_eq!(parse_amount("$1,500"), 1500.0);
        assert_eq!(parse_amount("$1,500.50"), 1500.5);
        assert_eq!(parse_amount(" 1500 "), 1500.0);
        assert_eq!(parse_amount("0"), 0.0);
    }

    #[test]
    fn garbage_degrades_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("$"), 0.0);
    }

    #[test]
    fn line_totals() {
        let lines = [(100.0, 150.0), (200.0, 260.0)];
        assert_eq!(total_cost(&lines), 300.0);
        assert_eq!(total_sale(&lines), 410.0);
        assert_eq!(profit(total_sale(&lines), total_cost(&lines)), 110.0);
    }
}
