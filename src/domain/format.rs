use crate::domain::Currency;

/// Locale-style thousands grouping: a period every three digits counting
/// from the right. Example: 1234567 -> "1.234.567"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut parts = Vec::new();
    let bytes = digits.as_bytes();
    let mut end = bytes.len();
    while end > 3 {
        parts.insert(0, &digits[end - 3..end]);
        end -= 3;
    }
    parts.insert(0, &digits[..end]);
    parts.join(".")
}

/// Render a price with its currency tag: `"$ 1.500.000"` or `"USD 1.500.000"`.
///
/// Prices display as whole amounts; any fractional part is truncated before
/// grouping. Amounts are validated non-negative upstream; the cast saturates,
/// so an out-of-contract negative renders as the zero form.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    format!("{} {}", currency.as_str(), group_thousands(amount.trunc() as u64))
}
