use chrono::NaiveDate;

/// Locale formatting knobs, passed explicitly by the host instead of
/// living in ambient globals.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    pub currency_symbol: &'static str,
    pub thousands_sep: char,
    /// chrono format string for auction dates.
    pub date_format: &'static str,
}

impl Default for FormatOptions {
    /// Colombian-peso conventions: `$ 245.000.000`, dates as `5/9/2025`.
    fn default() -> Self {
        Self {
            currency_symbol: "$",
            thousands_sep: '.',
            date_format: "%-d/%-m/%Y",
        }
    }
}

/// Currency with zero fractional digits and grouped thousands.
pub fn format_currency(amount: i64, options: &FormatOptions) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    let mut seen = 0;
    for ch in digits.chars().rev() {
        if seen > 0 && seen % 3 == 0 {
            grouped.push(options.thousands_sep);
        }
        grouped.push(ch);
        seen += 1;
    }
    let grouped: String = grouped.chars().rev().collect();

    let sign = if amount < 0 { "-" } else { "" };
    format!("{} {}{}", options.currency_symbol, sign, grouped)
}

/// ISO auction date rendered per the configured convention; text that does
/// not parse as a date is shown unchanged.
pub fn format_date(value: &str, options: &FormatOptions) -> String {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date.format(options.date_format).to_string(),
        Err(_) => value.to_string(),
    }
}
