use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Format a date for display, e.g. "24/01/2025"
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format an amount as Brazilian reais, e.g. "R$ 1.234,56"
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let fixed = format!("{:.2}", rounded.abs());
    let (integer, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{sign}R$ {grouped},{cents}")
}

/// Parse the value of an `<input type="date">` (YYYY-MM-DD); blank is `None`
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// Value for an `<input type="date">`
pub fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(shared::query::format_date).unwrap_or_default()
}

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(Decimal::new(123456, 2)), "R$ 1.234,56");
        assert_eq!(format_brl(Decimal::new(15, 1)), "R$ 1,50");
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_brl(Decimal::from(-150)), "-R$ 150,00");
        assert_eq!(format_brl(Decimal::from(1_000_000)), "R$ 1.000.000,00");
        assert_eq!(format_brl(Decimal::new(999, 0)), "R$ 999,00");
    }

    #[test]
    fn test_format_date_br() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 24).unwrap();
        assert_eq!(format_date_br(date), "24/01/2025");
    }

    #[test]
    fn test_parse_date_input() {
        assert_eq!(parse_date_input("2025-03-01"), NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(parse_date_input(""), None);
        assert_eq!(date_input_value(NaiveDate::from_ymd_opt(2025, 3, 1)), "2025-03-01");
        assert_eq!(date_input_value(None), "");
    }
}
