use chrono::NaiveDate;

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Format a `YYYY-MM-DD` (or RFC 3339) date as `DD.MM.YYYY`; anything else is shown as is
pub fn format_date_for_display(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// Day-of-month label for a calendar cell
pub fn day_label(date: NaiveDate) -> String {
    date.format("%d").to_string()
}

/// Money amount with thousands grouped by spaces, cents dropped when zero
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if negative && cents > 0 { "-" } else { "" };
    match cents % 100 {
        0 => format!("{}{}", sign, grouped),
        rest => format!("{}{},{:02}", sign, grouped, rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_for_display() {
        assert_eq!(format_date_for_display("2024-02-05"), "05.02.2024");
        assert_eq!(format_date_for_display("2024-02-05T10:30:00+03:00"), "05.02.2024");
        assert_eq!(format_date_for_display("yesterday"), "yesterday");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(950.0), "950");
        assert_eq!(format_amount(1234567.5), "1 234 567,50");
        assert_eq!(format_amount(-1500.0), "-1 500");
    }

    #[test]
    fn test_day_label_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(day_label(date), "07");
    }
}
