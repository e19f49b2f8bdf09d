use chrono::{DateTime, NaiveDate, Utc};

#[must_use]
pub fn format_date(value: NaiveDate) -> String {
    value.format("%b %d, %Y").to_string()
}

#[must_use]
pub fn format_date_opt(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| "No date".to_string(), format_date)
}

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%b %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_in_short_month_form() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(format_date(date), "Jun 03, 2024");
        assert_eq!(format_date_opt(None), "No date");
    }
}
