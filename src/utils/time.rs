use chrono::NaiveDate;

/// This is the standard way of converting a date to a string in verkounter.
pub fn date_to_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Short form used in period headers, e.g. "Jun 3".
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Long form used in rankings, e.g. "Jun 3, 2024".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
