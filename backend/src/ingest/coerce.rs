//! Cell coercers.
//!
//! Every function here is total: a cell that cannot be interpreted yields the
//! empty value for its kind instead of an error, so one bad cell never stops a
//! row. The ditto token always coerces to empty; resolving it is the job of
//! [`carry_down`](super::carry_down).

use super::workbook::{serial_to_datetime, RawCell};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Date-only layouts tried in order. An ambiguous slash date reads
/// month-first; day-first is the fallback when the month would be out of range.
const DATE_FORMATS: [&str; 10] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

const SHORT_YEAR_FORMATS: [&str; 5] = ["%m/%d/%y", "%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%d-%b-%y"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M",
];

pub fn parse_date(raw: &RawCell) -> Option<NaiveDate> {
    if raw.is_ditto() {
        return None;
    }
    match raw {
        RawCell::Empty | RawCell::Bool(_) => None,
        RawCell::DateTime(dt) => Some(dt.date()),
        RawCell::Number(serial) => serial_to_datetime(*serial).map(|dt| dt.date()),
        RawCell::Text(text) => parse_date_text(text.trim()),
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
    {
        return Some(dt.date());
    }
    // `%Y` happily takes "23" as year 23, so four-digit layouts only count
    // when they produced a four-digit year.
    DATE_FORMATS
        .iter()
        .filter_map(|f| NaiveDate::parse_from_str(text, f).ok())
        .find(|d| d.year() >= 1000)
        .or_else(|| {
            SHORT_YEAR_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
        })
}

/// Thousands separators (commas) are dropped, then the longest leading number
/// is read: `"12.5%"` is 12.5 and `"100/-"` is 100.
pub fn parse_decimal(raw: &RawCell) -> Option<f64> {
    if raw.is_ditto() {
        return None;
    }
    let value = match raw {
        RawCell::Number(n) => *n,
        RawCell::Text(text) => {
            let cleaned: String = text.chars().filter(|c| *c != ',').collect();
            numeric_prefix(cleaned.trim())?.parse::<f64>().ok()?
        }
        RawCell::Empty | RawCell::Bool(_) | RawCell::DateTime(_) => return None,
    };
    value.is_finite().then_some(value)
}

/// Leading `[+-]digits[.digits][(e|E)[+-]digits]`, or None when `text` does
/// not start with a number. An exponent without digits is left out.
fn numeric_prefix(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    Some(&text[..end])
}

/// `yes`, `true` and `1` (any case) are true; every other cell is false.
pub fn parse_boolean(raw: &RawCell) -> bool {
    match raw {
        RawCell::Bool(b) => *b,
        RawCell::Text(text) => {
            let lower = text.trim().to_lowercase();
            matches!(lower.as_str(), "yes" | "true" | "1")
        }
        _ => false,
    }
}

pub fn trimmed_string(raw: &RawCell) -> String {
    if raw.is_ditto() {
        return String::new();
    }
    raw.to_string().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.to_string())
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn decimals() {
        assert_eq!(parse_decimal(&text("1,234.50")), Some(1234.5));
        assert_eq!(parse_decimal(&text(" 12,34,567 ")), Some(1234567.0));
        assert_eq!(parse_decimal(&text("abc")), None);
        assert_eq!(parse_decimal(&text("")), None);
        assert_eq!(parse_decimal(&RawCell::Empty), None);
        assert_eq!(parse_decimal(&text("Do")), None);
        assert_eq!(parse_decimal(&RawCell::Number(99.25)), Some(99.25));
        assert_eq!(parse_decimal(&text("NaN")), None);
        assert_eq!(parse_decimal(&RawCell::Bool(true)), None);
        assert_eq!(parse_decimal(&text("1,234.50 INR")), Some(1234.5));
        assert_eq!(parse_decimal(&text("12.5%")), Some(12.5));
        assert_eq!(parse_decimal(&text("100/-")), Some(100.0));
        assert_eq!(parse_decimal(&text("-3.5e2 kg")), Some(-350.0));
        assert_eq!(parse_decimal(&text("7e")), Some(7.0));
        assert_eq!(parse_decimal(&text(".5")), Some(0.5));
        assert_eq!(parse_decimal(&text("-")), None);
        assert_eq!(parse_decimal(&text("INR 100")), None);
    }

    #[test]
    fn booleans() {
        assert!(parse_boolean(&text("Yes")));
        assert!(parse_boolean(&text(" TRUE ")));
        assert!(parse_boolean(&text("1")));
        assert!(parse_boolean(&RawCell::Bool(true)));
        assert!(!parse_boolean(&text("no")));
        assert!(!parse_boolean(&text("")));
        assert!(!parse_boolean(&text("do")));
        assert!(!parse_boolean(&RawCell::Empty));
        assert!(!parse_boolean(&RawCell::Number(1.0)));
    }

    #[test]
    fn strings() {
        assert_eq!(trimmed_string(&text("  MSC  ")), "MSC");
        assert_eq!(trimmed_string(&RawCell::Empty), "");
        assert_eq!(trimmed_string(&text("DO")), "");
        assert_eq!(trimmed_string(&RawCell::Number(40.0)), "40");
        assert_eq!(trimmed_string(&RawCell::Number(2.5)), "2.5");
        assert_eq!(trimmed_string(&RawCell::Bool(false)), "false");
        let midnight = ymd(2024, 1, 5).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(trimmed_string(&RawCell::DateTime(midnight)), "2024-01-05");
    }

    #[test]
    fn serial_dates() {
        let date = parse_date(&RawCell::Number(45000.0)).unwrap();
        assert_eq!(date.year(), 2023);
        assert_eq!(date, ymd(2023, 3, 15));
        assert_eq!(parse_date(&RawCell::Number(f64::NAN)), None);
    }

    #[test]
    fn temporal_cells_pass_through() {
        let dt = ymd(2022, 7, 1).and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(parse_date(&RawCell::DateTime(dt)), Some(ymd(2022, 7, 1)));
    }

    #[test]
    fn text_dates() {
        assert_eq!(parse_date(&text("2023-03-15")), Some(ymd(2023, 3, 15)));
        assert_eq!(parse_date(&text("15/03/2023")), Some(ymd(2023, 3, 15)));
        assert_eq!(parse_date(&text("03/04/2023")), Some(ymd(2023, 3, 4)));
        assert_eq!(parse_date(&text("12/25/2023")), Some(ymd(2023, 12, 25)));
        assert_eq!(parse_date(&text("15.03.2023")), Some(ymd(2023, 3, 15)));
        assert_eq!(parse_date(&text("15-Mar-2023")), Some(ymd(2023, 3, 15)));
        assert_eq!(parse_date(&text("Mar 15, 2023")), Some(ymd(2023, 3, 15)));
        assert_eq!(parse_date(&text("15/03/23")), Some(ymd(2023, 3, 15)));
        assert_eq!(parse_date(&text("03/04/23")), Some(ymd(2023, 3, 4)));
        assert_eq!(parse_date(&text("15/03/2023 09:30")), Some(ymd(2023, 3, 15)));
        assert_eq!(
            parse_date(&text("2023-03-15T08:00:00Z")),
            Some(ymd(2023, 3, 15))
        );
        assert_eq!(
            parse_date(&text("2023-03-15 08:00:00")),
            Some(ymd(2023, 3, 15))
        );
    }

    #[test]
    fn unparseable_dates_are_empty() {
        assert_eq!(parse_date(&text("pending")), None);
        assert_eq!(parse_date(&text("")), None);
        assert_eq!(parse_date(&text("do")), None);
        assert_eq!(parse_date(&RawCell::Empty), None);
        assert_eq!(parse_date(&RawCell::Bool(true)), None);
    }
}
