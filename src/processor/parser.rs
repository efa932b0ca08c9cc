use chrono::{Duration, NaiveDateTime};

use super::model::ParsedShift;

/// A shift-date column combined with a clock time, e.g. "01/06/2024 22:00"
const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

impl ParsedShift {
    /// Resolve a recorded "start - end" value against its shift date.
    ///
    /// Malformed text yields absent instants rather than an error. An end
    /// before its start is assumed to cross midnight exactly once and is
    /// pushed forward a day; shifts of 24 hours or more are not
    /// representable in this notation.
    pub fn parse(date: &str, recorded: Option<&str>) -> Self {
        let Some((start_part, end_part)) = recorded.and_then(split_range) else {
            return Self {
                start: None,
                end: None,
            };
        };

        let start = compose(date, start_part);
        let mut end = compose(date, end_part);

        // Overnight shift: the end time belongs to the next day
        if let (Some(s), Some(e)) = (start, end) {
            if e < s {
                end = e.checked_add_signed(Duration::days(1));
            }
        }

        Self { start, end }
    }

    /// Hours between start and end, rounded to 2 decimal places
    pub fn hours(&self) -> Option<f64> {
        let (start, end) = (self.start?, self.end?);
        let seconds = end.signed_duration_since(start).num_seconds() as f64;
        Some((seconds / 3600.0 * 100.0).round() / 100.0)
    }
}

/// Split a recorded value on the literal " - " into its two halves
///
/// Anything other than exactly two parts means the whole cell is unusable.
fn split_range(value: &str) -> Option<(&str, &str)> {
    let mut parts = value.split(" - ");
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => Some((start, end)),
        _ => None,
    }
}

/// Combine a day-first date with a clock time
fn compose(date: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), DATETIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDateTime::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            NaiveTime::from_hms_opt(h, min, 0).unwrap(),
        )
    }

    #[test]
    fn test_same_day_shift() {
        let shift = ParsedShift::parse("01/06/2024", Some("09:00 - 17:00"));
        assert_eq!(shift.start, Some(at(2024, 6, 1, 9, 0)));
        assert_eq!(shift.end, Some(at(2024, 6, 1, 17, 0)));
        assert_eq!(shift.hours(), Some(8.0));
    }

    #[test]
    fn test_fractional_hours() {
        let shift = ParsedShift::parse("01/06/2024", Some("09:15 - 17:45"));
        assert_eq!(shift.hours(), Some(8.5));

        let shift = ParsedShift::parse("01/06/2024", Some("09:00 - 17:10"));
        assert_eq!(shift.hours(), Some(8.17));
    }

    #[test]
    fn test_overnight_shift_rolls_end_forward() {
        let shift = ParsedShift::parse("01/06/2024", Some("22:00 - 06:00"));
        assert_eq!(shift.start, Some(at(2024, 6, 1, 22, 0)));
        // End is before start on the same day, so it moves to the next day
        assert_eq!(shift.end, Some(at(2024, 6, 2, 6, 0)));
        assert_eq!(shift.hours(), Some(8.0));
    }

    #[test]
    fn test_zero_length_shift_stays_on_the_day() {
        let shift = ParsedShift::parse("01/06/2024", Some("09:00 - 09:00"));
        assert_eq!(shift.end, Some(at(2024, 6, 1, 9, 0)));
        assert_eq!(shift.hours(), Some(0.0));
    }

    #[test]
    fn test_absent_value() {
        let shift = ParsedShift::parse("01/06/2024", None);
        assert_eq!(shift.start, None);
        assert_eq!(shift.end, None);
        assert_eq!(shift.hours(), None);
    }

    #[test]
    fn test_malformed_values() {
        // No separator at all
        assert_eq!(ParsedShift::parse("01/06/2024", Some("junk")).hours(), None);
        // Dash without the surrounding spaces is not the separator
        assert_eq!(
            ParsedShift::parse("01/06/2024", Some("10:00-18:00")).hours(),
            None
        );
        // Three parts
        assert_eq!(
            ParsedShift::parse("01/06/2024", Some("08:00 - 12:00 - 16:00")).hours(),
            None
        );
    }

    #[test]
    fn test_half_empty_range() {
        let shift = ParsedShift::parse("01/06/2024", Some("09:00 - "));
        assert_eq!(shift.start, Some(at(2024, 6, 1, 9, 0)));
        assert_eq!(shift.end, None);
        assert_eq!(shift.hours(), None);

        let shift = ParsedShift::parse("01/06/2024", Some(" - 17:00"));
        assert_eq!(shift.start, None);
        assert_eq!(shift.hours(), None);
    }

    #[test]
    fn test_out_of_range_times() {
        assert_eq!(
            ParsedShift::parse("01/06/2024", Some("25:00 - 26:00")).hours(),
            None
        );
        assert_eq!(
            ParsedShift::parse("01/06/2024", Some("09:61 - 17:00")).hours(),
            None
        );
    }

    #[test]
    fn test_unparseable_date_text() {
        // Valid times cannot rescue a broken date column
        let shift = ParsedShift::parse("not a date", Some("09:00 - 17:00"));
        assert_eq!(shift.hours(), None);
    }
}
