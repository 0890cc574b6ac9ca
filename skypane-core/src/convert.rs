//! Unit and clock conversions shared by the aggregator and the background
//! selector.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TimeParseError;

/// `6:14 am`, `12:53 pm`, `19:05` (meridiem optional, space optional).
static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-2]?[0-9]):([0-5][0-9])\s?(am|pm)?").expect("clock pattern is valid")
});

/// Hourly UV stamps carry no minutes: `AUG/18/2015 07 AM`.
static HOURLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{2})\s(am|pm)").expect("hourly pattern is valid"));

pub fn fahrenheit_to_celsius(fahrenheit: i32) -> i32 {
    ((f64::from(fahrenheit) - 32.0) / 1.8).round() as i32
}

/// Reads the leading integer of a provider temperature string, so `"89"`,
/// `" 89"` and `"89.6"` all give 89.
pub fn parse_degrees(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let digits_from = usize::from(text.starts_with(['-', '+']));
    let end = text[digits_from..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |i| i + digits_from);

    if end == digits_from {
        return None;
    }
    text[..end].parse().ok()
}

/// Celsius string for a Fahrenheit string, or `None` when the input is not a number.
pub fn celsius_text(fahrenheit: &str) -> Option<String> {
    parse_degrees(fahrenheit).map(|f| fahrenheit_to_celsius(f).to_string())
}

/// Applies the 12-hour to 24-hour rule to a bare hour and returns it zero padded.
///
/// 12 am is 00, 12 pm stays 12, any other pm hour gains 12, everything else
/// passes through.
pub fn hour_to_24(hour: u32, meridiem: Option<&str>) -> String {
    let pm = meridiem.is_some_and(|m| m.eq_ignore_ascii_case("pm"));
    let am = meridiem.is_some_and(|m| m.eq_ignore_ascii_case("am"));

    let hour = match hour {
        12 if am => 0,
        12 => 12,
        h if pm => h + 12,
        h => h,
    };
    format!("{hour:02}")
}

/// Finds the first clock time in `text` and returns it as a four digit
/// 24-hour `HHMM` string, e.g. `"7:51 pm"` becomes `"1951"`.
pub fn clock_to_24(text: &str) -> Result<String, TimeParseError> {
    let caps = CLOCK_RE.captures(text).ok_or_else(|| TimeParseError::new(text))?;
    let hour: u32 = caps[1].parse().map_err(|_| TimeParseError::new(text))?;
    let meridiem = caps.get(3).map(|m| m.as_str());

    Ok(format!("{}{}", hour_to_24(hour, meridiem), &caps[2]))
}

/// `HHMM` as a number, for ordering clock times against each other.
pub fn clock_value(text: &str) -> Result<u32, TimeParseError> {
    clock_to_24(text)?.parse().map_err(|_| TimeParseError::new(text))
}

/// Two digit 24-hour hour of an hourly UV timestamp.
pub fn hourly_stamp_hour(text: &str) -> Result<String, TimeParseError> {
    let caps = HOURLY_RE.captures(text).ok_or_else(|| TimeParseError::new(text))?;
    let hour: u32 = caps[1].parse().map_err(|_| TimeParseError::new(text))?;

    Ok(hour_to_24(hour, Some(&caps[2])))
}

/// The hour of an observation timestamp rounded to the nearest whole hour,
/// so `"Tue, 18 Aug 2015 12:53 pm EDT"` gives `"13"`.
pub fn nearest_hour(date: &str) -> Result<String, TimeParseError> {
    let hhmm = clock_value(date)?;
    Ok(format!("{:02}", (hhmm + 50) / 100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_reference_points() {
        assert_eq!(fahrenheit_to_celsius(32), 0);
        assert_eq!(fahrenheit_to_celsius(89), 32);
        assert_eq!(fahrenheit_to_celsius(212), 100);
        assert_eq!(fahrenheit_to_celsius(91), 33);
        assert_eq!(fahrenheit_to_celsius(72), 22);
    }

    #[test]
    fn celsius_rounds_half_away_from_zero() {
        // 41 F is exactly 5 C, 42 F is 5.56 C, 33 F is 0.56 C
        assert_eq!(fahrenheit_to_celsius(41), 5);
        assert_eq!(fahrenheit_to_celsius(42), 6);
        assert_eq!(fahrenheit_to_celsius(33), 1);
        assert_eq!(fahrenheit_to_celsius(-40), -40);
    }

    #[test]
    fn parse_degrees_reads_leading_integer() {
        assert_eq!(parse_degrees("89"), Some(89));
        assert_eq!(parse_degrees(" 89.6"), Some(89));
        assert_eq!(parse_degrees("-4"), Some(-4));
        assert_eq!(parse_degrees("n/a"), None);
        assert_eq!(parse_degrees(""), None);
        assert_eq!(parse_degrees("-"), None);
    }

    #[test]
    fn clock_to_24_examples() {
        assert_eq!(clock_to_24("6:14 am").unwrap(), "0614");
        assert_eq!(clock_to_24("12:00 am").unwrap(), "0000");
        assert_eq!(clock_to_24("12:00 pm").unwrap(), "1200");
        assert_eq!(clock_to_24("7:51 pm").unwrap(), "1951");
        assert_eq!(clock_to_24("7:51 PM").unwrap(), "1951");
        assert_eq!(clock_to_24("19:05").unwrap(), "1905");
    }

    #[test]
    fn clock_to_24_finds_time_inside_date() {
        assert_eq!(clock_to_24("Tue, 18 Aug 2015 12:53 pm EDT").unwrap(), "1253");
    }

    #[test]
    fn clock_to_24_rejects_garbage() {
        let err = clock_to_24("sometime").unwrap_err();
        assert_eq!(err.text, "sometime");
    }

    #[test]
    fn hourly_stamp_conversion() {
        assert_eq!(hourly_stamp_hour("AUG/18/2015 07 AM").unwrap(), "07");
        assert_eq!(hourly_stamp_hour("AUG/18/2015 12 AM").unwrap(), "00");
        assert_eq!(hourly_stamp_hour("AUG/18/2015 12 PM").unwrap(), "12");
        assert_eq!(hourly_stamp_hour("AUG/18/2015 02 pm").unwrap(), "14");
        assert!(hourly_stamp_hour("AUG/18/2015").is_err());
    }

    #[test]
    fn nearest_hour_rounds_half_up() {
        assert_eq!(nearest_hour("Tue, 18 Aug 2015 12:53 pm EDT").unwrap(), "13");
        assert_eq!(nearest_hour("Tue, 18 Aug 2015 2:10 pm EDT").unwrap(), "14");
        assert_eq!(nearest_hour("Tue, 18 Aug 2015 8:30 am EDT").unwrap(), "08");
        assert_eq!(nearest_hour("Tue, 18 Aug 2015 8:50 am EDT").unwrap(), "09");
        assert_eq!(nearest_hour("Tue, 18 Aug 2015 12:05 am EDT").unwrap(), "00");
    }
}
