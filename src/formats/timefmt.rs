use thiserror::Error;

// The reference-layout grammar: a layout string spells out how the reference
// time "Mon Jan 2 15:04:05 MST 2006" would be formatted, and values are
// matched against it chunk by chunk.

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("cannot parse {value:?} as {element}")]
    Parse { value: String, element: String },
    #[error("{0} out of range")]
    Range(&'static str),
    #[error("day out of range for month")]
    DayForMonth,
    #[error("extra text: {0:?}")]
    ExtraText(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    LongYear,   // 2006
    Year,       // 06
    LongMonth,  // January
    Month,      // Jan
    NumMonth,   // 1
    ZeroMonth,  // 01
    LongWeekDay, // Monday
    WeekDay,    // Mon
    Day,        // 2
    ZeroDay,    // 02
    Hour,       // 15
    Hour12,     // 3
    ZeroHour12, // 03
    Minute,     // 4
    ZeroMinute, // 04
    Second,     // 5
    ZeroSecond, // 05
    Meridiem,      // PM
    MeridiemLower, // pm
    NamedZone,  // MST
    NumZone,    // -0700
    ShortNumZone, // -07
    ColonZone,  // -07:00
    FracZero(usize), // .000...
    FracNine(usize), // .999...
}

const LONG_MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const LONG_DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const SHORT_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Finds the next layout token: the literal text before it, the token, and
/// the remainder of the layout. Longest match wins at every position.
fn next_chunk(layout: &str) -> (&str, Option<Token>, &str) {
    let bytes = layout.as_bytes();
    for i in 0..bytes.len() {
        let rest = &layout[i..];
        let found = match bytes[i] {
            b'J' => {
                if rest.starts_with("January") {
                    Some((Token::LongMonth, 7))
                } else if rest.starts_with("Jan") {
                    Some((Token::Month, 3))
                } else {
                    None
                }
            }
            b'M' => {
                if rest.starts_with("Monday") {
                    Some((Token::LongWeekDay, 6))
                } else if rest.starts_with("Mon") {
                    Some((Token::WeekDay, 3))
                } else if rest.starts_with("MST") {
                    Some((Token::NamedZone, 3))
                } else {
                    None
                }
            }
            b'0' => match bytes.get(i + 1) {
                Some(b'1') => Some((Token::ZeroMonth, 2)),
                Some(b'2') => Some((Token::ZeroDay, 2)),
                Some(b'3') => Some((Token::ZeroHour12, 2)),
                Some(b'4') => Some((Token::ZeroMinute, 2)),
                Some(b'5') => Some((Token::ZeroSecond, 2)),
                Some(b'6') => Some((Token::Year, 2)),
                _ => None,
            },
            b'1' => {
                if rest.starts_with("15") {
                    Some((Token::Hour, 2))
                } else {
                    Some((Token::NumMonth, 1))
                }
            }
            b'2' => {
                if rest.starts_with("2006") {
                    Some((Token::LongYear, 4))
                } else {
                    Some((Token::Day, 1))
                }
            }
            b'3' => Some((Token::Hour12, 1)),
            b'4' => Some((Token::Minute, 1)),
            b'5' => Some((Token::Second, 1)),
            b'P' => rest.starts_with("PM").then_some((Token::Meridiem, 2)),
            b'p' => rest.starts_with("pm").then_some((Token::MeridiemLower, 2)),
            b'-' => {
                if rest.starts_with("-0700") {
                    Some((Token::NumZone, 5))
                } else if rest.starts_with("-07:00") {
                    Some((Token::ColonZone, 6))
                } else if rest.starts_with("-07") {
                    Some((Token::ShortNumZone, 3))
                } else {
                    None
                }
            }
            b'.' | b',' => {
                let frac = &rest[1..];
                let zeros = frac.bytes().take_while(|&b| b == b'0').count();
                let nines = frac.bytes().take_while(|&b| b == b'9').count();
                if zeros > 0 && !frac[zeros..].starts_with(|c: char| c.is_ascii_digit()) {
                    Some((Token::FracZero(zeros), zeros + 1))
                } else if nines > 0 && !frac[nines..].starts_with(|c: char| c.is_ascii_digit()) {
                    Some((Token::FracNine(nines), nines + 1))
                } else {
                    None
                }
            }
            _ => None,
        };
        if let Some((token, len)) = found {
            return (&layout[..i], Some(token), &layout[i + len..]);
        }
    }
    (layout, None, "")
}

fn parse_err(value: &str, element: impl Into<String>) -> LayoutError {
    let mut value = value.to_string();
    value.truncate(32);
    LayoutError::Parse {
        value,
        element: element.into(),
    }
}

/// Reads one or two digits; exactly two when `fixed` is set.
fn getnum<'a>(
    value: &'a str,
    fixed: bool,
    element: &'static str,
) -> Result<(i64, &'a str), LayoutError> {
    let digits = value
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count()
        .min(2);
    if digits == 0 || (fixed && digits < 2) {
        return Err(parse_err(value, element));
    }
    let n = value[..digits]
        .parse()
        .map_err(|_| parse_err(value, element))?;
    Ok((n, &value[digits..]))
}

fn getnum4<'a>(value: &'a str, element: &'static str) -> Result<(i64, &'a str), LayoutError> {
    let digits = value.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits < 4 {
        return Err(parse_err(value, element));
    }
    let n = value[..4].parse().map_err(|_| parse_err(value, element))?;
    Ok((n, &value[4..]))
}

fn lookup_name<'a>(
    names: &[&str],
    value: &'a str,
    element: &'static str,
) -> Result<&'a str, LayoutError> {
    for name in names {
        if let Some(rest) = value.strip_prefix(name) {
            return Ok(rest);
        }
    }
    Err(parse_err(value, element))
}

fn in_range(n: i64, lo: i64, hi: i64, element: &'static str) -> Result<(), LayoutError> {
    if n < lo || n > hi {
        return Err(LayoutError::Range(element));
    }
    Ok(())
}

fn days_in(month: i64, year: i64) -> i64 {
    let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
    match month {
        2 if leap => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn take_signed_digits<'a>(
    value: &'a str,
    groups: &[usize],
    colon: bool,
    element: &'static str,
) -> Result<&'a str, LayoutError> {
    let mut rest = value
        .strip_prefix(['+', '-'])
        .ok_or_else(|| parse_err(value, element))?;
    for (i, &len) in groups.iter().enumerate() {
        if colon && i > 0 {
            rest = rest.strip_prefix(':').ok_or_else(|| parse_err(value, element))?;
        }
        if rest.len() < len || !rest[..len].bytes().all(|b| b.is_ascii_digit()) {
            return Err(parse_err(value, element));
        }
        rest = &rest[len..];
    }
    Ok(rest)
}

/// Parses `value` against `layout`. Only the shape is of interest to the
/// caller, so the result carries no time value.
pub fn parse(layout: &str, value: &str) -> Result<(), LayoutError> {
    let mut layout = layout;
    let mut value = value;
    let mut year: Option<i64> = None;
    let mut month: Option<i64> = None;
    let mut day: Option<i64> = None;

    loop {
        let (literal, token, rest) = next_chunk(layout);
        value = value
            .strip_prefix(literal)
            .ok_or_else(|| parse_err(value, format!("{:?}", literal)))?;
        let Some(token) = token else { break };
        layout = rest;

        match token {
            Token::LongYear => {
                let (n, v) = getnum4(value, "year")?;
                year = Some(n);
                value = v;
            }
            Token::Year => {
                let (n, v) = getnum(value, true, "year")?;
                year = Some(if n >= 69 { 1900 + n } else { 2000 + n });
                value = v;
            }
            Token::NumMonth | Token::ZeroMonth => {
                let (n, v) = getnum(value, token == Token::ZeroMonth, "month")?;
                in_range(n, 1, 12, "month")?;
                month = Some(n);
                value = v;
            }
            Token::LongMonth => {
                value = lookup_name(&LONG_MONTH_NAMES, value, "month")?;
            }
            Token::Month => {
                value = lookup_name(&SHORT_MONTH_NAMES, value, "month")?;
            }
            Token::LongWeekDay => {
                value = lookup_name(&LONG_DAY_NAMES, value, "weekday")?;
            }
            Token::WeekDay => {
                value = lookup_name(&SHORT_DAY_NAMES, value, "weekday")?;
            }
            Token::Day | Token::ZeroDay => {
                let (n, v) = getnum(value, token == Token::ZeroDay, "day")?;
                in_range(n, 1, 31, "day")?;
                day = Some(n);
                value = v;
            }
            Token::Hour => {
                let (n, v) = getnum(value, false, "hour")?;
                in_range(n, 0, 23, "hour")?;
                value = v;
            }
            Token::Hour12 | Token::ZeroHour12 => {
                let (n, v) = getnum(value, token == Token::ZeroHour12, "hour")?;
                in_range(n, 0, 12, "hour")?;
                value = v;
            }
            Token::Minute | Token::ZeroMinute => {
                let (n, v) = getnum(value, token == Token::ZeroMinute, "minute")?;
                in_range(n, 0, 59, "minute")?;
                value = v;
            }
            Token::Second | Token::ZeroSecond => {
                let (n, v) = getnum(value, token == Token::ZeroSecond, "second")?;
                in_range(n, 0, 59, "second")?;
                value = v;
            }
            Token::Meridiem => {
                value = value
                    .strip_prefix("PM")
                    .or_else(|| value.strip_prefix("AM"))
                    .ok_or_else(|| parse_err(value, "PM"))?;
            }
            Token::MeridiemLower => {
                value = value
                    .strip_prefix("pm")
                    .or_else(|| value.strip_prefix("am"))
                    .ok_or_else(|| parse_err(value, "pm"))?;
            }
            Token::NamedZone => {
                let letters = value
                    .bytes()
                    .take_while(|b| b.is_ascii_uppercase())
                    .count();
                if !(3..=4).contains(&letters) {
                    return Err(parse_err(value, "time zone"));
                }
                value = &value[letters..];
            }
            Token::NumZone => {
                value = take_signed_digits(value, &[4], false, "time zone offset")?;
            }
            Token::ShortNumZone => {
                value = take_signed_digits(value, &[2], false, "time zone offset")?;
            }
            Token::ColonZone => {
                value = take_signed_digits(value, &[2, 2], true, "time zone offset")?;
            }
            Token::FracZero(n) => {
                let rest = value
                    .strip_prefix(['.', ','])
                    .ok_or_else(|| parse_err(value, "fractional second"))?;
                if rest.len() < n || !rest[..n].bytes().all(|b| b.is_ascii_digit()) {
                    return Err(parse_err(value, "fractional second"));
                }
                value = &rest[n..];
            }
            Token::FracNine(n) => {
                // trailing digits are optional here
                if let Some(rest) = value.strip_prefix(['.', ',']) {
                    let digits = rest
                        .bytes()
                        .take_while(|b| b.is_ascii_digit())
                        .count()
                        .min(n);
                    if digits > 0 {
                        value = &rest[digits..];
                    }
                }
            }
        }
    }

    if !value.is_empty() {
        let mut extra = value.to_string();
        extra.truncate(32);
        return Err(LayoutError::ExtraText(extra));
    }
    if let (Some(month), Some(day)) = (month, day) {
        // the default year is a leap year, so Feb 29 without a year is fine
        if day > days_in(month, year.unwrap_or(0)) {
            return Err(LayoutError::DayForMonth);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn self_parse(layout: &str) -> Result<(), LayoutError> {
        parse(layout, layout)
    }

    #[test]
    fn canonical_layouts_round_trip() {
        for layout in [
            "2006-01-02",
            "2006-01-02 15:04:05",
            "Jan 2, 2006",
            "Monday, January 2, 2006",
            "Mon Jan 2 15:04:05 MST 2006",
            "15:04",
            "3:04 PM",
            "03:04:05 pm",
            "02/01/06",
            "2006-01-02 15:04:05.000",
            "2006-01-02 15:04:05.999",
            "15:04 -0700",
            "15:04:05 -07:00",
            "15:04 -07",
        ] {
            assert_eq!(self_parse(layout), Ok(()), "{:?}", layout);
        }
    }

    #[test]
    fn layouts_with_no_tokens_are_all_literal() {
        // nothing to mismatch when the value is the layout itself
        assert_eq!(self_parse("timestamp"), Ok(()));
    }

    #[test]
    fn out_of_range_components_fail() {
        // "13" lexes as the numeric month token followed by hour12
        assert_eq!(self_parse("2006-13-01"), Err(LayoutError::Range("month")));
        assert_eq!(parse("15:04", "25:04"), Err(LayoutError::Range("hour")));
        assert_eq!(parse("04:05", "04:61"), Err(LayoutError::Range("second")));
        assert_eq!(
            parse("2006-01-02", "2006-02-31"),
            Err(LayoutError::DayForMonth)
        );
    }

    #[test]
    fn literal_mismatch_fails() {
        assert!(parse("2006-01-02", "2006/01/02").is_err());
        assert!(parse("15:04", "15h04").is_err());
    }

    #[test]
    fn extra_text_fails() {
        assert_eq!(
            parse("15:04", "15:04:05"),
            Err(LayoutError::ExtraText(":05".to_string()))
        );
    }

    #[test]
    fn zero_padded_tokens_require_two_digits() {
        assert_eq!(parse("01", "1"), Err(parse_err("1", "month")));
        assert_eq!(parse("1", "1"), Ok(()));
    }

    #[test]
    fn leap_day_without_year_is_accepted() {
        assert_eq!(parse("01-02", "02-29"), Ok(()));
        assert_eq!(parse("2006-01-02", "2023-02-29"), Err(LayoutError::DayForMonth));
        assert_eq!(parse("2006-01-02", "2024-02-29"), Ok(()));
    }
}
