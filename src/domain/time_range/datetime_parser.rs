use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses `yyyy-mm-ddThh:mm[:ss[.fff]][offset]` into a UTC instant.
///
/// A value without an offset is taken to already be UTC (fields copied, no
/// shift). A value with `Z` or `±hh[:mm]` is converted to UTC.
pub fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let (naive_part, offset) = split_offset(value)?;
    let naive = parse_naive(naive_part)?;

    match offset {
        None => Some(naive.and_utc()),
        Some(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Splits a trailing offset designator off the time part.
/// Returns `None` when the designator is present but malformed.
fn split_offset(value: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(rest) = value.strip_suffix(['Z', 'z']) {
        return Some((rest, FixedOffset::east_opt(0)));
    }

    // Only look after the date separator, the date itself contains '-'.
    let time_start = value.find(['T', 't']).map(|i| i + 1).unwrap_or(value.len());
    let sign_at = value[time_start..]
        .rfind(['+', '-'])
        .map(|i| i + time_start);

    match sign_at {
        None => Some((value, None)),
        Some(idx) => {
            let offset = parse_offset(&value[idx..])?;
            Some((&value[..idx], Some(offset)))
        }
    }
}

fn parse_offset(designator: &str) -> Option<FixedOffset> {
    let (sign, digits) = match designator.as_bytes().first()? {
        b'+' => (1, &designator[1..]),
        b'-' => (-1, &designator[1..]),
        _ => return None,
    };

    // Byte-length checks below only hold for ASCII.
    if !digits.is_ascii() {
        return None;
    }

    let (hours, minutes) = match digits.len() {
        2 => (digits, "00"),
        4 => (&digits[..2], &digits[2..]),
        5 if digits.as_bytes()[2] == b':' => (&digits[..2], &digits[3..]),
        _ => return None,
    };

    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
