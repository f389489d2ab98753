use chrono::{DateTime, Duration, Utc};

use super::datetime_parser::parse_utc;
use super::model::{TimeRangeRequest, TimeWindow, ValidationFailure};

pub const DEFAULT_GRAIN_MINUTES: i64 = 5;

pub fn max_range() -> Duration {
    Duration::hours(24)
}

/// Resolves the requested window and grain against `now`.
///
/// Blank bounds are filled in relative to `now` (a 24h window), parsed bounds
/// are normalized to UTC, and the result is validated in a fixed order:
/// format, inverted range, future start, span. A malformed grain falls back to
/// the default and never rejects the request on its own.
pub fn resolve(
    request: &TimeRangeRequest,
    now: DateTime<Utc>,
) -> Result<TimeWindow, ValidationFailure> {
    let (grain, grain_warning) = resolve_grain(request.time_grain.as_deref());

    let start_time = non_blank(request.start_time.as_deref());
    let end_time = non_blank(request.end_time.as_deref());

    let (start, end) = resolve_bounds(start_time, end_time, now)
        .ok_or(ValidationFailure::InvalidTimeFormat)?;

    if start > end {
        return Err(ValidationFailure::RangeInverted);
    }
    if start > now {
        return Err(ValidationFailure::StartInFuture);
    }
    if end - start > max_range() {
        return Err(ValidationFailure::RangeTooLong);
    }

    Ok(TimeWindow {
        start_utc: start,
        end_utc: end,
        grain,
        grain_warning,
    })
}

/// `None` when either bound fails to parse, or when the default arithmetic
/// leaves the representable range.
fn resolve_bounds(
    start_time: Option<&str>,
    end_time: Option<&str>,
    now: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let day = max_range();

    match (start_time, end_time) {
        (None, None) => {
            let end = now;
            Some((end.checked_sub_signed(day)?, end))
        }
        (None, Some(end_time)) => {
            let end = parse_utc(end_time)?;
            Some((end.checked_sub_signed(day)?, end))
        }
        (Some(start_time), None) => {
            let start = parse_utc(start_time)?;
            let end = start.checked_add_signed(day)?.min(now);
            Some((start, end))
        }
        (Some(start_time), Some(end_time)) => {
            // Both are parsed so that either one failing rejects the request.
            let end = parse_utc(end_time);
            let start = parse_utc(start_time);
            Some((start?, end?))
        }
    }
}

fn resolve_grain(time_grain: Option<&str>) -> (Duration, Option<ValidationFailure>) {
    let default = Duration::minutes(DEFAULT_GRAIN_MINUTES);

    let Some(raw) = non_blank(time_grain) else {
        return (default, None);
    };

    match raw.trim().parse::<i32>() {
        Ok(minutes) if minutes > 0 => (Duration::minutes(i64::from(minutes)), None),
        _ => (
            default,
            Some(ValidationFailure::InvalidTimeGrain(raw.to_string())),
        ),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
