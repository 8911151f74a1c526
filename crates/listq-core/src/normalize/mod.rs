//! Reshapes raw filter sets into the canonical parameter map sent to a list source.
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem};

use listq_model::{DateBound, DateRange, FilterValue, Filters};

pub const START_DATE_KEY: &str = "startDate";
pub const END_DATE_KEY: &str = "endDate";

const CALENDAR_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Canonical form of `raw`.
///
/// Empty values (null, empty text, blank intervals) are dropped. A date
/// interval under any key is expanded into [`START_DATE_KEY`] / [`END_DATE_KEY`]
/// formatted as `YYYY-MM-DD`; the interval key itself is not kept. Bounds that
/// do not parse as dates are forwarded as-is.
///
/// `normalize(&normalize(x)) == normalize(x)` for every input.
pub fn normalize(raw: &Filters) -> Filters {
    let mut out = Filters::new();
    let mut ranges: Vec<&DateRange> = Vec::new();

    for (key, value) in raw.iter() {
        if value.is_empty() {
            continue;
        }
        match value {
            FilterValue::DateRange(range) => ranges.push(range),
            scalar => out.insert(key, scalar.clone()),
        }
    }

    // Interval bounds win over explicit startDate/endDate scalars.
    for range in ranges {
        if let Some(start) = range.start.as_ref().and_then(format_bound) {
            out.insert(START_DATE_KEY, start);
        }
        if let Some(end) = range.end.as_ref().and_then(format_bound) {
            out.insert(END_DATE_KEY, end);
        }
    }
    out
}

fn format_bound(bound: &DateBound) -> Option<String> {
    match bound {
        DateBound::Date(d) => Some(format_date(*d)),
        DateBound::DateTime(dt) => Some(format_date(dt.date())),
        DateBound::Raw(s) if s.is_empty() => None,
        DateBound::Raw(s) => Some(parse_date(s).map(format_date).unwrap_or_else(|| s.clone())),
    }
}

fn format_date(d: Date) -> String {
    d.format(CALENDAR_DATE).unwrap_or_else(|_| d.to_string())
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and `YYYY-MM-DD` followed by a
/// `T` or space separated time part.
fn parse_date(s: &str) -> Option<Date> {
    let s = s.trim();
    if let Ok(d) = Date::parse(s, CALENDAR_DATE) {
        return Some(d);
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(dt.date());
    }
    let (head, tail) = (s.get(..10)?, s.get(10..)?);
    if tail.starts_with(['T', ' ']) {
        return Date::parse(head, CALENDAR_DATE).ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn drops_empty_entries() {
        let raw = Filters::new()
            .with("search", "")
            .with("status", FilterValue::Null)
            .with("role", "admin")
            .with("range", DateRange::default());

        assert_eq!(normalize(&raw), Filters::new().with("role", "admin"));
    }

    #[test]
    fn keeps_falsy_scalars() {
        let raw = Filters::new().with("archived", false).with("score", 0);
        assert_eq!(normalize(&raw), raw);
    }

    #[test]
    fn expands_date_interval() {
        let raw = Filters::new()
            .with("status", "approved")
            .with("dateRange", DateRange::new(date!(2024 - 01 - 05), date!(2024 - 02 - 10)));

        let out = normalize(&raw);
        assert!(!out.contains_key("dateRange"));
        assert_eq!(out.get(START_DATE_KEY), Some(&"2024-01-05".into()));
        assert_eq!(out.get(END_DATE_KEY), Some(&"2024-02-10".into()));
        assert_eq!(out.get("status"), Some(&"approved".into()));
    }

    #[test]
    fn open_interval_yields_one_key() {
        let out = normalize(&Filters::new().with("range", DateRange::until(date!(2024 - 12 - 31))));
        assert!(!out.contains_key(START_DATE_KEY));
        assert_eq!(out.get(END_DATE_KEY), Some(&"2024-12-31".into()));
    }

    #[test]
    fn datetime_bounds_use_their_own_date() {
        let range = DateRange::new(
            datetime!(2024-03-01 23:30 UTC),
            datetime!(2024-03-02 00:15 +2),
        );
        let out = normalize(&Filters::new().with("range", range));
        assert_eq!(out.get(START_DATE_KEY), Some(&"2024-03-01".into()));
        assert_eq!(out.get(END_DATE_KEY), Some(&"2024-03-02".into()));
    }

    #[test]
    fn raw_bounds_are_reshaped_when_parsable() {
        let range = DateRange::new("2024-03-01T10:00:00Z", "2024-03-09 08:00");
        let out = normalize(&Filters::new().with("range", range));
        assert_eq!(out.get(START_DATE_KEY), Some(&"2024-03-01".into()));
        assert_eq!(out.get(END_DATE_KEY), Some(&"2024-03-09".into()));
    }

    #[test]
    fn unparsable_bounds_pass_through() {
        let range = DateRange::new("last tuesday", "2024-13-45");
        let out = normalize(&Filters::new().with("range", range));
        assert_eq!(out.get(START_DATE_KEY), Some(&"last tuesday".into()));
        assert_eq!(out.get(END_DATE_KEY), Some(&"2024-13-45".into()));
    }

    #[test]
    fn interval_overrides_explicit_scalar() {
        let raw = Filters::new()
            .with(START_DATE_KEY, "1999-01-01")
            .with("range", DateRange::since(date!(2024 - 01 - 01)));
        assert_eq!(normalize(&raw).get(START_DATE_KEY), Some(&"2024-01-01".into()));
    }

    #[test]
    fn idempotent() {
        let raw = Filters::new()
            .with("search", "alice")
            .with("empty", "")
            .with("flag", true)
            .with("range", DateRange::new("2024-01-01", "garbage"));

        let once = normalize(&raw);
        assert_eq!(normalize(&once), once);
    }
}
