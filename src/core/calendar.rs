//! Calendar ordering for period labels.
//!
//! Accepted forms, after an optional trailing `(F)` projection marker is removed:
//! `2024-01-15` (a time suffix such as `T00:00:00Z` is ignored), `2024/01/15`,
//! `2024-01`, `Jan 2024` / `January 2024`, and bare `Jan` / `January`.
//!
//! Dated keys sort before year-less keys, which sort before anything unparseable.

use chrono::{Datelike, Month, NaiveDate};

const PROJECTION_MARKER: &str = "(F)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MonthKey {
    Dated {
        year: i32,
        month: u32,
        day: u32,
        projected: bool,
    },
    MonthOnly {
        month: u32,
        projected: bool,
    },
    Unparsed,
}

impl MonthKey {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let (body, projected) = match strip_marker(trimmed) {
            Some(rest) => (rest.trim_end(), true),
            None => (trimmed, false),
        };

        if let Some(date) = parse_date(body) {
            return MonthKey::Dated {
                year: date.year(),
                month: date.month(),
                day: date.day(),
                projected,
            };
        }

        let mut tokens = body.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(name), None, None) => match month_number(name) {
                Some(month) => MonthKey::MonthOnly { month, projected },
                None => MonthKey::Unparsed,
            },
            (Some(name), Some(year), None) => match (month_number(name), year.parse::<i32>()) {
                (Some(month), Ok(year)) => MonthKey::Dated {
                    year,
                    month,
                    day: 1,
                    projected,
                },
                _ => MonthKey::Unparsed,
            },
            _ => MonthKey::Unparsed,
        }
    }
}

fn strip_marker(value: &str) -> Option<&str> {
    let split = value.len().checked_sub(PROJECTION_MARKER.len())?;
    let (rest, tail) = (value.get(..split)?, value.get(split..)?);
    tail.eq_ignore_ascii_case(PROJECTION_MARKER).then_some(rest)
}

fn parse_date(body: &str) -> Option<NaiveDate> {
    // ISO timestamps: only the date part matters
    let date_part = body.get(..10).filter(|_| body.len() > 10 && body[10..].starts_with('T'));
    let candidate = date_part.unwrap_or(body);

    NaiveDate::parse_from_str(candidate, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(candidate, "%Y/%m/%d"))
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", candidate), "%Y-%m-%d"))
        .ok()
}

fn month_number(name: &str) -> Option<u32> {
    name.parse::<Month>().ok().map(|m| m.number_from_month())
}

/// Stable ascending sort by parsed month; equal keys keep their input order.
pub fn sort_by_month<T, F>(items: &mut [T], month_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| MonthKey::parse(month_of(item)));
}
