// SPDX-License-Identifier: MPL-2.0
//! Display-pattern translation and date parsing on top of chrono.
//!
//! Patterns are written with the field tokens `YYYY`, `YY`, `MM`, `DD`,
//! `HH`, `mm`, and `ss`; every other character is literal text. Tokens are
//! matched longest-first, so `YYYY` is consumed as one token rather than two
//! `YY`s. The pattern language is deliberately tiny: it only has to describe
//! strings whose digit runs line up with editable date components.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Field tokens in match order (longest first), their chrono equivalent,
/// and whether they denote a time-of-day component.
const TOKENS: &[(&str, &str, bool)] = &[
    ("YYYY", "%Y", false),
    ("YY", "%y", false),
    ("MM", "%m", false),
    ("DD", "%d", false),
    ("HH", "%H", true),
    ("mm", "%M", true),
    ("ss", "%S", true),
];

/// Datetime layouts accepted for free-form text, tried in order.
const LOOSE_DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S", // ISO: 2024-03-15 14:30:00
    "%Y-%m-%dT%H:%M:%S", // ISO with T: 2024-03-15T14:30:00
    "%Y-%m-%d %H:%M",    // ISO without seconds: 2024-03-15 14:30
    "%Y/%m/%d %H:%M:%S", // Alternative: 2024/03/15 14:30:00
    "%m/%d/%Y %H:%M:%S", // Month-first: 03/15/2024 14:30:00
];

/// Date-only layouts accepted for free-form text, tried in order.
const LOOSE_DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d", // ISO: 2024-03-15
    "%Y/%m/%d", // Alternative: 2024/03/15
    "%m/%d/%Y", // Month-first: 03/15/2024
    "%Y%m%d",   // Compact: 20240315
];

/// Translates a display pattern into a chrono format string. The second
/// element reports whether any time-of-day token was present.
///
/// Literal `%` characters are escaped so they survive chrono formatting.
fn translate(pattern: &str) -> (String, bool) {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut has_time = false;
    let mut rest = pattern;
    'scan: while !rest.is_empty() {
        for (token, directive, time) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(directive);
                has_time |= time;
                rest = tail;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        match chars.next() {
            Some('%') => out.push_str("%%"),
            Some(ch) => out.push(ch),
            None => break,
        }
        rest = chars.as_str();
    }
    (out, has_time)
}

/// Renders `date` through `pattern`.
pub fn format(date: NaiveDateTime, pattern: &str) -> String {
    let (layout, _) = translate(pattern);
    date.format(&layout).to_string()
}

/// Parses `text` strictly against `pattern`: every literal must match and
/// the whole input must be consumed. Patterns without time tokens produce a
/// midnight timestamp.
pub fn parse_strict(text: &str, pattern: &str) -> Result<NaiveDateTime> {
    let (layout, has_time) = translate(pattern);
    if has_time {
        NaiveDateTime::parse_from_str(text, &layout).map_err(Error::from)
    } else {
        NaiveDate::parse_from_str(text, &layout)
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(Error::from)
    }
}

/// Parses free-form text (typically pasted) by trying a fixed family of
/// common layouts: RFC 3339 first, then datetime layouts, then date-only
/// layouts at midnight.
pub fn parse_loose(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_local());
    }
    for layout in LOOSE_DATETIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, layout) {
            return Ok(dt);
        }
    }
    for layout in LOOSE_DATE_LAYOUTS {
        if let Ok(d) = NaiveDate::parse_from_str(text, layout) {
            return Ok(d.and_time(NaiveTime::MIN));
        }
    }
    Err(Error::UnrecognizedDate(text.to_string()))
}
