// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Decoding of raw `CalDAV` properties into typed values.
//!
//! Decoding never fails as a whole: a malformed property degrades to
//! [`PropertyValue::Invalid`] or [`PropertyValue::Undefined`] without
//! affecting its siblings, and properties without a registered [`Rule`] are
//! dropped.

use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;
use jiff::{Span, Timestamp};

use crate::property::Rule;
use crate::value::{
    CalendarDataType, ComponentSet, DecodedProperties, ElementHandle, PropertyValue, RawProperties,
    RawValue,
};

/// Decodes every recognized property, preserving input order.
#[must_use]
pub fn decode<E: ElementHandle>(raw: &RawProperties<E>) -> DecodedProperties {
    let mut decoded = DecodedProperties::default();
    for (name, value) in raw.iter() {
        if let Some(rule) = name.rule() {
            decoded.push(name.clone(), decode_value(rule, value));
        }
    }
    decoded
}

/// Applies a single decoding rule to a raw value.
#[must_use]
pub fn decode_value<E: ElementHandle>(rule: Rule, raw: &RawValue<E>) -> PropertyValue {
    match rule {
        Rule::Integer => {
            let text = raw.text();
            parse_int(&text).map_or_else(
                || PropertyValue::Invalid(text.into_owned()),
                PropertyValue::Integer,
            )
        }
        Rule::Text => PropertyValue::Text(raw.text().into_owned()),
        Rule::Color => PropertyValue::Text(strip_alpha(&raw.text()).to_string()),
        Rule::Undefined => PropertyValue::Undefined,
        Rule::Flag => PropertyValue::Boolean(matches!(raw, RawValue::Text(t) if t == "1")),
        Rule::ComponentSet => PropertyValue::Components(component_set(raw)),
        Rule::CalendarData => match raw {
            RawValue::Elements(elements) => PropertyValue::CalendarData(
                elements
                    .iter()
                    .map(|e| CalendarDataType {
                        content_type: e.attribute("content-type").map(str::to_string),
                        version: e.attribute("version").map(str::to_string),
                    })
                    .collect(),
            ),
            RawValue::Text(_) => PropertyValue::Undefined,
        },
        Rule::DateTime => {
            let text = raw.text();
            parse_date_time(&text).map_or_else(
                || PropertyValue::Invalid(text.into_owned()),
                PropertyValue::Timestamp,
            )
        }
        Rule::CollationSet => match raw {
            RawValue::Elements(elements) => PropertyValue::Collations(
                elements
                    .iter()
                    .map(|e| e.text_content().into_owned())
                    .collect(),
            ),
            RawValue::Text(_) => PropertyValue::Undefined,
        },
    }
}

/// Turns `#RRGGBBAA` into `#RRGGBB`; any other length is returned unchanged.
fn strip_alpha(color: &str) -> &str {
    if color.chars().count() == 9 {
        char_slice(color, 0, 7)
    } else {
        color
    }
}

fn component_set<E: ElementHandle>(raw: &RawValue<E>) -> ComponentSet {
    let mut set = ComponentSet::default();
    let RawValue::Elements(elements) = raw else {
        return set;
    };

    for name in elements.iter().filter_map(|e| e.attribute("name")) {
        match name.to_lowercase().as_str() {
            "vevent" => set.vevent = true,
            "vjournal" => set.vjournal = true,
            "vtodo" => set.vtodo = true,
            _ => {}
        }
    }
    set
}

/// Reads a base-10 integer prefix: leading whitespace and a sign are
/// accepted, trailing garbage is ignored.
fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, text.get(1..)?),
        Some(b'+') => (false, text.get(1..)?),
        _ => (false, text),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = rest.get(..end).filter(|d| !d.is_empty())?;

    // Parse with the sign attached so `i64::MIN` round-trips.
    let n: i64 = if negative {
        format!("-{digits}").parse().ok()?
    } else {
        digits.parse().ok()?
    };
    Some(n)
}

/// Parses `YYYYMMDD'T'HHMMSS` by position, treating the result as UTC.
///
/// Out-of-range fields roll over into the next larger unit, so month `13`
/// becomes January of the following year and day `0` the last day of the
/// previous month. Years `0000` to `0099` are read as 1900 to 1999.
fn parse_date_time(text: &str) -> Option<Timestamp> {
    let field = |start, end| parse_int(char_slice(text, start, end));

    let year = match field(0, 4)? {
        year @ 0..=99 => year + 1900,
        year => year,
    };
    let year = i16::try_from(year).ok()?;
    let month = field(4, 6)? - 1;
    let day = field(6, 8)?;
    let hour = field(9, 11)?;
    let minute = field(11, 13)?;
    let second = field(13, 15)?;

    let start: DateTime = Date::new(year, 1, 1).ok()?.at(0, 0, 0, 0);
    let datetime = start
        .checked_add(Span::new().try_months(month).ok()?)
        .ok()?
        .checked_add(Span::new().try_days(day - 1).ok()?)
        .ok()?
        .checked_add(Span::new().try_hours(hour).ok()?)
        .ok()?
        .checked_add(Span::new().try_minutes(minute).ok()?)
        .ok()?
        .checked_add(Span::new().try_seconds(second).ok()?)
        .ok()?;

    datetime
        .to_zoned(TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

/// Character-indexed substring, clamped to the string length.
fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| {
        text.char_indices()
            .nth(n)
            .map_or(text.len(), |(offset, _)| offset)
    };
    let (from, to) = (byte_at(start), byte_at(end));
    text.get(from..to).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn parse_int_plain() {
        assert_eq!(parse_int("102400"), Some(102_400));
        assert_eq!(parse_int("0"), Some(0));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("+7"), Some(7));
    }

    #[test]
    fn parse_int_lenient_prefix() {
        assert_eq!(parse_int("  42"), Some(42));
        assert_eq!(parse_int("12px"), Some(12));
        assert_eq!(parse_int("3.9"), Some(3));
        assert_eq!(parse_int("007"), Some(7));
    }

    #[test]
    fn parse_int_rejects_non_numeric() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(" - 1"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    #[test]
    fn parse_int_extremes() {
        assert_eq!(parse_int("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_int("9223372036854775807"), Some(i64::MAX));
    }

    #[test]
    fn strip_alpha_only_for_nine_chars() {
        assert_eq!(strip_alpha("#FF0000AA"), "#FF0000");
        assert_eq!(strip_alpha("#FF0000"), "#FF0000");
        assert_eq!(strip_alpha("#FF0000A"), "#FF0000A");
        assert_eq!(strip_alpha("#FF0000AAB"), "#FF0000AAB");
        assert_eq!(strip_alpha(""), "");
        assert_eq!(strip_alpha("not-a-hex"), "not-a-h");
    }

    #[test]
    fn strip_alpha_counts_characters() {
        // Nine characters, more than nine bytes.
        assert_eq!(strip_alpha("#ÄÄÄÄÄÄÄÄ"), "#ÄÄÄÄÄÄ");
    }

    #[test]
    fn char_slice_clamps() {
        assert_eq!(char_slice("2020", 0, 4), "2020");
        assert_eq!(char_slice("20201", 4, 6), "1");
        assert_eq!(char_slice("2020", 4, 6), "");
        assert_eq!(char_slice("", 0, 4), "");
    }

    #[test]
    fn date_time_basic() {
        assert_eq!(
            parse_date_time("19000101T000000Z"),
            Some(ts("1900-01-01T00:00:00Z"))
        );
        assert_eq!(
            parse_date_time("20491231T235959Z"),
            Some(ts("2049-12-31T23:59:59Z"))
        );
    }

    #[test]
    fn date_time_ignores_zone_suffix() {
        assert_eq!(
            parse_date_time("20250615T120000"),
            Some(ts("2025-06-15T12:00:00Z"))
        );
        assert_eq!(
            parse_date_time("20250615T120000+0200"),
            Some(ts("2025-06-15T12:00:00Z"))
        );
    }

    #[test]
    fn date_time_rolls_over() {
        // Month 13 is January of the next year.
        assert_eq!(
            parse_date_time("20241301T000000Z"),
            Some(ts("2025-01-01T00:00:00Z"))
        );
        // Day 0 is the last day of the previous month.
        assert_eq!(
            parse_date_time("20240300T000000Z"),
            Some(ts("2024-02-29T00:00:00Z"))
        );
        // February 30 spills into March.
        assert_eq!(
            parse_date_time("20230230T000000Z"),
            Some(ts("2023-03-02T00:00:00Z"))
        );
        // Hour 24 is midnight of the next day.
        assert_eq!(
            parse_date_time("20231231T240000Z"),
            Some(ts("2024-01-01T00:00:00Z"))
        );
        assert_eq!(
            parse_date_time("20240101T006060Z"),
            Some(ts("2024-01-01T01:01:00Z"))
        );
    }

    #[test]
    fn date_time_malformed() {
        assert_eq!(parse_date_time(""), None);
        assert_eq!(parse_date_time("2024"), None);
        assert_eq!(parse_date_time("20240101"), None);
        assert_eq!(parse_date_time("2024-01-01T00:00:00Z"), None);
        assert_eq!(parse_date_time("yyyymmddThhmmssZ"), None);
    }

    #[test]
    fn date_time_two_digit_years_map_to_1900s() {
        assert_eq!(
            parse_date_time("00500101T000000Z"),
            Some(ts("1950-01-01T00:00:00Z"))
        );
        assert_eq!(
            parse_date_time("00001231T235959Z"),
            Some(ts("1900-12-31T23:59:59Z"))
        );
        assert_eq!(
            parse_date_time("01000101T000000Z"),
            Some(ts("0100-01-01T00:00:00Z"))
        );
    }
}
