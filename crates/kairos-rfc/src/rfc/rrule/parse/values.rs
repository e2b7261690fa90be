//! RECUR value parser (RFC 5545 §3.3.10, RFC 7529 §4).
//!
//! Error sources are discarded during parsing (`map_err_ignore`); the
//! offending part and column are reported instead.
#![expect(
    clippy::map_err_ignore,
    reason = "Value parsers report the rule part instead of integer parse errors"
)]

use chrono::{NaiveDate, NaiveTime};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::rrule::core::{
    ByPart, Frequency, Recurrence, Skip, Until, Weekday, WeekdayNum, month_code,
};

/// Parses a RECUR (RRULE) value without the `RRULE:` property name.
///
/// ## Errors
/// Returns an error naming the offending part and echoing the input if the
/// string is not a valid recurrence rule.
pub fn parse_recurrence(s: &str) -> ParseResult<Recurrence<'static>> {
    let rule = parse_parts(s).map_err(|e| e.with_input(s))?;
    tracing::trace!(rule = %s, "Parsed recurrence rule");
    Ok(rule)
}

fn parse_parts(s: &str) -> ParseResult<Recurrence<'static>> {
    let body = s.trim_start();
    let mut col = s.len() - body.len() + 1;
    let body = body.trim_end();

    if body.is_empty() {
        return Err(ParseError::new(ParseErrorKind::Empty, col));
    }
    if body
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("RRULE:"))
    {
        return Err(ParseError::new(ParseErrorKind::PropertyPrefix, col));
    }

    let mut parts = RuleParts::default();
    for part in body.split(';') {
        if !part.is_empty() {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| ParseError::new(ParseErrorKind::MissingEquals, col))?;
            parse_rrule_part(&mut parts, key, value, col)?;
        }
        col += part.len() + 1;
    }

    parts.finish(col)
}

/// Rule parts collected before the value is assembled.
#[derive(Default)]
struct RuleParts {
    freq: Option<Frequency>,
    interval: Option<u16>,
    count: Option<i32>,
    until: Option<Until>,
    week_start: Option<Weekday>,
    skip: Option<Skip>,
    rscale: Option<String>,
    by: [Option<Vec<i16>>; ByPart::COUNT],
}

impl RuleParts {
    fn finish(self, col: usize) -> ParseResult<Recurrence<'static>> {
        let freq = self
            .freq
            .ok_or_else(|| ParseError::new(ParseErrorKind::MissingFrequency, col))?;
        if self.skip.is_some() && self.rscale.is_none() {
            return Err(ParseError::new(ParseErrorKind::SkipWithoutRscale, col));
        }

        let mut rule = Recurrence::new(freq)
            .with_interval(self.interval.unwrap_or(1))
            .with_week_start(Some(self.week_start.unwrap_or(Weekday::Monday)))
            .with_skip(self.skip.unwrap_or_default());
        if let Some(count) = self.count {
            rule = rule.with_count(count);
        }
        if let Some(until) = self.until {
            rule = rule.with_until(until);
        }
        if let Some(rscale) = self.rscale {
            rule = rule.with_rscale(rscale);
        }
        for (part, codes) in ByPart::ALL.into_iter().zip(self.by) {
            if let Some(codes) = codes {
                rule = rule.with_by(part, codes);
            }
        }
        Ok(rule)
    }
}

/// Stores a part value, rejecting a second occurrence of the same part.
fn set_once<T>(slot: &mut Option<T>, value: T, key: &str, col: usize) -> ParseResult<()> {
    if slot.is_some() {
        return Err(ParseError::new(ParseErrorKind::DuplicatePart, col).with_context(key));
    }
    *slot = Some(value);
    Ok(())
}

/// Parses a single RRULE key-value pair.
fn parse_rrule_part(parts: &mut RuleParts, key: &str, value: &str, col: usize) -> ParseResult<()> {
    let value_col = col + key.len() + 1;
    match key.to_ascii_uppercase().as_str() {
        "FREQ" => {
            let freq = Frequency::parse(value)
                .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidFrequency, value_col))?;
            set_once(&mut parts.freq, freq, key, col)
        }
        "INTERVAL" => {
            let interval = value
                .parse::<u16>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidInterval, value_col))?;
            set_once(&mut parts.interval, interval, key, col)
        }
        "COUNT" => parse_rrule_count(parts, key, value, col),
        "UNTIL" => parse_rrule_until(parts, key, value, col),
        "WKST" => {
            let day = Weekday::parse(value)
                .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, value_col))?;
            set_once(&mut parts.week_start, day, key, col)
        }
        "SKIP" => {
            let skip = Skip::parse(value)
                .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidSkip, value_col))?;
            set_once(&mut parts.skip, skip, key, col)
        }
        "RSCALE" => {
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_graphic()) {
                return Err(ParseError::new(ParseErrorKind::InvalidRscale, value_col));
            }
            set_once(&mut parts.rscale, value.to_string(), key, col)
        }
        other => {
            let part = ByPart::parse(other).ok_or_else(|| {
                ParseError::new(ParseErrorKind::UnknownPart, col).with_context(key)
            })?;
            let codes = parse_by_list(part, value, value_col)?;
            set_once(&mut parts.by[part.index()], codes, key, col)
        }
    }
}

/// Parses the COUNT component of an RRULE.
fn parse_rrule_count(parts: &mut RuleParts, key: &str, value: &str, col: usize) -> ParseResult<()> {
    if parts.until.is_some() {
        return Err(ParseError::new(ParseErrorKind::UntilCountConflict, col));
    }
    let count = value
        .parse::<i32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidCount, col + key.len() + 1))?;
    set_once(&mut parts.count, count, key, col)
}

/// Parses the UNTIL component of an RRULE.
fn parse_rrule_until(parts: &mut RuleParts, key: &str, value: &str, col: usize) -> ParseResult<()> {
    if parts.count.is_some() {
        return Err(ParseError::new(ParseErrorKind::UntilCountConflict, col));
    }
    let until = parse_until(value)
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidUntil, col + key.len() + 1))?;
    set_once(&mut parts.until, until, key, col)
}

/// UNTIL is either `YYYYMMDD` or `YYYYMMDDTHHMMSS` with an optional `Z`.
fn parse_until(value: &str) -> Option<Until> {
    let (date, time) = match value.split_once(['T', 't']) {
        Some((date, time)) => (date, Some(time.strip_suffix(['Z', 'z']).unwrap_or(time))),
        None => (value, None),
    };

    let date = parse_date(date)?;
    match time {
        None => Some(Until::on_date(date)),
        Some(time) => Some(Until::at(date.and_time(parse_time(time)?))),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(s[..4].parse().ok()?, s[4..6].parse().ok()?, s[6..].parse().ok()?)
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveTime::from_hms_opt(s[..2].parse().ok()?, s[2..4].parse().ok()?, s[4..].parse().ok()?)
}

/// Parses a comma-separated BY* list into slot codes.
fn parse_by_list(part: ByPart, s: &str, col: usize) -> ParseResult<Vec<i16>> {
    let codes = s
        .split(',')
        .map(|item| parse_by_item(part, item.trim(), col))
        .collect::<ParseResult<Vec<i16>>>()?;

    if codes.len() > part.capacity() {
        return Err(ParseError::new(ParseErrorKind::TooManyValues, col).with_context(format!(
            "{part} accepts at most {} values",
            part.capacity()
        )));
    }
    Ok(codes)
}

fn parse_by_item(part: ByPart, item: &str, col: usize) -> ParseResult<i16> {
    match part {
        ByPart::Second => parse_unsigned(item, 60, col),
        ByPart::Minute => parse_unsigned(item, 59, col),
        ByPart::Hour => parse_unsigned(item, 23, col),
        ByPart::Day => parse_weekday_num(item, col).map(WeekdayNum::code),
        ByPart::MonthDay => parse_signed(item, 31, col),
        ByPart::YearDay | ByPart::SetPos => parse_signed(item, 366, col),
        ByPart::WeekNo => parse_signed(item, 53, col),
        ByPart::Month => parse_month(item, col),
    }
}

fn parse_number(item: &str, col: usize) -> ParseResult<i16> {
    item.parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidNumber, col).with_context(item))
}

/// Entry in `0..=max`.
fn parse_unsigned(item: &str, max: i16, col: usize) -> ParseResult<i16> {
    let n = parse_number(item, col)?;
    if (0..=max).contains(&n) {
        Ok(n)
    } else {
        Err(ParseError::new(ParseErrorKind::OutOfRange, col).with_context(item))
    }
}

/// Entry in `-max..=max`, excluding 0.
fn parse_signed(item: &str, max: i16, col: usize) -> ParseResult<i16> {
    let n = parse_number(item, col)?;
    if n != 0 && (-max..=max).contains(&n) {
        Ok(n)
    } else {
        Err(ParseError::new(ParseErrorKind::OutOfRange, col).with_context(item))
    }
}

/// Month number 1-12, optionally suffixed with `L` for a leap month.
fn parse_month(item: &str, col: usize) -> ParseResult<i16> {
    let (number, leap) = match item.strip_suffix(['L', 'l']) {
        Some(number) => (number, true),
        None => (item, false),
    };
    let month = parse_unsigned(number, 12, col)?;
    let month = u8::try_from(month)
        .ok()
        .filter(|m| *m >= 1)
        .ok_or_else(|| ParseError::new(ParseErrorKind::OutOfRange, col).with_context(item))?;
    Ok(month_code(month, leap))
}

/// Parses a single weekday with optional ordinal (e.g., "MO", "1MO", "-1FR").
fn parse_weekday_num(s: &str, col: usize) -> ParseResult<WeekdayNum> {
    // Last two characters are the weekday
    let split = s
        .len()
        .checked_sub(2)
        .filter(|at| s.is_char_boundary(*at))
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, col).with_context(s))?;

    let (ordinal_str, weekday_str) = s.split_at(split);
    let weekday = Weekday::parse(weekday_str)
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, col).with_context(s))?;

    if ordinal_str.is_empty() {
        return Ok(WeekdayNum::every(weekday));
    }

    ordinal_str
        .parse::<i8>()
        .ok()
        .and_then(|n| WeekdayNum::nth(n, weekday))
        .ok_or_else(|| ParseError::new(ParseErrorKind::OutOfRange, col).with_context(s))
}
