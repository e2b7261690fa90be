//! RRULE text rendering.

use std::fmt;

use crate::rfc::rrule::core::{
    ByPart, Codes, Recurrence, Skip, Until, Weekday, WeekdayNum, split_month_code,
};

/// Which consumer the text is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    /// Full canonical text, readable back by the parser.
    Canonical,
    /// Text handed to the occurrence engine: no RFC 7529 parts and no UNTIL,
    /// which the expansion adapter applies itself.
    Engine,
}

impl fmt::Display for Recurrence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(self, Form::Canonical).join(";"))
    }
}

/// ## Summary
/// Renders the rule for the occurrence engine.
///
/// `RSCALE`, `SKIP` and `UNTIL` are left out; the caller bounds the
/// iteration with the until instant instead.
#[must_use]
pub fn engine_rule(rule: &Recurrence<'_>) -> String {
    render(rule, Form::Engine).join(";")
}

fn render(rule: &Recurrence<'_>, form: Form) -> Vec<String> {
    let mut parts = Vec::new();

    if form == Form::Canonical
        && let Some(rscale) = rule.rscale()
    {
        parts.push(format!("RSCALE={rscale}"));
        if rule.skip() != Skip::Omit {
            parts.push(format!("SKIP={}", rule.skip()));
        }
    }

    if let Some(freq) = rule.frequency() {
        parts.push(format!("FREQ={freq}"));
    }

    if rule.interval() != 1 {
        parts.push(format!("INTERVAL={}", rule.interval()));
    }

    if form == Form::Canonical
        && let Some(until) = rule.until()
    {
        parts.push(format!("UNTIL={}", format_until(&until)));
    }

    if let Some(count) = rule.count() {
        parts.push(format!("COUNT={count}"));
    }

    if let Some(wkst) = rule.week_start()
        && wkst != Weekday::Monday
    {
        parts.push(format!("WKST={wkst}"));
    }

    for (part, codes) in rule.by_parts().iter() {
        parts.push(format!("{part}={}", format_codes(part, codes)));
    }

    parts
}

fn format_until(until: &Until) -> String {
    if until.is_date() {
        until.date().format("%Y%m%d").to_string()
    } else {
        until.naive().format("%Y%m%dT%H%M%SZ").to_string()
    }
}

fn format_codes(part: ByPart, codes: &Codes<'_>) -> String {
    let s: Vec<_> = codes.iter().map(|code| format_code(part, code)).collect();
    s.join(",")
}

fn format_code(part: ByPart, code: i16) -> String {
    match part {
        ByPart::Day => {
            WeekdayNum::from_code(code).map_or_else(|| code.to_string(), |day| day.to_string())
        }
        ByPart::Month => match split_month_code(code) {
            (month, true) => format!("{month}L"),
            (month, false) => month.to_string(),
        },
        _ => code.to_string(),
    }
}
