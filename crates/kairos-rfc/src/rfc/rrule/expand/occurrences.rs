//! Occurrence expansion through the `rrule` engine.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike, Utc};
use kairos_core::constants::{DEFAULT_MAX_OCCURRENCES, GREGORIAN_RSCALE};
use rrule::{RRule, RRuleSet, Unvalidated};

use super::error::{ExpansionError, ExpansionResult};
use super::timezone::TimeZoneResolver;
use crate::rfc::rrule::build::engine_rule;
use crate::rfc::rrule::core::{Recurrence, Skip};

/// Limits applied to a single expansion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    pub max_occurrences: usize,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

/// Zone whose wall clock the engine iterates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneContext<'z> {
    Utc,
    Explicit(chrono_tz::Tz),
    /// Session zone name, resolved per call with a UTC fallback.
    Session(&'z str),
}

impl ZoneContext<'_> {
    fn resolve(self) -> chrono_tz::Tz {
        match self {
            Self::Utc => chrono_tz::Tz::UTC,
            Self::Explicit(tz) => tz,
            Self::Session(name) => TimeZoneResolver::new().resolve_or_utc(name),
        }
    }
}

/// ## Summary
/// Expands `rule` from `start` into UTC instants.
///
/// Iteration runs in the wall clock of `zone`, so a daily rule keeps its
/// local time across DST changes. Output stops at the rule's COUNT, at its
/// UNTIL and at `end`, all inclusive. A date-only UNTIL covers its whole
/// day in that wall clock. Sub-second parts of `start` and `end` are
/// dropped.
///
/// ## Errors
/// - `ExpansionError::NoRecurrence` if the rule has no frequency.
/// - `ExpansionError::UnsupportedCalendar` / `UnsupportedSkip` for RFC 7529
///   parts the engine cannot honor.
/// - `ExpansionError::Unbounded` without COUNT, UNTIL or `end`.
/// - `ExpansionError::TooManyOccurrences` above `options.max_occurrences`.
/// - `ExpansionError::Engine` if the engine rejects the rule.
pub fn expand_aware(
    rule: &Recurrence<'_>,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    zone: &ZoneContext<'_>,
    options: &ExpansionOptions,
) -> ExpansionResult<Vec<DateTime<Utc>>> {
    check_supported(rule)?;

    // the engine iterates whole seconds
    let start = whole_second(start);
    let end = end.map(whole_second);

    let tz = zone.resolve();
    let until = rule.until().map(|until| until.inclusive_end_in(&tz));
    let end = match (end, until) {
        (Some(end), Some(until)) => Some(end.min(until)),
        (end, until) => end.or(until),
    };
    if end.is_none() && rule.count().is_none() {
        return Err(ExpansionError::Unbounded);
    }
    if let Some(end) = end
        && end < start
    {
        tracing::debug!(%start, %end, "Expansion window is empty");
        return Ok(Vec::new());
    }

    let text = engine_rule(rule);
    let engine: RRule<Unvalidated> = text
        .parse()
        .map_err(|e: rrule::RRuleError| ExpansionError::Engine(e.to_string()))?;
    let dt_start = start.with_timezone(&rrule::Tz::from(tz));
    let mut set: RRuleSet = engine
        .build(dt_start)
        .map_err(|e| ExpansionError::Engine(e.to_string()))?;

    if let Some(end) = end {
        set = set.before((end + TimeDelta::seconds(1)).with_timezone(&rrule::Tz::UTC));
    }

    let limit = u16::try_from(options.max_occurrences.saturating_add(1)).unwrap_or(u16::MAX);
    let mut occurrences: Vec<DateTime<Utc>> = set
        .all(limit)
        .dates
        .into_iter()
        .map(|dt| dt.with_timezone(&Utc))
        .filter(|dt| *dt >= start && end.is_none_or(|end| *dt <= end))
        .collect();
    occurrences.dedup();

    if occurrences.len() > options.max_occurrences {
        return Err(ExpansionError::TooManyOccurrences(options.max_occurrences));
    }

    tracing::debug!(
        rule = %text,
        timezone = tz.name(),
        count = occurrences.len(),
        "Expanded recurrence"
    );
    Ok(occurrences)
}

fn whole_second(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

/// ## Summary
/// Expands `rule` over zone-less wall times.
///
/// The times are iterated as if they were UTC, so no DST adjustment applies.
///
/// ## Errors
/// Same as [`expand_aware`].
pub fn expand_naive(
    rule: &Recurrence<'_>,
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    options: &ExpansionOptions,
) -> ExpansionResult<Vec<NaiveDateTime>> {
    let occurrences = expand_aware(
        rule,
        start.and_utc(),
        end.map(|end| end.and_utc()),
        &ZoneContext::Utc,
        options,
    )?;
    Ok(occurrences.into_iter().map(|dt| dt.naive_utc()).collect())
}

fn check_supported(rule: &Recurrence<'_>) -> ExpansionResult<()> {
    if rule.frequency().is_none() {
        return Err(ExpansionError::NoRecurrence);
    }
    if let Some(rscale) = rule.rscale()
        && !rscale.eq_ignore_ascii_case(GREGORIAN_RSCALE)
    {
        return Err(ExpansionError::UnsupportedCalendar(rscale.to_string()));
    }
    if rule.skip() != Skip::Omit {
        return Err(ExpansionError::UnsupportedSkip(rule.skip()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "occurrences_tests.rs"]
mod tests;
