//! Subcommand implementations. Each returns the text to print.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use kairos_rfc::rfc::rrule::expand::TimeZoneResolver;
use kairos_rfc::rfc::rrule::{Frequency, Weekday, ZoneContext, expand_aware};
use kairos_service::datum::{accessor, io, occurrence};
use kairos_service::session::Session;
use serde::Serialize;

use crate::cli::{Commands, DecodeCommand, ExpandCommand, ParseCommand};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Everything known about one stored rule.
#[derive(Debug, Serialize)]
pub struct RuleReport {
    pub rule: String,
    pub stored: String,
    pub wire: String,
    pub frequency: Option<&'static str>,
    pub interval: u16,
    pub count: Option<i32>,
    pub until: Option<String>,
    pub week_start: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ExpandReport {
    pub rule: String,
    pub timezone: Option<String>,
    pub occurrences: Vec<String>,
}

/// ## Summary
/// Runs one subcommand under `session`.
///
/// ## Errors
/// Returns the first error raised while decoding input or running the
/// datum functions.
pub fn run(command: Commands, json: bool, session: &Session) -> Result<String> {
    match command {
        Commands::Parse(cmd) => parse(&cmd, json, session),
        Commands::Expand(cmd) => expand(cmd, json, session),
        Commands::DecodeStored(cmd) => decode_stored(&cmd, json),
        Commands::DecodeWire(cmd) => decode_wire(&cmd, json, session),
    }
}

fn parse(cmd: &ParseCommand, json: bool, session: &Session) -> Result<String> {
    let stored = io::input(&cmd.rule, session)?;
    render_report(&report(stored.as_bytes())?, json)
}

fn decode_stored(cmd: &DecodeCommand, json: bool) -> Result<String> {
    let bytes = hex::decode(cmd.hex.trim()).context("stored buffer is not valid hex")?;
    render_report(&report(&bytes)?, json)
}

fn decode_wire(cmd: &DecodeCommand, json: bool, session: &Session) -> Result<String> {
    let bytes = hex::decode(cmd.hex.trim()).context("wire buffer is not valid hex")?;
    let stored = io::receive(&bytes, session)?;
    render_report(&report(stored.as_bytes())?, json)
}

fn expand(cmd: ExpandCommand, json: bool, session: &Session) -> Result<String> {
    let stored = io::input(&cmd.rule, session)?;
    let bytes = stored.as_bytes();

    let (timezone, occurrences) = if let Ok(start) = DateTime::parse_from_rfc3339(&cmd.start) {
        let start = start.with_timezone(&Utc);
        let end = cmd
            .end
            .as_deref()
            .map(|end| {
                DateTime::parse_from_rfc3339(end)
                    .context("--end must be RFC 3339 when --start is")
                    .map(|end| end.with_timezone(&Utc))
            })
            .transpose()?;
        // an explicit zone must resolve, only the session zone falls back
        let (zone, name) = match cmd.timezone.as_deref() {
            Some(name) => {
                let tz = TimeZoneResolver::new()
                    .resolve(name)
                    .with_context(|| format!("cannot use --timezone {name}"))?;
                (ZoneContext::Explicit(tz), tz.name().to_string())
            }
            None => (session.zone(), session.timezone().to_string()),
        };
        let rule = stored.decode()?;
        let found = expand_aware(&rule, start, end, &zone, session.expansion())?;
        (
            Some(name),
            found.iter().map(DateTime::to_rfc3339).collect::<Vec<_>>(),
        )
    } else {
        let start = NaiveDateTime::parse_from_str(&cmd.start, NAIVE_FORMAT)
            .context("--start must be RFC 3339 or YYYY-MM-DDTHH:MM:SS")?;
        let found = match cmd.end.as_deref() {
            Some(end) => {
                let end = NaiveDateTime::parse_from_str(end, NAIVE_FORMAT)
                    .context("--end must be YYYY-MM-DDTHH:MM:SS when --start is")?;
                occurrence::occurrences_until(bytes, start, end, session)?
            }
            None => occurrence::occurrences(bytes, start, session)?,
        };
        (
            None,
            found
                .iter()
                .map(|dt| dt.format(NAIVE_FORMAT).to_string())
                .collect(),
        )
    };

    let report = ExpandReport {
        rule: io::output(bytes)?,
        timezone,
        occurrences,
    };
    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(report.occurrences.join("\n"))
}

fn report(stored: &[u8]) -> Result<RuleReport> {
    Ok(RuleReport {
        rule: io::output(stored)?,
        stored: hex::encode(stored),
        wire: hex::encode(io::send(stored)?),
        frequency: accessor::frequency(stored)?.map(Frequency::as_str),
        interval: accessor::interval(stored)?,
        count: accessor::count(stored)?,
        until: accessor::until(stored)?.map(|until| until.format(NAIVE_FORMAT).to_string()),
        week_start: accessor::week_start(stored)?.map(Weekday::as_str),
    })
}

fn render_report(report: &RuleReport, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }
    Ok(format!(
        "rule:   {}\nstored: {}\nwire:   {}",
        report.rule, report.stored, report.wire
    ))
}
