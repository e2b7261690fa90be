use clap::{Parser, Subcommand};

/// Inspect, encode and expand RFC 5545 recurrence rules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Parse a rule and show its canonical text, stored and wire bytes
    Parse(ParseCommand),
    /// List the occurrences of a rule
    Expand(ExpandCommand),
    /// Decode a hex-encoded stored buffer
    DecodeStored(DecodeCommand),
    /// Decode a hex-encoded wire buffer
    DecodeWire(DecodeCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct ParseCommand {
    /// RRULE value, without the "RRULE:" prefix
    pub rule: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ExpandCommand {
    /// RRULE value, without the "RRULE:" prefix
    pub rule: String,
    /// First occurrence: RFC 3339 for zone-aware output, or a zone-less
    /// `YYYY-MM-DDTHH:MM:SS`
    #[arg(long)]
    pub start: String,
    /// Inclusive end bound, in the same form as --start
    #[arg(long)]
    pub end: Option<String>,
    /// Zone to iterate in instead of the session zone; must resolve
    #[arg(long)]
    pub timezone: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DecodeCommand {
    /// Hex-encoded bytes
    pub hex: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_expand_arguments() {
        let cli = Cli::parse_from([
            "kairos",
            "expand",
            "FREQ=DAILY;COUNT=2",
            "--start",
            "2026-01-01T09:00:00Z",
            "--timezone",
            "Europe/Paris",
            "--json",
        ]);
        assert!(cli.json);
        let Commands::Expand(cmd) = cli.command else {
            panic!("expected expand");
        };
        assert_eq!(cmd.rule, "FREQ=DAILY;COUNT=2");
        assert_eq!(cmd.timezone.as_deref(), Some("Europe/Paris"));
        assert_eq!(cmd.end, None);
    }

    #[test]
    fn decode_subcommands_are_kebab_case() {
        let cli = Cli::parse_from(["kairos", "decode-wire", "00"]);
        assert!(matches!(cli.command, Commands::DecodeWire(_)));
    }
}
