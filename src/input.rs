use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{FixedOffset, Local, Utc};
use mysentry_lib::{DecodeError, PumpStatus};

/// Decode one hex-encoded message, ignoring whitespace and `:`/`-` separators.
pub fn parse_hex_message(text: &str) -> Result<Vec<u8>> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != ':' && *c != '-')
        .collect();
    hex::decode(&cleaned).with_context(|| format!("Invalid hex message: {:?}", text.trim()))
}

/// Collect message lines, skipping blank lines and `#` comments.
pub fn read_message_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read input")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        lines.push(trimmed.to_string());
    }
    Ok(lines)
}

/// Time zone in which the pump's wall-clock dates are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZoneArg {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl TimeZoneArg {
    pub fn decode(&self, bytes: &[u8]) -> Result<PumpStatus, DecodeError> {
        match self {
            TimeZoneArg::Local => PumpStatus::decode_with(bytes, &Local),
            TimeZoneArg::Utc => PumpStatus::decode_with(bytes, &Utc),
            TimeZoneArg::Fixed(offset) => PumpStatus::decode_with(bytes, offset),
        }
    }
}

impl FromStr for TimeZoneArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(TimeZoneArg::Local),
            "utc" | "z" => Ok(TimeZoneArg::Utc),
            _ => s
                .parse::<FixedOffset>()
                .map(TimeZoneArg::Fixed)
                .map_err(|_| format!("expected 'local', 'utc' or an offset like +02:00, got {s:?}")),
        }
    }
}

impl fmt::Display for TimeZoneArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneArg::Local => f.write_str("local"),
            TimeZoneArg::Utc => f.write_str("utc"),
            TimeZoneArg::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}
