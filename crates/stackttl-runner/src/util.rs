use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub fn expand_path(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).to_string())
}

/// Parse an RFC 3339 instant, e.g. `2024-01-01T00:00:00Z`.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    let t = DateTime::parse_from_rfc3339(s).with_context(|| format!("parse instant {:?}", s))?;
    Ok(t.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offsets_into_utc() {
        let t = parse_instant("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(t.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert!(parse_instant("yesterday").is_err());
    }

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_path("stacks.json"), PathBuf::from("stacks.json"));
    }
}
