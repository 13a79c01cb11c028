use crate::config::Config;
use regex::Regex;
use std::sync::OnceLock;

fn query_param() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[?&#])(?:sheet|sheet_id|id)=([^&#\s]+)").expect("static regex")
    })
}

/// Extract a location id from a bare id or a URL/query-string form
/// (`?sheet=ID`, `https://host/app?x=1&sheet=ID`).
pub fn parse_location(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.contains('=') || raw.contains('?') {
        return query_param()
            .captures(raw)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());
    }

    Some(raw.to_string())
}

/// Command-line override first, then the configured id.
pub fn resolve_location(cli_override: Option<&str>, cfg: &Config) -> Option<String> {
    cli_override
        .and_then(parse_location)
        .or_else(|| cfg.sheet_id.as_deref().and_then(parse_location))
}
