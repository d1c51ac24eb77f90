// src/recovery/permissive.rs
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::models::server::{BestEffortRecord, ServerDirectory, ServerEntry};
use crate::recovery::scan::find_matching_brace;

/// A candidate is kept only when at least this many fields were recovered.
const MIN_RECOVERED_FIELDS: usize = 3;

lazy_static! {
    // Server key signature: quoted dotted quad plus port, then an object.
    static ref SERVER_KEY: Regex =
        Regex::new(r#""([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+:[0-9]+)":\s*\{"#).unwrap();

    static ref MODNAME: Regex = Regex::new(r#""modname":\s*"([^"]*)""#).unwrap();
    static ref HOSTNAME: Regex = Regex::new(r#""hostname":\s*"([^"]*)""#).unwrap();
    static ref QUERY_PORT: Regex = Regex::new(r#""query_port":\s*(\d+)"#).unwrap();
    static ref PLAYERS: Regex = Regex::new(r#""players":\s*(\d+)"#).unwrap();
    static ref MAX_PLAYERS: Regex = Regex::new(r#""max_players":\s*(\d+)"#).unwrap();
    static ref VERSION: Regex = Regex::new(r#""version":\s*"([^"]*)""#).unwrap();
    static ref PASSW: Regex = Regex::new(r#""passw":\s*(true|false)"#).unwrap();
    static ref LAST_UPDATE: Regex = Regex::new(r#""last_update":\s*(\d+)"#).unwrap();
}

/// Last-resort extraction: finds every `"ip:port": {` signature in the raw
/// text, balances each brace span, and probes the span with independent
/// per-field regexes instead of structural parsing. Always returns a
/// directory; an empty one means nothing recognizable was found.
pub fn extract(raw: &str) -> (ServerDirectory, usize) {
    let mut servers = ServerDirectory::new();
    let mut dropped = 0usize;

    for caps in SERVER_KEY.captures_iter(raw) {
        let key = &caps[1];
        // The signature ends on the opening brace.
        let brace_start = caps.get(0).unwrap().end() - 1;

        let brace_end = match find_matching_brace(raw, brace_start) {
            Some(end) => end,
            None => {
                debug!("No balanced span for candidate {}, skipping", key);
                dropped += 1;
                continue;
            }
        };

        let span = &raw[brace_start + 1..brace_end];
        let record = probe_fields(span);
        let recovered = record.recovered_fields();
        if recovered >= MIN_RECOVERED_FIELDS {
            servers.insert(key.to_string(), ServerEntry::BestEffort(record));
        } else {
            debug!("Insufficient data for candidate {} ({} fields)", key, recovered);
            dropped += 1;
        }
    }

    debug!("Permissive extraction found {} servers", servers.len());
    (servers, dropped)
}

fn probe_fields(span: &str) -> BestEffortRecord {
    let text_field = |re: &Regex| re.captures(span).map(|caps| caps[1].to_string());
    BestEffortRecord {
        modname: text_field(&MODNAME),
        hostname: text_field(&HOSTNAME),
        query_port: QUERY_PORT.captures(span).and_then(|caps| caps[1].parse().ok()),
        players: PLAYERS.captures(span).and_then(|caps| caps[1].parse().ok()),
        max_players: MAX_PLAYERS.captures(span).and_then(|caps| caps[1].parse().ok()),
        version: text_field(&VERSION),
        passw: PASSW.captures(span).map(|caps| &caps[1] == "true"),
        last_update: LAST_UPDATE.captures(span).and_then(|caps| caps[1].parse().ok()),
    }
}
