// src/recovery/entry.rs
use std::collections::HashMap;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::models::server::{ServerRecord, UpstreamEnvelope};
use crate::recovery::scan::find_matching_brace;
use crate::recovery::StageOutcome;

const WRAPPER_PREFIX: &str = r#"{"list servers":{"#;
const WRAPPER_SUFFIX: &str = "}}";

lazy_static! {
    // Alternate top-level shapes, tried in order when the exact wrapper is
    // absent. The last one matches any object that mentions "modname".
    static ref ALT_SHAPES: Vec<Regex> = vec![
        Regex::new(r#"(?s)"list servers":\s*\{(.*)\}"#).unwrap(),
        Regex::new(r#"(?s)"servers":\s*\{(.*)\}"#).unwrap(),
        Regex::new(r#"(?s)\{(.*"modname".*)\}"#).unwrap(),
    ];
}

/// Recovers a directory from a document whose outer wrapper is intact but
/// whose body contains malformed entries. Each candidate entry is decoded
/// in isolation and corrupt ones are dropped instead of failing the whole
/// document.
pub fn repair(raw: &str) -> StageOutcome {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_prefix(WRAPPER_PREFIX)
        .and_then(|rest| rest.strip_suffix(WRAPPER_SUFFIX));

    match stripped {
        Some(content) => {
            debug!("Found main structure, processing {} characters", content.len());
            reassemble(content, false)
        }
        None => {
            debug!("Could not find main structure, trying alternate shapes");
            repair_alternate_shapes(trimmed)
        }
    }
}

fn repair_alternate_shapes(text: &str) -> StageOutcome {
    for (i, pattern) in ALT_SHAPES.iter().enumerate() {
        if let Some(caps) = pattern.captures(text) {
            debug!("Matched alternate shape {}", i + 1);
            // Alternate matches are loose; an empty result here means the
            // shape was a false positive and the next strategy should run.
            return reassemble(&caps[1], true);
        }
    }
    StageOutcome::Fallthrough
}

fn reassemble(content: &str, require_entries: bool) -> StageOutcome {
    let walk = walk_entries(content);
    debug!(
        "Entry repair accepted {} entries, dropped {}",
        walk.accepted.len(),
        walk.dropped
    );

    if require_entries && walk.accepted.is_empty() {
        return StageOutcome::Fallthrough;
    }

    let rebuilt = format!("{}{}{}", WRAPPER_PREFIX, walk.accepted.join(","), WRAPPER_SUFFIX);
    match serde_json::from_str::<UpstreamEnvelope>(&rebuilt) {
        Ok(envelope) => StageOutcome::Recovered {
            servers: envelope.list_servers,
            dropped: walk.dropped,
        },
        Err(e) => {
            debug!("Reassembled document still does not decode: {}", e);
            StageOutcome::Fallthrough
        }
    }
}

struct EntryWalk {
    /// Raw `"key": {..}` spans that survived isolated decoding.
    accepted: Vec<String>,
    dropped: usize,
}

/// Walks the wrapper body left to right: quoted key, opening brace,
/// balanced close. Candidates that fail to balance or to decode are
/// skipped without aborting the walk.
fn walk_entries(content: &str) -> EntryWalk {
    let mut accepted = Vec::new();
    let mut dropped = 0usize;
    let mut cursor = 0usize;

    while cursor < content.len() {
        let key_start = match content[cursor..].find('"') {
            Some(rel) => cursor + rel,
            None => break,
        };
        let key_end = match content[key_start + 1..].find('"') {
            Some(rel) => key_start + 1 + rel,
            None => break,
        };
        let key = &content[key_start + 1..key_end];

        let brace_start = match content[key_end..].find('{') {
            Some(rel) => key_end + rel,
            None => break,
        };

        match find_matching_brace(content, brace_start) {
            Some(brace_end) => {
                let entry = &content[key_start..=brace_end];
                if decodes_in_isolation(key, entry) {
                    accepted.push(entry.to_string());
                } else {
                    debug!("Malformed server entry removed: {}", key);
                    dropped += 1;
                }
                cursor = brace_end + 1;
            }
            None => {
                debug!("Unmatched braces, skipping: {}", key);
                dropped += 1;
                cursor = key_end + 1;
            }
        }
    }

    EntryWalk { accepted, dropped }
}

/// Strict validation of a single candidate: `{"<key>": <span>}` must decode
/// into a record with the full required field set.
fn decodes_in_isolation(key: &str, entry: &str) -> bool {
    let wrapped = format!("{{{}}}", entry);
    match serde_json::from_str::<HashMap<String, ServerRecord>>(&wrapped) {
        Ok(map) => map.contains_key(key),
        Err(_) => false,
    }
}
