// src/recovery/mod.rs
//
// Staged recovery of the master-server directory from raw, sometimes
// corrupt JSON. Strategies run in escalating order of permissiveness and
// each one is a pure function of the input text.

pub mod entry;
pub mod permissive;
pub mod scan;

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::models::server::{ServerDirectory, UpstreamEnvelope};

/// Which strategy produced the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Direct,
    EntryRepair,
    Permissive,
}

/// Result of a single strategy: a directory plus the number of entries it
/// had to drop, or a signal to try the next strategy. Strategies never
/// error; only the orchestrator decides the whole payload is a loss.
#[derive(Debug)]
pub enum StageOutcome {
    Recovered { servers: ServerDirectory, dropped: usize },
    Fallthrough,
}

/// The pipeline's output: the directory and how it was obtained.
#[derive(Debug)]
pub struct RecoveredDirectory {
    pub servers: ServerDirectory,
    pub strategy: Strategy,
    pub dropped: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RecoveryError {
    /// Every strategy was exhausted without recognizing any server data.
    Unrecoverable,
}

impl fmt::Display for RecoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecoverable => write!(f, "Unable to parse server data from external API"),
        }
    }
}

impl std::error::Error for RecoveryError {}

/// Strict decode of the whole document. Entries are taken as-is, with no
/// per-field validation beyond what the untagged entry type records.
fn direct_parse(raw: &str) -> StageOutcome {
    match serde_json::from_str::<UpstreamEnvelope>(raw) {
        Ok(envelope) => StageOutcome::Recovered {
            servers: envelope.list_servers,
            dropped: 0,
        },
        Err(e) => {
            debug!("Direct parse failed: {}", e);
            StageOutcome::Fallthrough
        }
    }
}

/// Runs the fallback chain over the raw payload text.
///
/// The permissive stage itself cannot fail, but it only runs after both
/// structural strategies have; an empty result there means nothing in the
/// payload was recognizable, which is surfaced as an error rather than an
/// empty success.
pub fn recover_directory(raw: &str) -> Result<RecoveredDirectory, RecoveryError> {
    if let StageOutcome::Recovered { servers, dropped } = direct_parse(raw) {
        debug!("Successfully parsed JSON directly ({} servers)", servers.len());
        return Ok(RecoveredDirectory {
            servers,
            strategy: Strategy::Direct,
            dropped,
        });
    }

    if let StageOutcome::Recovered { servers, dropped } = entry::repair(raw) {
        debug!("Recovered {} servers via entry repair", servers.len());
        return Ok(RecoveredDirectory {
            servers,
            strategy: Strategy::EntryRepair,
            dropped,
        });
    }

    let (servers, dropped) = permissive::extract(raw);
    if servers.is_empty() {
        return Err(RecoveryError::Unrecoverable);
    }
    debug!("Recovered {} servers via permissive extraction", servers.len());
    Ok(RecoveredDirectory {
        servers,
        strategy: Strategy::Permissive,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::server::ServerEntry;

    const CLEAN: &str = r#"{"list servers":{"192.168.0.1:25565":{"modname":"default","hostname":"Balmora","query_port":25565,"players":3,"max_players":16,"version":"0.8.1"}}}"#;

    #[test]
    fn clean_document_uses_the_direct_path() {
        let recovered = recover_directory(CLEAN).unwrap();
        assert_eq!(recovered.strategy, Strategy::Direct);
        assert_eq!(recovered.dropped, 0);
        match &recovered.servers["192.168.0.1:25565"] {
            ServerEntry::Valid(record) => assert_eq!(record.version.as_deref(), Some("0.8.1")),
            other => panic!("expected Valid, got {:?}", other),
        }
    }

    #[test]
    fn locally_corrupt_document_uses_entry_repair() {
        let raw = r#"{"list servers":{"192.168.0.1:25565":{"modname":"default","hostname":"Balmora","query_port":25565,"players":3,"max_players":16},"192.168.0.2:25565":{"modname":"default","hostname":"Say "hi" here","query_port":25565,"players":1,"max_players":8}}}"#;
        let recovered = recover_directory(raw).unwrap();
        assert_eq!(recovered.strategy, Strategy::EntryRepair);
        assert_eq!(recovered.servers.len(), 1);
        assert_eq!(recovered.dropped, 1);
        assert!(!recovered.servers.contains_key("192.168.0.2:25565"));
    }

    #[test]
    fn structural_wreckage_uses_permissive_extraction() {
        // No wrapper anywhere; one balanced span with three probeable fields.
        let raw = r#"?? "8.8.8.8:25565": {"modname":"default" "hostname":"Caldera",,"players":5 !!} ??"#;
        let recovered = recover_directory(raw).unwrap();
        assert_eq!(recovered.strategy, Strategy::Permissive);
        assert_eq!(recovered.servers.len(), 1);
        assert!(recovered.servers.contains_key("8.8.8.8:25565"));
    }

    #[test]
    fn unrecognizable_payload_is_a_hard_error() {
        assert_eq!(
            recover_directory("<html>502 Bad Gateway</html>").unwrap_err(),
            RecoveryError::Unrecoverable
        );
    }

    #[test]
    fn valid_json_of_the_wrong_shape_is_not_an_empty_success() {
        assert!(recover_directory(r#"{"unexpected": true}"#).is_err());
    }
}
