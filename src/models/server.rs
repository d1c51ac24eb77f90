// src/models/server.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One master-server listing that passed strict field validation.
/// Field names follow the upstream wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerRecord {
    pub modname: String,
    pub hostname: String,
    pub query_port: u16,
    pub players: u32,
    pub max_players: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passw: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<u64>,
}

/// Listing assembled field-by-field by the permissive extractor.
/// Nothing here is guaranteed; acceptance is decided by `recovered_fields`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestEffortRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passw: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<u64>,
}

impl BestEffortRecord {
    pub fn recovered_fields(&self) -> usize {
        [
            self.modname.is_some(),
            self.hostname.is_some(),
            self.query_port.is_some(),
            self.players.is_some(),
            self.max_players.is_some(),
            self.version.is_some(),
            self.passw.is_some(),
            self.last_update.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

/// A directory entry together with how much validation it survived.
/// Deserialization tries the variants in order: entries that satisfy the
/// strict field set become `Valid`, any other well-formed object is passed
/// through unchanged as `Unchecked`. `BestEffort` is only ever built by the
/// permissive extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerEntry {
    Valid(ServerRecord),
    Unchecked(Map<String, Value>),
    BestEffort(BestEffortRecord),
}

/// Mapping from `ip:port` key to the recovered listing.
pub type ServerDirectory = BTreeMap<String, ServerEntry>;

/// Wire shape of the upstream master-server document.
#[derive(Debug, Deserialize)]
pub struct UpstreamEnvelope {
    #[serde(rename = "list servers")]
    pub list_servers: ServerDirectory,
}
