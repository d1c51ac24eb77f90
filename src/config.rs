// src/config.rs
use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use governor::Quota;

#[derive(Clone)]
pub struct Config {
    // Upstream master server
    pub master_server_url: String,
    pub fetch_timeout_secs: u64,

    // Rate limiting for the server-list proxy
    pub server_list_period_secs: u64,
    pub server_list_burst_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            master_server_url: "http://master.tes3mp.com:8081/api/servers".to_string(),
            fetch_timeout_secs: 10,
            server_list_period_secs: 5,
            server_list_burst_limit: 120,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            master_server_url: env::var("MASTER_SERVER_URL")
                .unwrap_or_else(|_| "http://master.tes3mp.com:8081/api/servers".to_string()),

            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            server_list_period_secs: env::var("SERVER_LIST_PERIOD_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),

            server_list_burst_limit: env::var("SERVER_LIST_BURST_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
        }
    }

    pub fn server_list_quota(&self) -> Quota {
        Quota::with_period(Duration::from_secs(self.server_list_period_secs))
            .unwrap()
            .allow_burst(NonZeroU32::new(self.server_list_burst_limit).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_tes3mp_master() {
        let config = Config::default();
        assert!(config.master_server_url.contains("master.tes3mp.com"));
        assert_eq!(config.fetch_timeout_secs, 10);
        // Quota construction must not panic with the defaults.
        let _ = config.server_list_quota();
    }
}
