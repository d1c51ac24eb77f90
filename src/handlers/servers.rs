// src/handlers/servers.rs
use actix_web::{web, HttpRequest, HttpResponse};
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{clock::DefaultClock, RateLimiter};
use log::{debug, error};
use serde::Serialize;
use std::net::IpAddr;

use crate::models::server::ServerDirectory;
use crate::recovery::{recover_directory, Strategy};
use crate::upstream::{MasterClient, RawPayload};
use crate::utils::{extract_real_ip, now_rfc3339, ApiError};

/// Present only when a repair strategy produced the result, so callers can
/// tell a clean parse from a best-effort one.
#[derive(Debug, Serialize)]
pub struct RecoveryInfo {
    pub strategy: Strategy,
    pub dropped_entries: usize,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: ServerDirectory,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<RecoveryInfo>,
}

pub async fn list_servers(
    req: HttpRequest,
    master: web::Data<MasterClient>,
    rate_limiter: web::Data<RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>>,
) -> Result<HttpResponse, ApiError> {
    let peer_ip = extract_real_ip(&req)?;

    // Rate Limiting
    if !rate_limiter.check_key(&peer_ip).is_ok() {
        error!("Rate limit exceeded for server list for ip: {}", peer_ip);
        return Err(ApiError::RateLimitExceeded);
    }

    let payload = master.fetch_raw().await?;
    let response = build_list_response(&payload)?;
    Ok(HttpResponse::Ok().json(response))
}

/// Pure assembly of the success envelope from a raw upstream payload. The
/// network transport stops at `RawPayload`; everything here is synchronous
/// and covered by the integration tests.
pub fn build_list_response(payload: &RawPayload) -> Result<ListResponse, ApiError> {
    if !payload.is_success() {
        error!("External API returned {}", payload.status);
        return Err(ApiError::UpstreamUnavailable(format!(
            "External API returned {}",
            payload.status
        )));
    }

    let recovered = recover_directory(&payload.body).map_err(|e| {
        error!("Error parsing server list: {}", e);
        ApiError::UnparsableServerData
    })?;

    debug!(
        "Successfully parsed {} servers via {:?} ({} dropped)",
        recovered.servers.len(),
        recovered.strategy,
        recovered.dropped
    );

    let recovery = match recovered.strategy {
        Strategy::Direct => None,
        strategy => Some(RecoveryInfo {
            strategy,
            dropped_entries: recovered.dropped,
        }),
    };

    Ok(ListResponse {
        success: true,
        data: recovered.servers,
        timestamp: now_rfc3339(),
        recovery,
    })
}
