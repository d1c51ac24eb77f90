// src/utils.rs
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::net::IpAddr;

#[derive(Debug)]
pub enum ApiError {
    MissingPeerIP,
    UpstreamUnavailable(String),
    UnparsableServerData,
    RateLimitExceeded,
    UnknownProduct(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPeerIP => write!(f, "Failed to extract client IP"),
            Self::UpstreamUnavailable(msg) => write!(f, "{}", msg),
            Self::UnparsableServerData => {
                write!(f, "Unable to parse server data from external API")
            }
            Self::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            Self::UnknownProduct(product) => write!(f, "Unknown product: {}", product),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    timestamp: String,
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
            timestamp: now_rfc3339(),
        };
        match self {
            Self::RateLimitExceeded => HttpResponse::TooManyRequests().json(body),
            Self::UnknownProduct(_) => HttpResponse::NotFound().json(body),
            Self::MissingPeerIP => HttpResponse::BadRequest().json(body),
            _ => HttpResponse::InternalServerError().json(body),
        }
    }
}

/// Millisecond-precision UTC timestamp, `2026-01-02T03:04:05.678Z` form.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn extract_real_ip(req: &HttpRequest) -> Result<IpAddr, ApiError> {
    // Check X-Forwarded-For first, set by the fronting proxy.
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(ip_str) = forwarded_for.to_str() {
            if let Some(first_ip) = ip_str.split(',').next() {
                if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                    return Ok(ip);
                }
            }
        }
    }

    match req.peer_addr() {
        Some(addr) => Ok(addr.ip()),
        None => Err(ApiError::MissingPeerIP),
    }
}
