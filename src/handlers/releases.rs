// src/handlers/releases.rs
use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::utils::ApiError;

const LATEST_NEREVAR_WINDOWS_RELEASE: &str =
    "https://github.com/kyaustad/Nerevar/releases/download/0.2.0/Nerevar.exe";

const LATEST_TES3MP_WINDOWS_RELEASE: &str =
    "https://github.com/TES3MP/TES3MP/releases/download/tes3mp-0.8.1/tes3mp.Win64.release.0.8.1.zip";

#[derive(Debug, Serialize)]
pub struct ReleaseInfo {
    pub url: &'static str,
    pub version: &'static str,
}

pub fn lookup_release(product: &str) -> Option<ReleaseInfo> {
    match product {
        "nerevar" => Some(ReleaseInfo {
            url: LATEST_NEREVAR_WINDOWS_RELEASE,
            version: "0.2.0",
        }),
        "tes3mp" => Some(ReleaseInfo {
            url: LATEST_TES3MP_WINDOWS_RELEASE,
            version: "0.8.1",
        }),
        _ => None,
    }
}

pub async fn get_release(path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let product = path.into_inner();
    match lookup_release(&product) {
        Some(release) => Ok(HttpResponse::Ok().json(release)),
        None => Err(ApiError::UnknownProduct(product)),
    }
}
