// src/handlers/mod.rs
pub mod index;
pub mod releases;
pub mod servers;

use actix_web::web;

/// Route table, shared by `main` and the handler tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index::landing))
        .route("/index.html", web::get().to(index::landing))
        .route("/api/v1/servers/list", web::get().to(servers::list_servers))
        .route("/api/v1/releases/{product}", web::get().to(releases::get_release));
}
