// src/main.rs
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{clock::DefaultClock, RateLimiter};
use log::info;
use std::net::IpAddr;

use nerevar_web::config::Config;
use nerevar_web::handlers;
use nerevar_web::upstream::MasterClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger only once at the start
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    dotenv::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    // Get bind address and port from environment or use defaults
    let bind_address = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "80".to_string());
    let bind = format!("{}:{}", bind_address, port);

    let master_client = match MasterClient::new(&config) {
        Ok(client) => web::Data::new(client),
        Err(e) => {
            log::error!("Failed to build upstream HTTP client: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to build upstream HTTP client: {}", e),
            ));
        }
    };

    // Set up rate limiter for the server-list proxy using config
    let server_list_rate_limiter: web::Data<
        RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>,
    > = web::Data::new(RateLimiter::keyed(config.server_list_quota()));

    info!("Starting server on {}", bind);
    HttpServer::new(move || {
        App::new()
            .app_data(master_client.clone())
            .app_data(server_list_rate_limiter.clone())
            .configure(handlers::routes)
    })
    .bind(&bind)?
    .run()
    .await
}
