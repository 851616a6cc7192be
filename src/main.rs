use crate::api::HttpListingsApi;
use crate::config::AppConfig;
use crate::router::{handle, AppState};
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod auth;
mod config;
mod domain;
mod errors;
mod locale;
mod responses;
mod router;
mod search;
mod session;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marina_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::process::exit(1);
    });

    let api = HttpListingsApi::new(cfg.api_base_url.clone(), cfg.request_timeout)
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "could not build the backend client");
            std::process::exit(1);
        });

    let state = AppState::new(Arc::new(api), &cfg);

    tracing::info!(
        addr = %cfg.bind_addr,
        api = %cfg.api_base_url,
        workers = cfg.max_workers,
        "Starting server",
    );

    let server = Server::bind(&cfg.bind_addr).max_workers(cfg.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => responses::html_error_response(err),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("Server shut down cleanly.");
}
