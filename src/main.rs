use crate::app::App;
use crate::config::load_settings;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod backend;
mod browser;
mod config;
mod errors;
mod responses;
mod router;
mod sessions;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("listing_browser=info")),
        )
        .init();

    // 1️⃣ Settings: defaults < listing_browser.toml < LISTING_* env
    let settings = load_settings();

    // 2️⃣ Backend client + session table
    let app = match App::from_settings(&settings) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "could not set up backend client");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    let addr: SocketAddr = match settings.bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(bind_addr = %settings.bind_addr, error = %e, "invalid bind address");
            std::process::exit(1);
        }
    };
    info!(
        %addr,
        backend = %settings.backend_url,
        style = ?settings.endpoint_style,
        export = ?settings.export_mode(),
        "starting listing browser"
    );

    let server = Server::bind(addr).max_workers(settings.max_workers);

    // 4️⃣ Serve requests, passing the app into the closure
    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => responses::html_error_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down");
}
