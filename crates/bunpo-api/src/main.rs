//! Bunpo API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p bunpo-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use bunpo_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Tracing goes first so configuration warnings are not lost
    let env = Environment::from_env();
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        addr = %config.server.address(),
        "Configuration loaded"
    );

    if let Err(e) = bunpo_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
