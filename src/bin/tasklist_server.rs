//! Entry point for the task HTTP API server.

use tasklist::{config::Settings, server, telemetry};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let settings = Settings::load()?;
    telemetry::init(&settings.telemetry)?;
    server::run(settings).await
}
