use std::sync::Arc;

use static_cors_server::config::{AppState, Config};
use static_cors_server::logger;
use static_cors_server::server::{self, Server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // One thread: connections are local tasks on this runtime
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(cfg)?);
    let server = Server::bind(Arc::clone(&state))?;

    logger::log_server_start(&server.local_addr()?, &state.base_dir);

    let local = tokio::task::LocalSet::new();
    local
        .run_until(server.run_until(server::shutdown_signal()))
        .await?;

    Ok(())
}
