mod api;
mod config;
mod server;
mod state;

use std::sync::Arc;

use taskboard_core::service::BoardService;
use taskboard_core::store::FileStore;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = config::config_path();
    let config = config::load_config(&config_path);

    let store = FileStore::new(&config.data_file);
    let state = AppState {
        service: Arc::new(BoardService::new(Box::new(store))),
    };

    if let Err(e) = server::serve(state, &config).await {
        log::error!("[taskboard.server] Fatal: {}", e);
        std::process::exit(1);
    }
}
