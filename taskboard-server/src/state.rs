/// Shared application state passed to axum handlers.

use std::sync::Arc;
use taskboard_core::service::BoardService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BoardService>,
}
