//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::requests::RequestHandler;

/// Shared application state.
///
/// Route queries fill the router's shortest-path cache, so the handler
/// sits behind an async lock and requests are answered one batch at a time.
/// The batch itself runs on the blocking pool.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<Mutex<RequestHandler>>,
}

impl AppState {
    pub fn new(handler: RequestHandler) -> Self {
        Self {
            handler: Arc::new(Mutex::new(handler)),
        }
    }
}
