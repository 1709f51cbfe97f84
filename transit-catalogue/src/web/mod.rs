//! HTTP surface: answers stat requests against a loaded catalogue.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
