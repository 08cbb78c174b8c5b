//! Application state.

use std::time::Instant;

use vizzio_core::Hub;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub hub: Hub,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(hub: Hub) -> Self {
        Self {
            hub,
            started_at: Instant::now(),
        }
    }
}
