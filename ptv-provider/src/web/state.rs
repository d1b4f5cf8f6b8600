//! Application state for the web layer.

use std::sync::Arc;

use crate::ptv::{PtvClient, ReqwestTransport};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// PTV timetable client
    pub ptv: Arc<PtvClient<ReqwestTransport>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(ptv: PtvClient<ReqwestTransport>) -> Self {
        Self { ptv: Arc::new(ptv) }
    }
}
