//! Shared runtime application state (HTTP handlers)

use std::sync::Arc;

use crate::store::Store;

/// Application state shared across handlers.
///
/// Holds only the read-only store handle; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}
