use std::sync::Arc;

use crate::assistant::Assistant;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The AI facade. Holds the shared embedder and the inference client.
    pub assistant: Arc<Assistant>,
}
