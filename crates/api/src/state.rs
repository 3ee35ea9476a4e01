use std::sync::Arc;

use presurvey_core::submission::RowAppender;

use crate::page::Templates;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Destination of submitted rows (the opened worksheet in production).
    pub appender: Arc<dyn RowAppender>,
    /// Compiled page templates.
    pub templates: Arc<Templates>,
}
