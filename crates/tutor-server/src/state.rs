//! Application State

use std::sync::Arc;

use tutor_core::ChatGateway;
use tutor_quiz::DailyProgress;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Chat gateway the study helper proxies to
    pub gateway: Arc<dyn ChatGateway>,

    /// Daily answer record (date-gated singleton)
    pub progress: Arc<DailyProgress>,
}
