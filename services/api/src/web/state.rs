//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use reflection_core::analysis::TextSignalAnalyzer;
use reflection_core::journal::Journal;
use reflection_core::ports::{Clock, EmailService};
use reflection_core::sharing::ShareService;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub journal: Arc<Journal>,
    pub shares: Arc<ShareService>,
    pub analyzer: Arc<TextSignalAnalyzer>,
    pub email: Arc<dyn EmailService>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<Config>,
}
