//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use points_tracker_core::ports::{CredentialService, PointsService, SessionService};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// Handlers and middleware only see the ports, so tests can swap the
/// file-backed adapters for in-memory ones without touching the web layer.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialService>,
    pub points: Arc<dyn PointsService>,
    pub sessions: Arc<dyn SessionService>,
    pub config: Arc<Config>,
}
