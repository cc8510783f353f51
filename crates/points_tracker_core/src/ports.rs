//! crates/points_tracker_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of how credentials, points and sessions are
//! actually stored. Tests substitute in-memory fakes; the service wires up
//! file-backed adapters.

use crate::domain::{AppUser, PointsRecord, UserIdentity};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors of the backing storage.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Access to the static credential list.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Checks a username/password pair against the credential list.
    /// Returns `PortError::Unauthorized` for an unknown username or a wrong
    /// password; callers cannot tell the two apart.
    async fn authenticate(&self, username: &str, password: &str) -> PortResult<AppUser>;
}

/// Access to the single shared points record.
#[async_trait]
pub trait PointsService: Send + Sync {
    /// The current record, or the empty default if nothing was stored yet.
    async fn get_points(&self) -> PortResult<PointsRecord>;

    /// Replaces the stored record wholesale (no merge semantics) and returns
    /// what was stored.
    async fn replace_points(&self, points: PointsRecord) -> PortResult<PointsRecord>;

    /// Empties both point sequences, preserving goals and savings, and
    /// returns the resulting record.
    async fn reset_points(&self) -> PortResult<PointsRecord>;
}

/// Server-side login sessions, keyed by an opaque token.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Establishes a session for an authenticated identity and returns the
    /// opaque token the client holds in its cookie.
    async fn create_session(&self, identity: UserIdentity) -> PortResult<String>;

    /// Looks up a session. `Ok(None)` means the token is unknown or expired.
    async fn resolve_session(&self, token: &str) -> PortResult<Option<UserIdentity>>;

    /// Removes a session. Destroying an unknown token is a success; only an
    /// infrastructure failure is an error.
    async fn destroy_session(&self, token: &str) -> PortResult<()>;
}
