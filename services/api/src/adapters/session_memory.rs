//! services/api/src/adapters/session_memory.rs
//!
//! This module contains the in-memory session adapter, which is the concrete
//! implementation of the `SessionService` port from the `core` crate. Tokens
//! are opaque UUIDs mapped to the identity that logged in; restarting the
//! process logs everyone out, which is acceptable for a household service.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use points_tracker_core::domain::UserIdentity;
use points_tracker_core::ports::{PortResult, SessionService};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An in-memory adapter that implements the `SessionService` port.
pub struct MemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

struct SessionEntry {
    identity: UserIdentity,
    expires_at: DateTime<Utc>,
}

/// The longest TTL the store accepts: one century, which is "no expiry" for
/// any practical purpose. Anything larger risks overflowing the chrono
/// duration/datetime arithmetic in `create_session`.
const MAX_TTL_SECS: i64 = 100 * 365 * 24 * 60 * 60;

impl MemorySessionStore {
    /// Creates a new `MemorySessionStore` whose sessions live for `ttl_secs`
    /// after creation. TTLs beyond a century are capped, never wrapped into
    /// the past.
    pub fn new(ttl_secs: u64) -> Self {
        let secs = i64::try_from(ttl_secs)
            .unwrap_or(MAX_TTL_SECS)
            .min(MAX_TTL_SECS);
        Self {
            ttl: Duration::seconds(secs),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

//=========================================================================================
// `SessionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl SessionService for MemorySessionStore {
    async fn create_session(&self, identity: UserIdentity) -> PortResult<String> {
        let token = Uuid::new_v4().to_string();
        let entry = SessionEntry {
            identity,
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.write().await.insert(token.clone(), entry);
        Ok(token)
    }

    async fn resolve_session(&self, token: &str) -> PortResult<Option<UserIdentity>> {
        // Fast path: a read lock is enough for the common case of a live
        // session.
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(entry) if entry.expires_at > Utc::now() => {
                    return Ok(Some(entry.identity.clone()));
                }
                Some(_) => {} // expired, fall through to remove it
                None => return Ok(None),
            }
        }

        // The entry expired; take the write lock to drop it lazily.
        self.sessions.write().await.remove(token);
        Ok(None)
    }

    async fn destroy_session(&self, token: &str) -> PortResult<()> {
        // Removing an unknown token is fine: logout is idempotent.
        self.sessions.write().await.remove(token);
        Ok(())
    }
}
