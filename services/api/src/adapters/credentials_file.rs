//! services/api/src/adapters/credentials_file.rs
//!
//! This module contains the credential-list adapter, which is the concrete
//! implementation of the `CredentialService` port from the `core` crate. The
//! list is read once from a JSON file at startup and held in memory; there is
//! no registration flow, so it never changes while the process runs.

use async_trait::async_trait;
use points_tracker_core::domain::{AppUser, Child, Role};
use points_tracker_core::ports::{CredentialService, PortError, PortResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::info;

/// The file name under the data directory that holds the credential list.
const CREDENTIALS_FILE: &str = "credentials.json";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A file-backed adapter that implements the `CredentialService` port.
#[derive(Clone)]
pub struct FileCredentialStore {
    users: Vec<AppUser>,
}

impl FileCredentialStore {
    /// Loads the credential list from the data directory.
    ///
    /// A missing file is seeded with the default household accounts so a
    /// fresh deployment works out of the box. A file that exists but does not
    /// parse is an error: silently replacing it would throw away whatever
    /// passwords were set, so startup fails instead.
    pub async fn load(data_dir: &Path) -> PortResult<Self> {
        let path = data_dir.join(CREDENTIALS_FILE);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No credentials file found, seeding the default household accounts");
                let users = default_users();
                let record = CredentialsFileRecord::from_domain(&users);
                let json = serde_json::to_string_pretty(&record)
                    .map_err(|e| PortError::Unexpected(e.to_string()))?;
                fs::create_dir_all(data_dir)
                    .await
                    .map_err(|e| PortError::Unexpected(e.to_string()))?;
                fs::write(&path, json)
                    .await
                    .map_err(|e| PortError::Unexpected(e.to_string()))?;
                return Ok(Self { users });
            }
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };

        let record: CredentialsFileRecord = serde_json::from_slice(&bytes).map_err(|e| {
            PortError::Unexpected(format!(
                "Credentials file {} is not valid: {}",
                path.display(),
                e
            ))
        })?;
        let users: Vec<AppUser> = record.users.into_iter().map(|u| u.to_domain()).collect();
        info!(count = users.len(), "Loaded credential records");
        Ok(Self { users })
    }
}

/// The accounts written to a fresh data directory: one admin for the parents
/// and one scoped viewer per child.
fn default_users() -> Vec<AppUser> {
    vec![
        AppUser {
            username: "parent".to_string(),
            password: "parent123".to_string(),
            role: Role::Admin,
            child_view: None,
        },
        AppUser {
            username: "adrian".to_string(),
            password: "adrian123".to_string(),
            role: Role::Viewer,
            child_view: Some(Child::Adrian),
        },
        AppUser {
            username: "emma".to_string(),
            password: "emma123".to_string(),
            role: Role::Viewer,
            child_view: Some(Child::Emma),
        },
    ]
}

//=========================================================================================
// "Impure" File Record Structs
//=========================================================================================

#[derive(Serialize, Deserialize)]
struct CredentialsFileRecord {
    users: Vec<UserRecord>,
}

impl CredentialsFileRecord {
    fn from_domain(users: &[AppUser]) -> Self {
        Self {
            users: users.iter().map(UserRecord::from_domain).collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct UserRecord {
    username: String,
    password: String,
    role: RoleRecord,
    #[serde(rename = "childView", default, skip_serializing_if = "Option::is_none")]
    child_view: Option<ChildRecord>,
}

impl UserRecord {
    fn to_domain(self) -> AppUser {
        AppUser {
            username: self.username,
            password: self.password,
            role: self.role.to_domain(),
            child_view: self.child_view.map(|c| c.to_domain()),
        }
    }

    fn from_domain(user: &AppUser) -> Self {
        Self {
            username: user.username.clone(),
            password: user.password.clone(),
            role: RoleRecord::from_domain(user.role),
            child_view: user.child_view.map(ChildRecord::from_domain),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RoleRecord {
    Admin,
    Viewer,
}

impl RoleRecord {
    fn to_domain(self) -> Role {
        match self {
            RoleRecord::Admin => Role::Admin,
            RoleRecord::Viewer => Role::Viewer,
        }
    }

    fn from_domain(role: Role) -> Self {
        match role {
            Role::Admin => RoleRecord::Admin,
            Role::Viewer => RoleRecord::Viewer,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ChildRecord {
    Adrian,
    Emma,
}

impl ChildRecord {
    fn to_domain(self) -> Child {
        match self {
            ChildRecord::Adrian => Child::Adrian,
            ChildRecord::Emma => Child::Emma,
        }
    }

    fn from_domain(child: Child) -> Self {
        match child {
            Child::Adrian => ChildRecord::Adrian,
            Child::Emma => ChildRecord::Emma,
        }
    }
}

//=========================================================================================
// `CredentialService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CredentialService for FileCredentialStore {
    async fn authenticate(&self, username: &str, password: &str) -> PortResult<AppUser> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
            .ok_or(PortError::Unauthorized)
    }
}
