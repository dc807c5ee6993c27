//! Client side of the hosted BeautyBook backend.
//!
//! This crate provides:
//! - `Backend`: the contract the UI consumes (auth + table reads)
//! - `SupabaseClient`: HTTP implementation against the hosted backend
//! - `Query`: filter/order/embed description for table reads
//! - `SessionStore`: where the session tokens persist between page loads
//! - `MemoryBackend` (feature `test-util`): in-memory stand-in for tests

mod client;
mod config;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
mod query;
mod store;

pub use client::SupabaseClient;
pub use config::BackendConfig;
pub use query::{Order, Query};
#[cfg(target_arch = "wasm32")]
pub use store::BrowserStore;
pub use store::{MemoryStore, SessionStore, StoredSession, default_store};

use async_trait::async_trait;
use core_types::{Role, SignUpProfile};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from backend operations.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Credentials or sign-up data rejected; carries the backend's message.
    #[error("{0}")]
    Auth(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },
}

impl BackendError {
    /// Whether this is a credential-level rejection whose message may be
    /// shown to the user verbatim.
    pub fn is_credential(&self) -> bool {
        matches!(self, BackendError::Auth(_))
    }
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Identity returned by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// The hosted backend as seen by the UI.
///
/// Futures are not `Send`: the UI runs on a single-threaded event loop.
#[async_trait(?Send)]
pub trait Backend {
    /// Password sign-in. Starts a session on success.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser>;

    /// Register a new account with its profile fields. Does not sign in.
    async fn sign_up(&self, email: &str, password: &str, profile: &SignUpProfile) -> Result<()>;

    /// End the current session, if any.
    async fn sign_out(&self) -> Result<()>;

    /// Identity of the current session, if one is active.
    async fn current_user(&self) -> Result<Option<AuthUser>>;

    /// Authoritative role of a user, as resolved by the backend.
    async fn user_role(&self, user_id: Uuid) -> Result<Option<Role>>;

    /// Raw rows matching a query.
    async fn select_rows(&self, query: &Query) -> Result<Vec<serde_json::Value>>;
}

/// Read rows matching `query` and decode them.
pub async fn select<T, B>(backend: &B, query: &Query) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    B: Backend + ?Sized,
{
    let rows = backend.select_rows(query).await?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(BackendError::from))
        .collect()
}

/// Read the first row matching `query`, if any.
pub async fn select_single<T, B>(backend: &B, query: &Query) -> Result<Option<T>>
where
    T: DeserializeOwned,
    B: Backend + ?Sized,
{
    let query = query.clone().limit(1);
    let mut rows = select::<T, B>(backend, &query).await?;
    Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_credential_classification() {
        assert!(BackendError::Auth("Invalid login credentials".to_string()).is_credential());
        let status = BackendError::Status {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(!status.is_credential());
    }

    #[test]
    fn test_auth_error_displays_backend_message_verbatim() {
        let err = BackendError::Auth("User already registered".to_string());
        assert_eq!(err.to_string(), "User already registered");
    }

    #[tokio::test]
    async fn test_select_decodes_rows() {
        let backend = MemoryBackend::new();
        backend.insert_row("services", json!({ "name": "Corte" }));
        backend.insert_row("services", json!({ "name": "Escova" }));

        let rows: Vec<Named> = select(&backend, &Query::table("services").order_by("name"))
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Corte");
    }

    #[tokio::test]
    async fn test_select_single_on_empty_table() {
        let backend = MemoryBackend::new();

        let row: Option<Named> = select_single(&backend, &Query::table("studio_config"))
            .await
            .unwrap();

        assert!(row.is_none());
    }

    #[tokio::test]
    async fn test_select_reports_undecodable_rows() {
        let backend = MemoryBackend::new();
        backend.insert_row("services", json!({ "title": "no name column" }));

        let result = select::<Named, _>(&backend, &Query::table("services")).await;

        assert!(matches!(result, Err(BackendError::Json(_))));
    }
}
