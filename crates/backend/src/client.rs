//! HTTP client for the hosted backend.

use async_trait::async_trait;
use core_types::{Role, SignUpProfile};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{SessionStore, StoredSession, default_store};
use crate::{AuthUser, Backend, BackendConfig, BackendError, Query, Result};

/// Request body for the password grant.
#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

/// Request body for the refresh-token grant.
#[derive(Debug, Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

/// Request body for /auth/v1/signup.
#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    /// Copied into the new user's metadata, from which the profile row is built
    data: &'a SignUpProfile,
}

/// Request body for the role lookup RPC.
#[derive(Debug, Serialize)]
struct RoleLookup {
    user_uuid: Uuid,
}

/// Response from the password and refresh-token grants.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: AuthUser,
}

impl TokenResponse {
    fn session(&self) -> StoredSession {
        StoredSession {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

/// Error body shapes used by the auth and table endpoints.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn message_from(body: &str, fallback: &str) -> String {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        parsed
            .error_description
            .or(parsed.msg)
            .or(parsed.message)
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Client for the hosted backend's auth and table endpoints.
pub struct SupabaseClient {
    config: BackendConfig,
    client: reqwest::Client,
    store: Box<dyn SessionStore>,
}

impl SupabaseClient {
    /// Create a new client with the given config, keeping the session in the
    /// platform's default store.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            store: default_store(),
        }
    }

    /// Create a client whose session lives in `store`. A session already in
    /// the store is picked up.
    pub fn with_store(config: BackendConfig, store: impl SessionStore + 'static) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            store: Box::new(store),
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn stored(&self) -> Option<StoredSession> {
        self.store.load()
    }

    fn persist(&self, session: Option<StoredSession>) {
        self.store.save(session.as_ref());
    }

    /// Request with the API key, authorized as the signed-in user when there
    /// is one and as the anonymous role otherwise.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let token = self
            .stored()
            .map(|s| s.access_token)
            .unwrap_or_else(|| self.config.anon_key.clone());
        self.request_as(method, path, &token)
    }

    fn request_as(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.client
            .request(method, self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }

    /// Trade the refresh token for a new token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<()> {
        let response = self
            .request_as(Method::POST, "/auth/v1/token", &self.config.anon_key)
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshGrant { refresh_token })
            .send()
            .await?;

        let token: TokenResponse = Self::read_auth(response).await?;
        self.persist(Some(token.session()));
        tracing::debug!("session refreshed");
        Ok(())
    }

    async fn fetch_user(&self) -> Result<Option<AuthUser>> {
        let response = self.request(Method::GET, "/auth/v1/user").send().await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        Self::read_auth(response).await.map(Some)
    }

    /// Decode an auth endpoint response. Client errors are credential errors
    /// and keep the backend's message.
    async fn read_auth<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let message = ErrorBody::message_from(&body, status.as_str());
        if status.is_client_error() {
            Err(BackendError::Auth(message))
        } else {
            Err(BackendError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Decode a table or RPC endpoint response.
    async fn read_rest<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        Err(BackendError::Status {
            status: status.as_u16(),
            message: ErrorBody::message_from(&body, status.as_str()),
        })
    }
}

#[async_trait(?Send)]
impl Backend for SupabaseClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser> {
        tracing::debug!("password sign-in");

        let response = self
            .request(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password })
            .send()
            .await?;

        let token: TokenResponse = Self::read_auth(response).await?;
        self.persist(Some(token.session()));

        Ok(token.user)
    }

    async fn sign_up(&self, email: &str, password: &str, profile: &SignUpProfile) -> Result<()> {
        tracing::debug!("sign-up");

        let response = self
            .request(Method::POST, "/auth/v1/signup")
            .json(&SignUpRequest {
                email,
                password,
                data: profile,
            })
            .send()
            .await?;

        // The body is either the new user or a session, depending on whether
        // email confirmation is enabled. Neither starts a session here.
        Self::read_auth::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        if self.stored().is_none() {
            return Ok(());
        }

        let result = self.request(Method::POST, "/auth/v1/logout").send().await;
        self.persist(None);

        let response = result?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "logout rejected; local session cleared");
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<AuthUser>> {
        let Some(stored) = self.stored() else {
            return Ok(None);
        };

        if let Some(user) = self.fetch_user().await? {
            return Ok(Some(user));
        }

        // Access token expired; one refresh, then one retry
        let refreshed = match stored.refresh_token.as_deref() {
            Some(refresh_token) => match self.refresh(refresh_token).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!(error = %e, "session refresh rejected");
                    false
                }
            },
            None => false,
        };
        let user = if refreshed { self.fetch_user().await? } else { None };

        if user.is_none() {
            tracing::debug!("stored session expired");
            self.persist(None);
        }
        Ok(user)
    }

    async fn user_role(&self, user_id: Uuid) -> Result<Option<Role>> {
        let response = self
            .request(Method::POST, "/rest/v1/rpc/get_user_role")
            .json(&RoleLookup { user_uuid: user_id })
            .send()
            .await?;

        Self::read_rest(response).await
    }

    async fn select_rows(&self, query: &Query) -> Result<Vec<serde_json::Value>> {
        tracing::debug!(table = query.table_name(), "select");

        let path = format!("/rest/v1/{}", query.table_name());
        let response = self
            .request(Method::GET, &path)
            .query(&query.to_params())
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::read_rest(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_password_grant_serialization() {
        let grant = PasswordGrant {
            email: "ana@studio.com",
            password: "secret",
        };

        let json = serde_json::to_string(&grant).unwrap();
        assert!(json.contains("\"email\":\"ana@studio.com\""));
        assert!(json.contains("\"password\":\"secret\""));
    }

    #[test]
    fn test_sign_up_request_nests_profile_under_data() {
        let profile = SignUpProfile {
            name: "Ana".to_string(),
            phone: Some("(11) 98765-4321".to_string()),
            role: None,
        };
        let request = SignUpRequest {
            email: "ana@studio.com",
            password: "secret",
            data: &profile,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["data"]["name"], "Ana");
        assert_eq!(json["data"]["phone"], "(11) 98765-4321");
        assert!(json["data"].get("role").is_none());
    }

    #[test]
    fn test_token_response_deserialization() {
        let json = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": { "id": "7b0c0a3e-2f1d-4c55-9a7e-3f2d9d2b8c11", "email": "ana@studio.com" }
        }"#;

        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "jwt");
        assert_eq!(token.session().refresh_token.as_deref(), Some("refresh"));
        assert_eq!(token.user.email.as_deref(), Some("ana@studio.com"));
    }

    #[test]
    fn test_error_body_message_variants() {
        let grant = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(ErrorBody::message_from(grant, "400"), "Invalid login credentials");

        let signup = r#"{"code":422,"msg":"User already registered"}"#;
        assert_eq!(ErrorBody::message_from(signup, "422"), "User already registered");

        let rest = r#"{"code":"42P01","message":"relation \"banners\" does not exist"}"#;
        assert_eq!(
            ErrorBody::message_from(rest, "404"),
            "relation \"banners\" does not exist"
        );

        assert_eq!(ErrorBody::message_from("<html>", "502"), "502");
    }

    #[test]
    fn test_refresh_grant_serialization() {
        let json = serde_json::to_value(RefreshGrant {
            refresh_token: "refresh",
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "refresh_token": "refresh" }));
    }

    #[test]
    fn test_second_client_picks_up_stored_session() {
        let store = MemoryStore::new();
        let first = SupabaseClient::with_store(BackendConfig::default(), store.clone());
        let json = r#"{
            "access_token": "jwt",
            "refresh_token": "refresh",
            "user": { "id": "7b0c0a3e-2f1d-4c55-9a7e-3f2d9d2b8c11", "email": "ana@studio.com" }
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        first.persist(Some(token.session()));

        let reloaded = SupabaseClient::with_store(BackendConfig::default(), store);

        let stored = reloaded.stored().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("refresh"));
        let request = reloaded
            .request(Method::GET, "/auth/v1/user")
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer jwt"
        );
    }

    #[test]
    fn test_anonymous_requests_use_anon_key() {
        let config = BackendConfig {
            anon_key: "anon".to_string(),
            ..BackendConfig::default()
        };
        let client = SupabaseClient::with_store(config, MemoryStore::new());

        let request = client.request(Method::GET, "/rest/v1/services").build().unwrap();

        assert_eq!(request.headers().get("apikey").unwrap(), "anon");
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer anon"
        );
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_auth_logs_leave_out_email() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        // Nothing listens on the discard port; only the log lines matter
        let config = BackendConfig {
            url: "http://127.0.0.1:9".to_string(),
            ..BackendConfig::default()
        };
        let client = SupabaseClient::with_store(config, MemoryStore::new());

        let _ = client.sign_in("ana@studio.com", "secret").await;
        let _ = client
            .sign_up("ana@studio.com", "secret", &SignUpProfile::default())
            .await;

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("password sign-in"));
        assert!(logs.contains("sign-up"));
        assert!(!logs.contains("ana@studio.com"));
    }

    #[test]
    fn test_client_creation_has_no_session() {
        let client = SupabaseClient::new(BackendConfig::default());
        assert!(client.stored().is_none());
        assert_eq!(client.config().url, "http://localhost:54321");
    }

    #[tokio::test]
    async fn test_sign_out_without_session_is_noop() {
        let client = SupabaseClient::new(BackendConfig::default());
        assert!(client.sign_out().await.is_ok());
        assert_eq!(client.current_user().await.unwrap(), None);
    }

    // Requires a running backend with BEAUTYBOOK_* variables set
    #[tokio::test]
    #[ignore]
    async fn test_services_read_integration() {
        let client = SupabaseClient::new(BackendConfig::from_env());

        let rows = client
            .select_rows(&Query::table("services").eq("is_active", true).order_by("name"))
            .await
            .unwrap();
        println!("Active services: {}", rows.len());
    }
}
