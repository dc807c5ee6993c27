//! Session provider.
//!
//! Owns the auth state `{user, role, loading}` and is the only writer of it.
//! Consumers read a snapshot or subscribe to changes through a watch channel.

use std::rc::Rc;

use backend::{AuthUser, Backend};
use core_types::{Role, SignUpProfile};
use tokio::sync::watch;

/// Auth state as seen by gates and views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    /// Role resolved by the backend for `user`
    pub role: Option<Role>,
    /// Identity resolution in flight
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            role: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Signed in with one of `roles`.
    pub fn has_role_in(&self, roles: &[Role]) -> bool {
        self.user.is_some() && self.role.is_some_and(|role| roles.contains(&role))
    }
}

/// Current identity and the operations that change it.
pub struct Session {
    backend: Rc<dyn Backend>,
    state: watch::Sender<AuthState>,
}

impl Session {
    pub fn new(backend: Rc<dyn Backend>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self { backend, state }
    }

    /// The data collaborator, for views that read tables.
    pub fn backend(&self) -> Rc<dyn Backend> {
        Rc::clone(&self.backend)
    }

    /// Snapshot of the auth state.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change. Dropping it unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Restore a persisted session, if any, and finish loading.
    pub async fn initialize(&self) {
        let user = match self.backend.current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "failed to restore session");
                None
            }
        };

        let role = match &user {
            Some(user) => self.resolve_role(user).await,
            None => None,
        };

        self.state.send_modify(|state| {
            state.user = user;
            state.role = role;
            state.loading = false;
        });
    }

    /// Password sign-in.
    ///
    /// The previous role is dropped before the backend is asked, so a new
    /// identity is never paired with the old identity's role. If the attempt
    /// fails the backend keeps the previous session, and that identity's role
    /// is looked up again.
    pub async fn sign_in(&self, email: &str, password: &str) -> backend::Result<()> {
        let previous = self.state.borrow().user.clone();
        self.state.send_if_modified(|state| state.role.take().is_some());

        let user = match self.backend.sign_in(email, password).await {
            Ok(user) => user,
            Err(e) => {
                if let Some(previous) = previous {
                    self.restore_role(&previous).await;
                }
                return Err(e);
            }
        };
        let role = self.resolve_role(&user).await;
        tracing::info!(role = ?role, "signed in");

        self.state.send_modify(|state| {
            state.user = Some(user);
            state.role = role;
        });
        Ok(())
    }

    /// Register a new account. Does not change the current identity.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: &SignUpProfile,
    ) -> backend::Result<()> {
        self.backend.sign_up(email, password, profile).await?;
        tracing::info!("account created");
        Ok(())
    }

    /// End the session. Local state is cleared even if the backend call
    /// fails.
    pub async fn sign_out(&self) -> backend::Result<()> {
        let result = self.backend.sign_out().await;
        self.state.send_modify(|state| {
            state.user = None;
            state.role = None;
        });
        result
    }

    async fn restore_role(&self, user: &AuthUser) {
        let role = self.resolve_role(user).await;
        self.state.send_if_modified(|state| {
            if state.user.as_ref() != Some(user) || state.role == role {
                return false;
            }
            state.role = role;
            true
        });
    }

    async fn resolve_role(&self, user: &AuthUser) -> Option<Role> {
        match self.backend.user_role(user.id).await {
            Ok(role) => role,
            Err(e) => {
                tracing::error!(error = %e, "failed to resolve user role");
                None
            }
        }
    }
}
