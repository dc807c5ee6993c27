//! Gates decide between the loading indicator, the auth form and the shell.

use core_types::Role;

use crate::router::{ClientSection, Outlet};
use crate::session::AuthState;

/// What a gate renders. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateView {
    Loading,
    AuthForm,
    Shell,
}

/// Gate in front of the admin shell. The shell requires sign-in.
pub struct AdminGate;

impl AdminGate {
    pub const AUTHORIZED: &'static [Role] = &[Role::Admin, Role::Professional];

    pub fn view(state: &AuthState) -> GateView {
        if state.loading {
            GateView::Loading
        } else if state.has_role_in(Self::AUTHORIZED) {
            GateView::Shell
        } else {
            GateView::AuthForm
        }
    }
}

/// Gate in front of the client shell.
///
/// Guests may browse the shell. The auth form replaces it once something
/// requests authentication and stays until the visitor is a signed-in client
/// or withdraws the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientGate {
    auth_requested: bool,
}

impl ClientGate {
    pub const AUTHORIZED: &'static [Role] = &[Role::Client];

    pub fn is_client(state: &AuthState) -> bool {
        state.has_role_in(Self::AUTHORIZED)
    }

    pub fn auth_requested(&self) -> bool {
        self.auth_requested
    }

    /// Ask for the auth form. Returns whether anything changed.
    pub fn request_auth(&mut self) -> bool {
        !std::mem::replace(&mut self.auth_requested, true)
    }

    /// Request auth when the active section needs a client. Returns whether
    /// anything changed. Run on every render of the shell.
    pub fn enforce(&mut self, outlet: Outlet<ClientSection>) -> bool {
        outlet == Outlet::RequireAuth && self.request_auth()
    }

    /// Back out of the auth form.
    pub fn withdraw(&mut self) {
        self.auth_requested = false;
    }

    /// Close the request after a successful submission. A visitor who is
    /// still not a client, e.g. signed in with a staff account, keeps the
    /// form. Returns whether the request was closed.
    pub fn complete(&mut self, state: &AuthState) -> bool {
        if !self.auth_requested || !Self::is_client(state) {
            return false;
        }
        self.withdraw();
        true
    }

    pub fn view(&self, state: &AuthState) -> GateView {
        if state.loading {
            GateView::Loading
        } else if self.auth_requested && !Self::is_client(state) {
            GateView::AuthForm
        } else {
            GateView::Shell
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::AuthUser;
    use uuid::Uuid;

    fn signed_in(role: Option<Role>) -> AuthState {
        AuthState {
            user: Some(AuthUser {
                id: Uuid::nil(),
                email: Some("someone@studio.com".to_string()),
            }),
            role,
            loading: false,
        }
    }

    fn guest() -> AuthState {
        AuthState {
            user: None,
            role: None,
            loading: false,
        }
    }

    #[test]
    fn test_gates_show_loading_first() {
        let state = AuthState::default();

        assert_eq!(AdminGate::view(&state), GateView::Loading);
        assert_eq!(ClientGate::default().view(&state), GateView::Loading);
    }

    #[test]
    fn test_admin_gate_authorized_roles() {
        assert_eq!(AdminGate::view(&signed_in(Some(Role::Admin))), GateView::Shell);
        assert_eq!(AdminGate::view(&signed_in(Some(Role::Professional))), GateView::Shell);
    }

    #[test]
    fn test_admin_gate_rejects_everything_else() {
        for state in [guest(), signed_in(None), signed_in(Some(Role::Client))] {
            assert_eq!(AdminGate::view(&state), GateView::AuthForm);
        }
    }

    #[test]
    fn test_client_gate_lets_guests_browse() {
        let gate = ClientGate::default();

        assert_eq!(gate.view(&guest()), GateView::Shell);
        assert_eq!(gate.view(&signed_in(Some(Role::Admin))), GateView::Shell);
    }

    #[test]
    fn test_client_gate_requires_client_role_once_requested() {
        let mut gate = ClientGate::default();
        assert!(gate.request_auth());
        assert!(!gate.request_auth());

        for role in [None, Some(Role::Admin), Some(Role::Professional)] {
            assert_eq!(gate.view(&signed_in(role)), GateView::AuthForm);
        }
        assert_eq!(gate.view(&guest()), GateView::AuthForm);
        assert_eq!(gate.view(&signed_in(Some(Role::Client))), GateView::Shell);
    }

    #[test]
    fn test_client_gate_withdraw_returns_to_shell() {
        let mut gate = ClientGate::default();
        gate.request_auth();

        gate.withdraw();

        assert!(!gate.auth_requested());
        assert_eq!(gate.view(&guest()), GateView::Shell);
    }

    #[test]
    fn test_enforce_requests_auth_for_gated_outlet() {
        let mut gate = ClientGate::default();

        assert!(!gate.enforce(Outlet::Render(ClientSection::Services)));
        assert!(!gate.auth_requested());

        assert!(gate.enforce(Outlet::RequireAuth));
        assert!(!gate.enforce(Outlet::RequireAuth));
        assert!(gate.auth_requested());
    }

    #[test]
    fn test_complete_keeps_form_for_staff_accounts() {
        let mut gate = ClientGate::default();
        gate.request_auth();

        assert!(!gate.complete(&signed_in(Some(Role::Admin))));
        assert_eq!(gate.view(&signed_in(Some(Role::Admin))), GateView::AuthForm);

        assert!(gate.complete(&signed_in(Some(Role::Client))));
        assert!(!gate.auth_requested());
    }
}
