//! Credential forms for the admin and client gates.
//!
//! A submission runs in three steps so the UI can render the in-flight
//! state: `begin` marks the form submitting and snapshots its fields, the
//! snapshot's `run` talks to the session, and `finish` applies the outcome
//! and clears the submitting flag. `submit` chains the three.

use backend::BackendError;
use core_types::{Role, SignUpProfile, format_phone};

use crate::notice::Notice;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::Login,
        }
    }

    pub fn submit_label(self, submitting: bool) -> &'static str {
        match (self, submitting) {
            (AuthMode::Login, false) => "Entrar",
            (AuthMode::Login, true) => "Entrando...",
            (AuthMode::SignUp, false) => "Criar conta",
            (AuthMode::SignUp, true) => "Criando conta...",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Não tem conta? Criar conta",
            AuthMode::SignUp => "Já tem conta? Fazer login",
        }
    }
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Completion {
    /// Toast to show, if any
    pub notice: Option<Notice>,
    /// The caller's success continuation should run
    pub succeeded: bool,
}

impl Completion {
    fn success() -> Self {
        Self {
            notice: None,
            succeeded: true,
        }
    }

    fn failure(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            succeeded: false,
        }
    }
}

const ADMIN_UNEXPECTED: &str = "Erro inesperado";
const CLIENT_UNEXPECTED: &str = "Erro inesperado. Tente novamente.";

/// Admin login / admin account creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminLoginForm {
    pub name: String,
    pub email: String,
    pub password: String,
    mode: AuthMode,
    submitting: bool,
}

/// Field snapshot of an admin submission.
#[derive(Debug, Clone)]
pub struct AdminSubmission {
    mode: AuthMode,
    name: String,
    email: String,
    password: String,
}

#[derive(Debug)]
pub enum AdminOutcome {
    SignedIn,
    SignInRejected(BackendError),
    SignUpRejected(BackendError),
    /// The account exists but the follow-up sign-in failed
    AutoSignInFailed(BackendError),
}

impl AdminLoginForm {
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Painel Administrativo",
            AuthMode::SignUp => "Criar Conta Admin",
        }
    }

    pub fn description(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Faça login para gerenciar seu estúdio",
            AuthMode::SignUp => "Crie sua conta de administrador",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        self.mode.submit_label(self.submitting)
    }

    /// Mark the form submitting. `None` while a submission is in flight.
    pub fn begin(&mut self) -> Option<AdminSubmission> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(AdminSubmission {
            mode: self.mode,
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    pub fn finish(&mut self, outcome: AdminOutcome) -> Completion {
        self.submitting = false;

        match outcome {
            AdminOutcome::SignedIn => Completion::success(),
            AdminOutcome::SignInRejected(e) => {
                Completion::failure(Notice::from_auth_error("Erro no login", &e, ADMIN_UNEXPECTED))
            }
            AdminOutcome::SignUpRejected(e) => {
                Completion::failure(Notice::from_auth_error("Erro no cadastro", &e, ADMIN_UNEXPECTED))
            }
            AdminOutcome::AutoSignInFailed(e) => {
                tracing::warn!(error = %e, "sign-in after admin sign-up failed");
                self.mode = AuthMode::Login;
                self.name.clear();
                self.password.clear();
                Completion::failure(Notice::error(
                    "Conta criada, mas erro no login",
                    "Tente fazer login manualmente.",
                ))
            }
        }
    }

    pub async fn submit(&mut self, session: &Session) -> Completion {
        let Some(submission) = self.begin() else {
            return Completion::default();
        };
        let outcome = submission.run(session).await;
        self.finish(outcome)
    }
}

impl AdminSubmission {
    /// Sign in, or create an admin account and sign into it once.
    pub async fn run(self, session: &Session) -> AdminOutcome {
        if self.mode == AuthMode::SignUp {
            let profile = SignUpProfile {
                name: self.name,
                phone: None,
                role: Some(Role::Admin),
            };
            if let Err(e) = session.sign_up(&self.email, &self.password, &profile).await {
                return AdminOutcome::SignUpRejected(e);
            }
            return match session.sign_in(&self.email, &self.password).await {
                Ok(()) => AdminOutcome::SignedIn,
                Err(e) => AdminOutcome::AutoSignInFailed(e),
            };
        }

        match session.sign_in(&self.email, &self.password).await {
            Ok(()) => AdminOutcome::SignedIn,
            Err(e) => AdminOutcome::SignInRejected(e),
        }
    }
}

/// Client login / client account creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientAuthForm {
    pub name: String,
    pub email: String,
    pub password: String,
    phone: String,
    mode: AuthMode,
    submitting: bool,
}

/// Field snapshot of a client submission.
#[derive(Debug, Clone)]
pub struct ClientSubmission {
    mode: AuthMode,
    name: String,
    email: String,
    phone: String,
    password: String,
}

#[derive(Debug)]
pub enum ClientOutcome {
    SignedIn,
    SignInRejected(BackendError),
    SignedUp,
    SignUpRejected(BackendError),
}

impl ClientAuthForm {
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Store the phone field with the mobile mask applied.
    pub fn set_phone(&mut self, input: &str) {
        self.phone = format_phone(input);
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Entrar",
            AuthMode::SignUp => "Criar Conta",
        }
    }

    pub fn description(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Acesse sua conta para agendar",
            AuthMode::SignUp => "Crie sua conta para começar a agendar",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        self.mode.submit_label(self.submitting)
    }

    pub fn begin(&mut self) -> Option<ClientSubmission> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(ClientSubmission {
            mode: self.mode,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password: self.password.clone(),
        })
    }

    pub fn finish(&mut self, outcome: ClientOutcome) -> Completion {
        self.submitting = false;

        match outcome {
            ClientOutcome::SignedIn => Completion::success(),
            ClientOutcome::SignInRejected(e) => {
                Completion::failure(Notice::from_auth_error("Erro no login", &e, CLIENT_UNEXPECTED))
            }
            ClientOutcome::SignUpRejected(e) => {
                Completion::failure(Notice::from_auth_error("Erro no cadastro", &e, CLIENT_UNEXPECTED))
            }
            ClientOutcome::SignedUp => {
                *self = Self::default();
                Completion::default()
            }
        }
    }

    pub async fn submit(&mut self, session: &Session) -> Completion {
        let Some(submission) = self.begin() else {
            return Completion::default();
        };
        let outcome = submission.run(session).await;
        self.finish(outcome)
    }
}

impl ClientSubmission {
    /// Sign in, or register a client account without signing in.
    pub async fn run(self, session: &Session) -> ClientOutcome {
        match self.mode {
            AuthMode::Login => match session.sign_in(&self.email, &self.password).await {
                Ok(()) => ClientOutcome::SignedIn,
                Err(e) => ClientOutcome::SignInRejected(e),
            },
            AuthMode::SignUp => {
                let profile = SignUpProfile {
                    name: self.name,
                    phone: Some(self.phone),
                    role: None,
                };
                match session.sign_up(&self.email, &self.password, &profile).await {
                    Ok(()) => ClientOutcome::SignedUp,
                    Err(e) => ClientOutcome::SignUpRejected(e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::memory::MemoryBackend;
    use std::rc::Rc;

    fn session_with(backend: MemoryBackend) -> (Rc<MemoryBackend>, Session) {
        let backend = Rc::new(backend);
        (backend.clone(), Session::new(backend))
    }

    #[test]
    fn test_labels_follow_mode_and_submitting() {
        let mut form = AdminLoginForm::default();
        assert_eq!(form.title(), "Painel Administrativo");
        assert_eq!(form.submit_label(), "Entrar");

        form.toggle_mode();
        assert_eq!(form.title(), "Criar Conta Admin");
        assert_eq!(form.mode().toggle_label(), "Já tem conta? Fazer login");

        form.begin();
        assert_eq!(form.submit_label(), "Criando conta...");
    }

    #[test]
    fn test_begin_refuses_double_submit() {
        let mut form = ClientAuthForm::default();

        assert!(form.begin().is_some());
        assert!(form.begin().is_none());
        assert!(form.is_submitting());
    }

    #[tokio::test]
    async fn test_admin_login_success() {
        let (_, session) = session_with(MemoryBackend::new().with_user("a@s.com", "pw", Role::Admin));
        let mut form = AdminLoginForm {
            email: "a@s.com".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };

        let completion = form.submit(&session).await;

        assert!(completion.succeeded);
        assert_eq!(completion.notice, None);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_admin_login_failure_notice() {
        let (_, session) = session_with(MemoryBackend::new());
        let mut form = AdminLoginForm {
            email: "a@s.com".to_string(),
            password: "bad".to_string(),
            ..Default::default()
        };

        let completion = form.submit(&session).await;

        assert!(!completion.succeeded);
        let notice = completion.notice.unwrap();
        assert_eq!(notice.title, "Erro no login");
        assert_eq!(notice.description, "Invalid login credentials");
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_admin_sign_up_sends_admin_role_and_signs_in() {
        let (backend, session) = session_with(MemoryBackend::new());
        let mut form = AdminLoginForm {
            name: "Dona".to_string(),
            email: "dona@s.com".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };
        form.toggle_mode();

        let completion = form.submit(&session).await;

        assert!(completion.succeeded);
        assert_eq!(backend.sign_in_calls(), 1);
        let profile = backend.profile_of("dona@s.com").unwrap();
        assert_eq!(profile.role, Some(Role::Admin));
        assert_eq!(profile.phone, None);
        assert_eq!(session.state().role, Some(Role::Admin));
    }

    #[tokio::test]
    async fn test_admin_sign_up_rejected() {
        let (backend, session) = session_with(MemoryBackend::new().with_user("dona@s.com", "pw", Role::Admin));
        let mut form = AdminLoginForm {
            name: "Dona".to_string(),
            email: "dona@s.com".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };
        form.toggle_mode();

        let completion = form.submit(&session).await;

        let notice = completion.notice.unwrap();
        assert_eq!(notice.title, "Erro no cadastro");
        assert_eq!(notice.description, "User already registered");
        assert_eq!(backend.sign_in_calls(), 0);
        assert_eq!(form.mode(), AuthMode::SignUp);
    }

    #[tokio::test]
    async fn test_client_unexpected_error_is_generic() {
        let (backend, session) = session_with(MemoryBackend::new());
        backend.fail_next_sign_in(BackendError::Status {
            status: 500,
            message: "boom".to_string(),
        });
        let mut form = ClientAuthForm::default();

        let completion = form.submit(&session).await;

        let notice = completion.notice.unwrap();
        assert_eq!(notice.title, "Erro");
        assert_eq!(notice.description, "Erro inesperado. Tente novamente.");
    }

    #[tokio::test]
    async fn test_client_sign_up_switches_to_login_and_clears_fields() {
        let (backend, session) = session_with(MemoryBackend::new());
        let mut form = ClientAuthForm {
            name: "Bia".to_string(),
            email: "bia@mail.com".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };
        form.toggle_mode();
        form.set_phone("11987654321");

        let completion = form.submit(&session).await;

        assert!(!completion.succeeded);
        assert_eq!(completion.notice, None);
        assert_eq!(form, ClientAuthForm::default());
        assert_eq!(form.mode(), AuthMode::Login);
        assert_eq!(backend.sign_in_calls(), 0);
        let profile = backend.profile_of("bia@mail.com").unwrap();
        assert_eq!(profile.phone.as_deref(), Some("(11) 98765-4321"));
        assert_eq!(profile.role, None);
        assert_eq!(backend.role_of("bia@mail.com"), Some(Role::Client));
    }

    #[test]
    fn test_phone_mask() {
        let mut form = ClientAuthForm::default();

        form.set_phone("11 98765 4321");
        assert_eq!(form.phone(), "(11) 98765-4321");

        form.set_phone("1198");
        assert_eq!(form.phone(), "1198");
    }
}
