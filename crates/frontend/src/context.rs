//! Session context shared by every page.

use std::rc::Rc;

use backend::{BackendConfig, SupabaseClient};
use ui_core::{AuthState, Liveness, Session};
use yew::prelude::*;

/// The session plus the last auth state it published.
#[derive(Clone)]
pub struct SessionContext {
    pub session: Rc<Session>,
    pub state: AuthState,
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session) && self.state == other.state
    }
}

fn connect() -> Session {
    let config = BackendConfig::from_env();
    if !config.is_configured() {
        tracing::warn!(url = %config.url, "BEAUTYBOOK_ANON_KEY not set; backend calls will be rejected");
    }
    Session::new(Rc::new(SupabaseClient::new(config)))
}

impl SessionContext {
    /// Fallback for components rendered outside `SessionProvider`.
    fn detached() -> Self {
        tracing::error!("session context missing; using a detached session");
        let session = Rc::new(connect());
        let state = session.state();
        Self { session, state }
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Children,
}

/// Owns the session, restores it on mount and re-renders consumers on every
/// auth state change.
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_memo((), |_| connect());
    let state = use_state(|| session.state());

    {
        let session = session.clone();
        let state = state.clone();

        use_effect_with((), move |_| {
            let live = Liveness::new();
            let mut changes = session.subscribe();

            let task_live = live.clone();
            wasm_bindgen_futures::spawn_local(async move {
                while changes.changed().await.is_ok() {
                    if !task_live.is_alive() {
                        break;
                    }
                    let next = changes.borrow_and_update().clone();
                    state.set(next);
                }
            });

            wasm_bindgen_futures::spawn_local(async move {
                session.initialize().await;
            });

            move || live.revoke()
        });
    }

    let context = SessionContext {
        session,
        state: (*state).clone(),
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            { props.children.clone() }
        </ContextProvider<SessionContext>>
    }
}

/// Current session and auth state.
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(SessionContext::detached)
}
