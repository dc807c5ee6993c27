//! Client shell. Guests may browse; booking sections need a client account.

use ui_core::router::client_outlet;
use ui_core::{ClientGate, ClientSection, GateView, Outlet, TabRouter};
use yew::prelude::*;

use crate::components::{BottomNav, ClientAuth, Loading, Placeholder};
use crate::context::use_session;
use crate::views::{ClientAbout, ClientHome, ClientProfessionals, ClientServices};

#[function_component(ClientPage)]
pub fn client_page() -> Html {
    let ctx = use_session();
    let router = use_state(TabRouter::<ClientSection>::new);
    let gate = use_state(ClientGate::default);

    let is_client = ClientGate::is_client(&ctx.state);
    let outlet = client_outlet(router.active(), is_client);

    // A gated section asks for the auth form instead, including after the
    // request was closed while the section stayed active
    {
        let gate = gate.clone();
        use_effect_with((outlet, gate.auth_requested()), move |(outlet, _)| {
            let mut next = *gate;
            if next.enforce(*outlet) {
                gate.set(next);
            }
        });
    }

    let on_select = {
        let router = router.clone();
        Callback::from(move |id: &'static str| {
            let mut next = *router;
            if next.select_id(id) {
                router.set(next);
            }
        })
    };

    let on_auth_required = {
        let gate = gate.clone();
        Callback::from(move |()| {
            let mut next = *gate;
            if next.request_auth() {
                gate.set(next);
            }
        })
    };

    let on_sign_out = {
        let router = router.clone();
        let session = ctx.session.clone();
        Callback::from(move |()| {
            let router = router.clone();
            let session = session.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = session.sign_out().await {
                    tracing::error!(error = %e, "sign-out failed");
                }
                router.set(TabRouter::new());
            });
        })
    };

    match gate.view(&ctx.state) {
        GateView::Loading => {
            return html! { <Loading label={"Carregando..."} full_screen=true /> };
        }
        GateView::AuthForm => {
            // Leaving the form must not land back on a gated section
            let on_back = {
                let gate = gate.clone();
                let router = router.clone();
                Callback::from(move |()| {
                    let mut next = *gate;
                    next.withdraw();
                    gate.set(next);
                    if router.active().requires_auth() {
                        router.set(TabRouter::new());
                    }
                })
            };
            let on_success = {
                let gate = gate.clone();
                let session = ctx.session.clone();
                Callback::from(move |()| {
                    let mut next = *gate;
                    if next.complete(&session.state()) {
                        gate.set(next);
                    }
                })
            };
            return html! { <ClientAuth {on_back} {on_success} /> };
        }
        GateView::Shell => {}
    }

    let content = match outlet {
        Outlet::RequireAuth => Html::default(),
        Outlet::Render(ClientSection::Home) => html! {
            <ClientHome {on_auth_required} on_navigate={on_select.clone()} />
        },
        Outlet::Render(ClientSection::Services) => html! { <ClientServices /> },
        Outlet::Render(ClientSection::Professionals) => html! { <ClientProfessionals /> },
        Outlet::Render(ClientSection::About) => html! { <ClientAbout {on_sign_out} /> },
        Outlet::Render(section) => html! {
            <Placeholder title={section.placeholder_title().unwrap_or_default()} />
        },
    };

    html! {
        <div class="shell">
            <main class="container">{ content }</main>
            <BottomNav items={router.nav_items().collect::<Vec<_>>()} {on_select} />
        </div>
    }
}
