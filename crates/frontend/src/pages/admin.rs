//! Admin shell behind the admin gate.

use ui_core::{AdminGate, AdminSection, GateView, TabRouter};
use yew::prelude::*;

use crate::components::{AdminLogin, BottomNav, Loading, Placeholder};
use crate::context::use_session;
use crate::views::{AdminDashboard, AdminMenu};

#[function_component(AdminPage)]
pub fn admin_page() -> Html {
    let ctx = use_session();
    let router = use_state(TabRouter::<AdminSection>::new);

    let on_select = {
        let router = router.clone();
        Callback::from(move |id: &'static str| {
            let mut next = *router;
            if next.select_id(id) {
                router.set(next);
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

    match AdminGate::view(&ctx.state) {
        GateView::Loading => {
            return html! { <Loading label={"Carregando..."} full_screen=true /> };
        }
        GateView::AuthForm => {
            let on_success = {
                let router = router.clone();
                Callback::from(move |()| router.set(TabRouter::new()))
            };
            return html! { <AdminLogin {on_success} /> };
        }
        GateView::Shell => {}
    }

    let content = match router.active() {
        AdminSection::Home => html! { <AdminDashboard on_navigate={on_select.clone()} /> },
        AdminSection::Menu => html! { <AdminMenu {on_sign_out} /> },
        section => html! {
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
