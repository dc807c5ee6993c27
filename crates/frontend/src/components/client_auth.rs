//! Client sign-in / sign-up form.

use ui_core::{AuthMode, ClientAuthForm};
use yew::prelude::*;

use super::field::bind;
use super::toaster::use_toast;
use crate::context::use_session;

#[derive(Properties, PartialEq)]
pub struct ClientAuthProps {
    pub on_back: Callback<()>,
    pub on_success: Callback<()>,
}

#[function_component(ClientAuth)]
pub fn client_auth(props: &ClientAuthProps) -> Html {
    let ctx = use_session();
    let toast = use_toast();
    let form = use_mut_ref(ClientAuthForm::default);
    let refresh = use_force_update();

    let on_name = bind(&form, &refresh, |f, v| f.name = v);
    let on_phone = bind(&form, &refresh, |f, v| f.set_phone(&v));
    let on_email = bind(&form, &refresh, |f, v| f.email = v);
    let on_password = bind(&form, &refresh, |f, v| f.password = v);

    let on_toggle = {
        let form = form.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            form.borrow_mut().toggle_mode();
            refresh.force_update();
        })
    };

    let on_back = props.on_back.reform(|_: MouseEvent| ());

    let onsubmit = {
        let form = form.clone();
        let refresh = refresh.clone();
        let session = ctx.session.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(submission) = form.borrow_mut().begin() else {
                return;
            };
            refresh.force_update();

            let form = form.clone();
            let refresh = refresh.clone();
            let session = session.clone();
            let toast = toast.clone();
            let on_success = on_success.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = submission.run(&session).await;
                let completion = form.borrow_mut().finish(outcome);
                refresh.force_update();

                if let Some(notice) = completion.notice {
                    toast.show(notice);
                }
                if completion.succeeded {
                    on_success.emit(());
                }
            });
        })
    };

    let form = form.borrow();
    let signing_up = form.mode() == AuthMode::SignUp;

    html! {
        <div class="auth-screen">
            <div class="card auth-card">
                <button type="button" class="btn btn-ghost auth-back" onclick={on_back}>{"←"}</button>
                <div class="auth-badge">{"♥"}</div>
                <h1 class="card-title">{ form.title() }</h1>
                <p class="text-secondary">{ form.description() }</p>

                <form class="auth-form" {onsubmit}>
                    if signing_up {
                        <label for="name">{"Nome completo"}</label>
                        <input id="name" type="text" placeholder="Seu nome completo" required=true
                            value={form.name.clone()} oninput={on_name} />
                        <label for="phone">{"WhatsApp"}</label>
                        <input id="phone" type="tel" placeholder="(11) 99999-9999" required=true
                            value={form.phone().to_string()} oninput={on_phone} />
                    }
                    <label for="email">{"Email"}</label>
                    <input id="email" type="email" placeholder="seu@email.com" required=true
                        value={form.email.clone()} oninput={on_email} />
                    <label for="password">{"Senha"}</label>
                    <input id="password" type="password" placeholder="••••••••" required=true
                        value={form.password.clone()} oninput={on_password} />

                    <button type="submit" class="btn btn-primary btn-block" disabled={form.is_submitting()}>
                        { form.submit_label() }
                    </button>
                </form>

                <button type="button" class="btn btn-link" onclick={on_toggle}>
                    { form.mode().toggle_label() }
                </button>
            </div>
        </div>
    }
}
