//! Client landing section: studio header, banners and shortcuts.

use core_types::{Banner, DEFAULT_STUDIO_NAME, StudioConfig};
use ui_core::{Liveness, Loadable, views};
use yew::prelude::*;

use crate::context::use_session;

const DEFAULT_TAGLINE: &str = "Seu estúdio de beleza";

#[derive(Properties, PartialEq)]
pub struct ClientHomeProps {
    pub on_auth_required: Callback<()>,
    pub on_navigate: Callback<&'static str>,
}

#[function_component(ClientHome)]
pub fn client_home(props: &ClientHomeProps) -> Html {
    let ctx = use_session();
    let banners = use_state(Loadable::<Vec<Banner>>::default);
    let config = use_state(Loadable::<Option<StudioConfig>>::default);

    // Two independent reads; either may land first
    {
        let banners = banners.clone();
        let config = config.clone();
        let backend = ctx.session.backend();

        use_effect_with((), move |_| {
            let live = Liveness::new();

            let task_live = live.clone();
            let banner_backend = backend.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let load = views::load_banners(banner_backend.as_ref());
                if let Some(data) = task_live.guard(load).await {
                    banners.set(Loadable::ready(data));
                }
            });

            let task_live = live.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let load = views::load_studio_config(backend.as_ref());
                if let Some(data) = task_live.guard(load).await {
                    config.set(Loadable::ready(data));
                }
            });

            move || live.revoke()
        });
    }

    let studio = config.data.as_ref();
    let name = studio
        .map(|c| c.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_STUDIO_NAME);
    let tagline = studio
        .and_then(|c| c.description.as_deref())
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_TAGLINE);
    let address = studio
        .and_then(|c| c.address.as_deref())
        .filter(|a| !a.is_empty());

    let on_create_account = props.on_auth_required.reform(|_: MouseEvent| ());
    let on_services = props.on_navigate.reform(|_: MouseEvent| "services");
    let on_professionals = props.on_navigate.reform(|_: MouseEvent| "professionals");

    html! {
        <div class="view">
            <div class="hero">
                <h1>{ format!("♥ {name}") }</h1>
                <p>{ tagline }</p>
            </div>

            if !banners.data.is_empty() {
                <section>
                    <h2 class="section-title">{"Novidades"}</h2>
                    <div class="card-list">
                        { for banners.data.iter().map(|banner| html! {
                            <div key={banner.id.to_string()} class="card banner">
                                <img
                                    src={banner.image_url.clone()}
                                    alt={banner.title.clone().unwrap_or_else(|| "Banner".to_string())}
                                />
                                if let Some(title) = banner.title.as_deref().filter(|t| !t.is_empty()) {
                                    <h3>{ title }</h3>
                                }
                            </div>
                        })}
                    </div>
                </section>
            }

            <div class="card cta">
                <h3>{"Agende seu horário"}</h3>
                <p class="text-secondary">{"Crie sua conta e tenha acesso completo aos nossos serviços"}</p>
                <button type="button" class="btn btn-primary btn-block" onclick={on_create_account}>
                    {"Criar Conta"}
                </button>
            </div>

            <div class="shortcut-grid">
                <button type="button" class="card shortcut" onclick={on_services}>
                    <h3>{"Serviços"}</h3>
                    <p class="text-secondary">{"Ver todos"}</p>
                </button>
                <button type="button" class="card shortcut" onclick={on_professionals}>
                    <h3>{"Profissionais"}</h3>
                    <p class="text-secondary">{"Conheça nosso time"}</p>
                </button>
            </div>

            if let Some(address) = address {
                <div class="card">
                    <h3>{"Localização"}</h3>
                    <p class="text-secondary">{ address }</p>
                </div>
            }
        </div>
    }
}
