//! Studio details: contact, opening hours and sign-out.

use core_types::{StudioConfig, instagram_handle, weekday_label};
use ui_core::{Liveness, Loadable, views};
use yew::prelude::*;

use crate::browser;
use crate::components::Loading;
use crate::context::use_session;

#[derive(Properties, PartialEq)]
pub struct ClientAboutProps {
    pub on_sign_out: Callback<()>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[function_component(ClientAbout)]
pub fn client_about(props: &ClientAboutProps) -> Html {
    let ctx = use_session();
    let config = use_state(Loadable::<Option<StudioConfig>>::default);

    {
        let config = config.clone();
        let backend = ctx.session.backend();

        use_effect_with((), move |_| {
            let live = Liveness::new();
            let task_live = live.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(data) = task_live.guard(views::load_studio_config(backend.as_ref())).await {
                    config.set(Loadable::ready(data));
                }
            });
            move || live.revoke()
        });
    }

    if config.loading {
        return html! { <Loading label={"Carregando informações..."} /> };
    }

    let studio = config.data.as_ref();

    let title = studio
        .map(|c| c.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("Sobre Nós");
    let description = studio.and_then(|c| present(&c.description));
    let banner = studio.and_then(|c| present(&c.banner_url));
    let address = studio.and_then(|c| present(&c.address));
    let phone = studio.and_then(|c| present(&c.phone));
    let whatsapp = studio.and_then(|c| present(&c.whatsapp));
    let instagram = studio.and_then(|c| present(&c.instagram));
    let hours = studio.and_then(|c| c.opening_hours.as_ref());

    let whatsapp_button = whatsapp.and_then(|number| {
        let link = views::whatsapp_link(number, views::STUDIO_WHATSAPP_MESSAGE)?;
        let onclick = Callback::from(move |_: MouseEvent| browser::open_in_new_tab(&link));
        Some(html! {
            <button type="button" class="btn btn-outline btn-block" {onclick}>
                { format!("WhatsApp: {number}") }
            </button>
        })
    });

    let instagram_button = instagram.map(|raw| {
        let url = views::instagram_url(raw);
        let onclick = Callback::from(move |_: MouseEvent| browser::open_in_new_tab(&url));
        html! {
            <button type="button" class="btn btn-outline btn-block" {onclick}>
                { format!("Instagram: @{}", instagram_handle(raw)) }
            </button>
        }
    });

    let on_sign_out = props.on_sign_out.reform(|_: MouseEvent| ());

    html! {
        <div class="view">
            <div class="view-header">
                <h1>{ title }</h1>
                if let Some(description) = description {
                    <p class="text-secondary">{ description }</p>
                }
            </div>

            if let Some(url) = banner {
                <img class="studio-banner" src={url.to_string()} alt="Banner do estúdio" />
            }

            <div class="card">
                <h2 class="card-title">{"Contato"}</h2>
                if let Some(address) = address {
                    <p>{ format!("📍 {address}") }</p>
                }
                if let Some(phone) = phone {
                    <p>{ format!("📞 {phone}") }</p>
                }
                { whatsapp_button.unwrap_or_default() }
                { instagram_button.unwrap_or_default() }
            </div>

            if let Some(hours) = hours {
                <div class="card">
                    <h2 class="card-title">{"Horário de Funcionamento"}</h2>
                    <div class="hours">
                        { for hours.days.iter().map(|(day, day_hours)| html! {
                            <div key={day.clone()} class="hours-row">
                                <span class="hours-day">{ format!("{}:", weekday_label(day)) }</span>
                                <span class="text-secondary">{ day_hours.describe() }</span>
                            </div>
                        })}
                    </div>
                </div>
            }

            if ctx.state.is_signed_in() {
                <div class="card">
                    <button type="button" class="btn btn-destructive btn-block" onclick={on_sign_out}>
                        {"Sair da conta"}
                    </button>
                </div>
            }
        </div>
    }
}
