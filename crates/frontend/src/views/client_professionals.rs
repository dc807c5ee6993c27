//! Available professionals with a chat shortcut.

use core_types::{Professional, avatar_initial};
use ui_core::{Liveness, Loadable, Panel, views};
use yew::prelude::*;

use crate::browser;
use crate::components::Loading;
use crate::context::use_session;

#[function_component(ClientProfessionals)]
pub fn client_professionals() -> Html {
    let ctx = use_session();
    let professionals = use_state(Loadable::<Vec<Professional>>::default);

    {
        let professionals = professionals.clone();
        let backend = ctx.session.backend();

        use_effect_with((), move |_| {
            let live = Liveness::new();
            let task_live = live.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let load = views::load_professionals(backend.as_ref());
                if let Some(data) = task_live.guard(load).await {
                    professionals.set(Loadable::ready(data));
                }
            });
            move || live.revoke()
        });
    }

    let rows = match professionals.panel() {
        Panel::Loading => return html! { <Loading label={"Carregando profissionais..."} /> },
        Panel::Empty => {
            return html! {
                <div class="empty-state">
                    <div class="empty-icon">{"👥"}</div>
                    <h2>{"Nenhum profissional disponível"}</h2>
                    <p class="text-secondary">{"Os profissionais serão configurados pelo administrador"}</p>
                </div>
            };
        }
        Panel::Rows(rows) => rows,
    };

    html! {
        <div class="view">
            <div class="view-header">
                <h1>{"Nossa Equipe"}</h1>
                <p class="text-secondary">{"Conheça nossos profissionais especializados"}</p>
            </div>

            <div class="card-list">
                { for rows.iter().map(professional_card) }
            </div>
        </div>
    }
}

fn professional_card(professional: &Professional) -> Html {
    let name = professional.name();
    let avatar = professional.profile.as_ref().and_then(|p| p.avatar_url.clone());
    let chat = professional
        .phone()
        .and_then(|phone| views::professional_whatsapp_link(name, phone));
    let bio = professional.bio.as_deref().filter(|b| !b.is_empty());

    html! {
        <div key={professional.id.to_string()} class="card">
            <div class="professional-header">
                if let Some(url) = avatar {
                    <img class="avatar" src={url} alt={name.to_string()} />
                } else {
                    <div class="avatar avatar-fallback">{ avatar_initial(name) }</div>
                }
                <div>
                    <h2 class="card-title">{ name }</h2>
                    if let Some(specialty) = professional.specialty.as_deref().filter(|s| !s.is_empty()) {
                        <span class="badge">{ specialty }</span>
                    }
                </div>
            </div>
            if let Some(bio) = bio {
                <p class="text-secondary">{ bio }</p>
            }
            if let Some(link) = chat {
                <button
                    type="button"
                    class="btn btn-outline btn-block"
                    onclick={Callback::from(move |_: MouseEvent| browser::open_in_new_tab(&link))}
                >
                    {"Conversar no WhatsApp"}
                </button>
            }
        </div>
    }
}
