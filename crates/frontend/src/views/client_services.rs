//! Active services with their category and price.

use core_types::{Service, format_price};
use ui_core::{Liveness, Loadable, Panel, views};
use yew::prelude::*;

use crate::components::Loading;
use crate::context::use_session;

#[function_component(ClientServices)]
pub fn client_services() -> Html {
    let ctx = use_session();
    let services = use_state(Loadable::<Vec<Service>>::default);

    {
        let services = services.clone();
        let backend = ctx.session.backend();

        use_effect_with((), move |_| {
            let live = Liveness::new();
            let task_live = live.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(data) = task_live.guard(views::load_services(backend.as_ref())).await {
                    services.set(Loadable::ready(data));
                }
            });
            move || live.revoke()
        });
    }

    let rows = match services.panel() {
        Panel::Loading => return html! { <Loading label={"Carregando serviços..."} /> },
        Panel::Empty => {
            return html! {
                <div class="empty-state">
                    <div class="empty-icon">{"✂"}</div>
                    <h2>{"Nenhum serviço disponível"}</h2>
                    <p class="text-secondary">{"Os serviços serão configurados pelo administrador"}</p>
                </div>
            };
        }
        Panel::Rows(rows) => rows,
    };

    html! {
        <div class="view">
            <div class="view-header">
                <h1>{"Nossos Serviços"}</h1>
                <p class="text-secondary">{"Conheça todos os serviços disponíveis"}</p>
            </div>

            <div class="card-list">
                { for rows.iter().map(|service| html! {
                    <div key={service.id.to_string()} class="card">
                        <div class="card-header">
                            <h2 class="card-title">{ &service.name }</h2>
                            if let Some(category) = &service.category {
                                <span class="badge">{ &category.name }</span>
                            }
                        </div>
                        if let Some(description) = service.description.as_deref().filter(|d| !d.is_empty()) {
                            <p class="text-secondary">{ description }</p>
                        }
                        <div class="service-meta">
                            <span>{ format!("{} min", service.duration) }</span>
                            <span class="price">{ format_price(service.price) }</span>
                        </div>
                    </div>
                })}
            </div>
        </div>
    }
}
