//! Admin home: today's numbers and the public site link.

use core_types::{DayStats, format_price};
use ui_core::{Liveness, Loadable, Notice, views};
use yew::prelude::*;

use crate::browser;
use crate::components::{Loading, StatCard, use_toast};
use crate::context::use_session;

#[derive(Properties, PartialEq)]
pub struct AdminDashboardProps {
    /// Jump to another admin section by navigation id
    pub on_navigate: Callback<&'static str>,
}

#[function_component(AdminDashboard)]
pub fn admin_dashboard(props: &AdminDashboardProps) -> Html {
    let ctx = use_session();
    let toast = use_toast();
    let stats = use_state(Loadable::<DayStats>::default);

    {
        let stats = stats.clone();
        let backend = ctx.session.backend();

        use_effect_with((), move |_| {
            let live = Liveness::new();
            let task_live = live.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let load = views::load_day_stats(backend.as_ref(), views::today());
                if let Some(data) = task_live.guard(load).await {
                    stats.set(Loadable::ready(data));
                }
            });
            move || live.revoke()
        });
    }

    let public_url = views::public_client_url(&browser::origin());

    let on_copy = {
        let url = public_url.clone();
        let toast = toast.clone();
        Callback::from(move |_: MouseEvent| {
            let url = url.clone();
            let toast = toast.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if browser::copy_to_clipboard(&url).await {
                    toast.show(Notice::info(
                        "Link copiado!",
                        "O link do site público foi copiado para a área de transferência.",
                    ));
                }
            });
        })
    };

    let on_open = {
        let url = public_url.clone();
        Callback::from(move |_: MouseEvent| browser::open_in_new_tab(&url))
    };

    let on_agenda = props.on_navigate.reform(|_: MouseEvent| "agenda");
    let on_reports = Callback::from(move |_: MouseEvent| toast.show(Notice::in_development()));

    html! {
        <div class="view">
            <div class="view-header">
                <h1>{"Painel Administrativo"}</h1>
                <p class="text-secondary">{"Gerencie seu estúdio de beleza"}</p>
            </div>

            if stats.loading {
                <Loading />
            } else {
                <div class="stats-grid">
                    <StatCard
                        value={stats.data.appointments.to_string()}
                        label={"Agendamentos Hoje"}
                        hint={"agendamentos para hoje"}
                    />
                    <StatCard
                        value={format_price(stats.data.revenue)}
                        label={"Receita Estimada Hoje"}
                        hint={"estimativa do dia"}
                    />
                </div>
            }

            <div class="card">
                <div class="card-header">
                    <h2 class="card-title">{"Site Público"}</h2>
                    <p class="text-secondary">
                        {"Compartilhe o link do seu site de agendamentos com os clientes"}
                    </p>
                </div>
                <code class="public-url">{ &public_url }</code>
                <div class="button-row">
                    <button type="button" class="btn btn-secondary" onclick={on_copy}>{"Copiar Link"}</button>
                    <button type="button" class="btn btn-primary" onclick={on_open}>{"Abrir Site"}</button>
                </div>
            </div>

            <div class="card">
                <div class="card-header">
                    <h2 class="card-title">{"Ações Rápidas"}</h2>
                </div>
                <div class="button-row">
                    <button type="button" class="btn btn-secondary" onclick={on_agenda}>{"Ver Agenda"}</button>
                    <button type="button" class="btn btn-secondary" onclick={on_reports}>{"Relatórios"}</button>
                </div>
            </div>
        </div>
    }
}
