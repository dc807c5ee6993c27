//! Landing page: choose between the client site and the admin panel.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;

#[function_component(IndexPage)]
pub fn index_page() -> Html {
    html! {
        <div class="landing">
            <div class="landing-brand">
                <div class="auth-badge">{"♥"}</div>
                <h1>{"BeautyBook"}</h1>
                <p>{"Sistema de Agendamento para Estúdios de Beleza"}</p>
            </div>

            <div class="card">
                <div class="card-header">
                    <h2 class="card-title">{"Clientes"}</h2>
                    <p class="text-secondary">{"Agende seus horários de beleza"}</p>
                </div>
                <Link<Route> to={Route::Client} classes="btn btn-primary btn-block">
                    {"Acessar como Cliente"}
                </Link<Route>>
            </div>

            <div class="card">
                <div class="card-header">
                    <h2 class="card-title">{"Administrador"}</h2>
                    <p class="text-secondary">{"Gerencie seu estúdio"}</p>
                </div>
                <Link<Route> to={Route::Admin} classes="btn btn-secondary btn-block">
                    {"Painel Administrativo"}
                </Link<Route>>
            </div>

            <footer class="landing-footer">
                <p>{"BeautyBook © 2024"}</p>
                <p>{"Transformando a beleza em experiência digital"}</p>
            </footer>
        </div>
    }
}
