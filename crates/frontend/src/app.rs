//! Main application component with routing.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::Toaster;
use crate::context::SessionProvider;
use crate::pages::{AdminPage, ClientPage, IndexPage};

/// Application routes.
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Index,
    #[at("/client")]
    Client,
    #[at("/admin")]
    Admin,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Route switch function.
fn switch(routes: Route) -> Html {
    match routes {
        Route::Index => html! { <IndexPage /> },
        Route::Client => html! { <ClientPage /> },
        Route::Admin => html! { <AdminPage /> },
        Route::NotFound => html! {
            <div class="card not-found">
                <h1>{"404"}</h1>
                <p>{"Página não encontrada."}</p>
                <Link<Route> to={Route::Index} classes="btn btn-primary">
                    {"Voltar ao início"}
                </Link<Route>>
            </div>
        },
    }
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <SessionProvider>
            <Toaster>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </Toaster>
        </SessionProvider>
    }
}
