//! Admin menu: settings entries and sign-out.

use ui_core::Notice;
use ui_core::router::ADMIN_MENU_ENTRIES;
use yew::prelude::*;

use crate::components::use_toast;

#[derive(Properties, PartialEq)]
pub struct AdminMenuProps {
    pub on_sign_out: Callback<()>,
}

#[function_component(AdminMenu)]
pub fn admin_menu(props: &AdminMenuProps) -> Html {
    let toast = use_toast();
    let on_sign_out = props.on_sign_out.reform(|_: MouseEvent| ());

    html! {
        <div class="view">
            <div class="view-header">
                <h2>{"Menu"}</h2>
            </div>
            <div class="menu-list">
                { for ADMIN_MENU_ENTRIES.iter().map(|entry| {
                    let toast = toast.clone();
                    let onclick = Callback::from(move |_: MouseEvent| toast.show(Notice::in_development()));
                    html! {
                        <button key={*entry} type="button" class="btn btn-outline menu-entry" {onclick}>
                            { *entry }
                        </button>
                    }
                })}
                <button type="button" class="btn btn-destructive menu-entry" onclick={on_sign_out}>
                    {"Sair"}
                </button>
            </div>
        </div>
    }
}
