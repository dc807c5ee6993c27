//! Panel for sections that are not built yet.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PlaceholderProps {
    pub title: AttrValue,
}

#[function_component(Placeholder)]
pub fn placeholder(props: &PlaceholderProps) -> Html {
    html! {
        <div class="placeholder">
            <h2>{ &props.title }</h2>
            <p class="text-secondary">{"Em desenvolvimento..."}</p>
        </div>
    }
}
