//! Loading spinner component.

use yew::prelude::*;

/// Properties for Loading component.
#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub label: Option<AttrValue>,
    /// Cover the whole screen, as the gates do
    #[prop_or_default]
    pub full_screen: bool,
}

/// Loading spinner component.
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    let class = if props.full_screen {
        "loading loading-screen"
    } else {
        "loading"
    };

    html! {
        <div {class}>
            <div class="spinner"></div>
            if let Some(label) = &props.label {
                <p class="loading-label">{ label }</p>
            }
        </div>
    }
}
