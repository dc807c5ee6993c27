//! Bottom tab bar.

use ui_core::{Icon, NavItem};
use yew::prelude::*;

/// Properties for BottomNav component.
#[derive(Properties, PartialEq)]
pub struct BottomNavProps {
    /// Items in order, each with whether it is the active tab
    pub items: Vec<(NavItem, bool)>,
    pub on_select: Callback<&'static str>,
}

fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Home => "⌂",
        Icon::Calendar => "📅",
        Icon::Scissors => "✂",
        Icon::Users => "👥",
        Icon::Menu => "☰",
        Icon::Star => "★",
    }
}

#[function_component(BottomNav)]
pub fn bottom_nav(props: &BottomNavProps) -> Html {
    html! {
        <nav class="bottom-nav">
            { for props.items.iter().map(|(item, active)| {
                let id = item.id;
                let onclick = props.on_select.reform(move |_: MouseEvent| id);
                let class = classes!("nav-tab", active.then_some("active"));

                html! {
                    <button key={id} type="button" {class} {onclick}>
                        <span class="nav-icon">{ glyph(item.icon) }</span>
                        <span class="nav-label">{ item.label }</span>
                    </button>
                }
            })}
        </nav>
    }
}
