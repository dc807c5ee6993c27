//! Transient notifications.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use ui_core::{Notice, NoticeVariant};
use yew::prelude::*;

const DISMISS_AFTER_MS: u32 = 4_000;

/// Handle for showing a toast.
#[derive(Clone, PartialEq)]
pub struct ToastHandle(Callback<Notice>);

impl ToastHandle {
    pub fn show(&self, notice: Notice) {
        self.0.emit(notice);
    }
}

#[derive(Default, PartialEq)]
struct Toasts {
    items: Vec<(u32, Notice)>,
}

enum ToastAction {
    Show(u32, Notice),
    Dismiss(u32),
}

impl Reducible for Toasts {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            ToastAction::Show(id, notice) => items.push((id, notice)),
            ToastAction::Dismiss(id) => items.retain(|(item, _)| *item != id),
        }
        Rc::new(Toasts { items })
    }
}

#[derive(Properties, PartialEq)]
pub struct ToasterProps {
    #[prop_or_default]
    pub children: Children,
}

/// Provides `ToastHandle` to its children and renders the toast stack.
#[function_component(Toaster)]
pub fn toaster(props: &ToasterProps) -> Html {
    let toasts = use_reducer(Toasts::default);
    let next_id = use_mut_ref(|| 0u32);

    let handle = {
        let dispatcher = toasts.dispatcher();
        use_memo((), move |_| {
            ToastHandle(Callback::from(move |notice: Notice| {
                let id = {
                    let mut next = next_id.borrow_mut();
                    *next = next.wrapping_add(1);
                    *next
                };
                dispatcher.dispatch(ToastAction::Show(id, notice));

                let dispatcher = dispatcher.clone();
                Timeout::new(DISMISS_AFTER_MS, move || {
                    dispatcher.dispatch(ToastAction::Dismiss(id));
                })
                .forget();
            }))
        })
    };

    html! {
        <ContextProvider<ToastHandle> context={(*handle).clone()}>
            { props.children.clone() }
            <div class="toaster">
                { for toasts.items.iter().map(|(id, notice)| {
                    let class = classes!(
                        "toast",
                        (notice.variant == NoticeVariant::Destructive).then_some("toast-destructive")
                    );
                    html! {
                        <div key={*id} {class}>
                            <div class="toast-title">{ &notice.title }</div>
                            <div class="toast-description">{ &notice.description }</div>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastHandle>>
    }
}

/// Toast handle from the nearest `Toaster`.
#[hook]
pub fn use_toast() -> ToastHandle {
    use_context::<ToastHandle>().unwrap_or_else(|| {
        ToastHandle(Callback::from(|notice: Notice| {
            tracing::warn!(title = %notice.title, "toast shown outside Toaster");
        }))
    })
}
