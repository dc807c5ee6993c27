//! Input binding for forms held in a `use_mut_ref` cell.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

/// Callback writing the input's value into `form` and re-rendering.
pub fn bind<F: 'static>(
    form: &Rc<RefCell<F>>,
    refresh: &UseForceUpdateHandle,
    apply: fn(&mut F, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    let refresh = refresh.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        apply(&mut form.borrow_mut(), input.value());
        refresh.force_update();
    })
}
