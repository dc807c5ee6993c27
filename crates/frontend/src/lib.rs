//! BeautyBook - Yew WASM Frontend
//!
//! Client booking site (`/client`) and studio admin panel (`/admin`) over
//! the hosted backend.

mod app;
mod browser;
mod components;
mod context;
mod pages;
mod views;

pub use app::App;

use tracing::Level;
use ui_core::logging::{self, ConsoleWriter};
use wasm_bindgen::prelude::*;

fn console_log(line: &str) {
    web_sys::console::log_1(&line.into());
}

fn console_error(line: &str) {
    web_sys::console::error_1(&line.into());
}

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn main() {
    logging::init(ConsoleWriter::new(console_log, console_error), Level::INFO);
    yew::Renderer::<App>::new().render();
}
