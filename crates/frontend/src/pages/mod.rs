//! Page components.

mod admin;
mod client;
mod index;

pub use admin::AdminPage;
pub use client::ClientPage;
pub use index::IndexPage;
