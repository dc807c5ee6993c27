//! Reusable UI components.

mod admin_login;
mod bottom_nav;
mod client_auth;
mod field;
mod loading;
mod placeholder;
mod stat_card;
mod toaster;

pub use admin_login::AdminLogin;
pub use bottom_nav::BottomNav;
pub use client_auth::ClientAuth;
pub use loading::Loading;
pub use placeholder::Placeholder;
pub use stat_card::StatCard;
pub use toaster::{Toaster, use_toast};
