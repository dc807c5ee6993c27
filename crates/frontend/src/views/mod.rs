//! Content views rendered inside the shells.

mod admin_dashboard;
mod admin_menu;
mod client_about;
mod client_home;
mod client_professionals;
mod client_services;

pub use admin_dashboard::AdminDashboard;
pub use admin_menu::AdminMenu;
pub use client_about::ClientAbout;
pub use client_home::ClientHome;
pub use client_professionals::ClientProfessionals;
pub use client_services::ClientServices;
