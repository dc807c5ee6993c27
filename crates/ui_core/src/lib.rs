//! Presentation logic shared by the BeautyBook shells.
//!
//! Everything here is independent of the rendering framework so it can be
//! exercised natively against `backend::memory::MemoryBackend`:
//! - `session`: the current identity and role, with sign-in/up/out
//! - `gate`: which of loading / auth form / shell to show
//! - `forms`: admin and client credential forms
//! - `router`: role-scoped section sets and the active tab
//! - `views`: one-shot loaders for the content panels
//! - `lifecycle`: mount liveness tokens
//! - `logging`: tracing subscriber writing to an operator console

pub mod forms;
pub mod gate;
pub mod lifecycle;
pub mod logging;
pub mod notice;
pub mod router;
pub mod session;
pub mod views;

pub use forms::{AdminLoginForm, AuthMode, ClientAuthForm, Completion};
pub use gate::{AdminGate, ClientGate, GateView};
pub use lifecycle::Liveness;
pub use notice::{Notice, NoticeVariant};
pub use router::{AdminSection, ClientSection, Icon, NavItem, Outlet, Section, TabRouter};
pub use session::{AuthState, Session};
pub use views::{Loadable, Panel};
