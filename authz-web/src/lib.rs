pub mod api;
pub mod auth;
pub mod components;
pub mod config;
pub mod interop;

pub use api::*;
pub use auth::AuthorizePage;
pub use components::*;
pub use config::*;
pub use interop::*;
