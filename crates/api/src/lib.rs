pub mod auth_handlers;
pub mod error;
pub mod middleware;
pub mod response;
pub mod role_handlers;
pub mod router;
pub mod state;
pub mod user_handlers;

pub use state::AppState;
