//! HTTP host for the merchant assistant
//!
//! The session/UI boundary: receives `(user_input, session_id)` over JSON
//! endpoints and returns response text. Sessions live in a concurrent map;
//! each session processes one turn at a time.

pub mod http;
pub mod session;
pub mod state;

pub use http::create_router;
pub use session::SessionManager;
pub use state::AppState;
