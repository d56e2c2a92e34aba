//! Request handlers.

mod http;
mod router;
mod websocket;

pub use http::{get_participants, health_check};
pub use router::dispatch;
pub use websocket::websocket_handler;
