//! UI 層
//!
//! axum のルーティング、WebSocket / HTTP ハンドラー、シャットダウンシグナルを扱います。

pub mod handler;
mod server;
mod signal;
mod state;

pub use server::Server;
pub use state::AppState;
