//! Terminal client for the Tsudoi chat server.

pub mod domain;
pub mod error;
pub mod formatter;
pub mod roster;
pub mod runner;
pub mod session;
pub mod state;
pub mod ui;

pub use runner::run_client;
