//! Single-room WebSocket chat server library.
//!
//! Participants join with a unique display name, then exchange public
//! broadcasts and private messages until they disconnect.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
