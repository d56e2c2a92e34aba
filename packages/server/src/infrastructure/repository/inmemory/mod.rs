//! InMemory Repository 実装

mod participant;
mod session;

pub use participant::InMemoryParticipantRepository;
pub use session::InMemorySessionRepository;
