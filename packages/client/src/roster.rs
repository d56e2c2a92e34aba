//! Local view of who is in the room.
//!
//! Seeded from the join snapshot and kept current by presence events.

use std::collections::HashMap;

use tsudoi_server::infrastructure::dto::websocket::ParticipantInfo;

/// Participant id → display name
#[derive(Debug, Clone, Default)]
pub struct Roster {
    names: HashMap<String, String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole roster with a snapshot
    pub fn seed(&mut self, snapshot: &[ParticipantInfo]) {
        self.names = snapshot
            .iter()
            .map(|p| (p.id.clone(), p.display_name.clone()))
            .collect();
    }

    /// Add or overwrite an entry
    pub fn insert(&mut self, id: &str, display_name: &str) {
        self.names.insert(id.to_string(), display_name.to_string());
    }

    /// Remove an entry, returning its last known name
    pub fn remove(&mut self, id: &str) -> Option<String> {
        self.names.remove(id)
    }

    /// Rename an entry, returning the previous name
    pub fn rename(&mut self, id: &str, new_name: &str) -> Option<String> {
        self.names.insert(id.to_string(), new_name.to_string())
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Find a participant id by exact display name
    pub fn id_of(&self, display_name: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, name)| name.as_str() == display_name)
            .map(|(id, _)| id.as_str())
    }

    /// Entries ordered by display name
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .names
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(b.0)));
        entries
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
