//! Message formatting utilities for client display.

use tsudoi_shared::time::timestamp_to_local_clock;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the roster, marking the current participant
    ///
    /// # Arguments
    ///
    /// * `entries` - `(id, display_name)` pairs, already ordered
    /// * `self_id` - The current participant's id (to mark as "me")
    pub fn format_roster(entries: &[(&str, &str)], self_id: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));
        output.push_str(&format!("Participants ({}):\n", entries.len()));

        if entries.is_empty() {
            output.push_str("(No participants)\n");
        } else {
            for (id, name) in entries {
                let me_suffix = if *id == self_id { " (me)" } else { "" };
                output.push_str(&format!("{}{}\n", name, me_suffix));
            }
        }

        output.push_str(&format!("{}\n", RULE));
        output
    }

    /// Format a participant-joined notification
    pub fn format_participant_joined(display_name: &str) -> String {
        format!("\n+ {} joined\n", display_name)
    }

    /// Format a participant-left notification
    pub fn format_participant_left(display_name: &str) -> String {
        format!("\n- {} left\n", display_name)
    }

    /// Format a participant-renamed notification
    pub fn format_participant_renamed(old_name: &str, new_name: &str) -> String {
        format!("\n* {} is now known as {}\n", old_name, new_name)
    }

    /// Format a public message
    ///
    /// # Arguments
    ///
    /// * `from` - The display name of the sender
    /// * `text` - The message text
    /// * `sent_at` - Unix timestamp when the message was sent (milliseconds)
    pub fn format_public_message(from: &str, text: &str, sent_at: i64) -> String {
        format!(
            "\n[{}] {}: {}\n",
            timestamp_to_local_clock(sent_at),
            from,
            text
        )
    }

    /// Format a private message received from another participant
    pub fn format_private_incoming(from: &str, text: &str, sent_at: i64) -> String {
        format!(
            "\n[{}] (private) {} -> me: {}\n",
            timestamp_to_local_clock(sent_at),
            from,
            text
        )
    }

    /// Format the local copy of a private message this client sent
    pub fn format_private_outgoing(to: &str, text: &str, sent_at: i64) -> String {
        format!(
            "\n[{}] (private) me -> {}: {}\n",
            timestamp_to_local_clock(sent_at),
            to,
            text
        )
    }

    /// Format the confirmation of this client's own rename
    pub fn format_renamed_self(new_name: &str) -> String {
        format!("\n* You are now known as {}\n", new_name)
    }

    /// Format an error reported by the server or by the input parser
    pub fn format_error(message: &str) -> String {
        format!("\n! {}\n", message)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
