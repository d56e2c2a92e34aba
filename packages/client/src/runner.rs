//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    domain::{should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::run_client_session,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the chat client, reconnecting after transport failures
pub async fn run_client(
    url: String,
    display_name: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            display_name,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        let error = match run_client_session(&url, &display_name).await {
            Ok(_) => {
                tracing::info!("Client session ended normally");
                // User exit, don't reconnect
                return Ok(());
            }
            Err(e) => match e.downcast::<ClientError>() {
                Ok(client_error) => *client_error,
                // Anything else (e.g. serialization) is not worth retrying
                Err(other) => return Err(other),
            },
        };

        if should_exit_immediately(&error) {
            tracing::error!("{}", error);
            tracing::error!(
                "Cannot join as '{}'. Choose another name with --name.",
                display_name
            );
            return Err(Box::new(error));
        }

        tracing::warn!("Connection lost: {}", error);
        reconnect_count += 1;

        if !should_attempt_reconnect(&error, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                MAX_RECONNECT_ATTEMPTS
            );
            return Err(Box::new(error));
        }

        tracing::info!(
            "Reconnecting in {} seconds... (attempt {}/{})",
            RECONNECT_INTERVAL_SECS,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
    }
}
