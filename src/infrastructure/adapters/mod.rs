//! Platform adapters and the stdin event feed they share

pub mod console;
pub mod qq;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::domain::entities::GroupEvent;

/// Read stdin line by line, decode each line into an event and forward it.
/// Returns when stdin closes or the receiver goes away.
pub async fn pump_stdin<F>(events: mpsc::Sender<GroupEvent>, decode: F)
where
    F: Fn(&str) -> Option<GroupEvent>,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                if let Some(event) = decode(&line) {
                    if events.send(event).await.is_err() {
                        break;
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }
}
