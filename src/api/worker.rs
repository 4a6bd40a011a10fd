//! Async API worker task.
//!
//! Owns the `ApiClient`. Listens for `ApiCommand`s from the UI and emits
//! `ApiEvent`s back. Each request runs in its own spawned task, so a second
//! submission for the same section races the first instead of queueing
//! behind it — whichever response resolves last overwrites the section.
//! Nothing is cancelled.

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::client::ApiClient;
use super::types::{ApiCommand, ApiEvent, Section};
use crate::config;

/// The main worker entry point. Runs until the command channel is closed
/// (i.e. the TUI exits).
pub async fn run(mut cmd_rx: mpsc::Receiver<ApiCommand>, evt_tx: mpsc::Sender<ApiEvent>) {
    let base_url = config::get().api.base_url.clone();
    let client = match ApiClient::new(&base_url) {
        Ok(c) => c,
        Err(e) => {
            let _ = evt_tx
                .send(ApiEvent::Error(format!("Failed to build HTTP client: {e}")))
                .await;
            return;
        }
    };

    info!("API worker ready, backend at {base_url}");

    while let Some(cmd) = cmd_rx.recv().await {
        let client = client.clone();
        let evt_tx = evt_tx.clone();
        tokio::spawn(async move {
            match cmd {
                ApiCommand::FetchSection(section) => {
                    info!("Loading {section}");
                    let event = match client.fetch_section(section).await {
                        Ok(movies) => {
                            debug!("{section}: {} movies", movies.len());
                            ApiEvent::SectionLoaded { section, movies }
                        }
                        Err(error) => ApiEvent::SectionFailed { section, error },
                    };
                    let _ = evt_tx.send(event).await;
                }
                ApiCommand::Recommend(genres) => {
                    let section = Section::Preference;
                    info!("Requesting recommendations for {genres:?}");
                    let event = match client.recommend(&genres).await {
                        Ok(movies) => {
                            debug!("{section}: {} movies", movies.len());
                            ApiEvent::SectionLoaded { section, movies }
                        }
                        Err(error) => ApiEvent::SectionFailed { section, error },
                    };
                    let _ = evt_tx.send(event).await;
                }
            }
        });
    }

    debug!("Command channel closed — API worker exiting");
}
