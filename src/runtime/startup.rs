use std::io::Write;
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::SetSize;

use crate::artwork::{Enricher, ItunesCatalog, countries_for_locale};
use crate::config;
use crate::queue::QueueAction;
use crate::session::menu::system_locale;
use crate::session::{Session, ShellMsg, update};

/// Ask the terminal for the size persisted by the previous session.
pub fn restore_window_size(out: &mut impl Write, session: &Session, settings: &config::Settings) {
    if !settings.startup.restore_window_size || !session.restored_window() {
        return;
    }
    let w = session.window();
    // Many terminals ignore the request; that is fine.
    if let Err(e) = execute!(out, SetSize(w.window_width, w.window_height)) {
        tracing::debug!(error = %e, "terminal refused resize");
    }
}

/// Build the artwork enricher, or `None` when lookups are disabled.
pub fn build_enricher(
    settings: &config::Settings,
    client: reqwest::Client,
    tx: Sender<QueueAction>,
) -> Option<Enricher<ItunesCatalog>> {
    let art = &settings.artwork;
    if !art.enabled {
        tracing::info!("artwork lookup disabled");
        return None;
    }
    let configured: Vec<String> = art
        .countries
        .iter()
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .collect();
    let countries = if configured.is_empty() {
        countries_for_locale(&system_locale())
    } else {
        configured
    };
    let catalog = ItunesCatalog::new(
        client,
        art.search_endpoint.clone(),
        Duration::from_millis(art.request_timeout_ms),
    );
    Some(Enricher::new(catalog, countries, art.batch_size, tx))
}

/// Check for a newer release in the background and post the result.
pub fn spawn_update_check(
    rt: &tokio::runtime::Handle,
    client: reqwest::Client,
    tx: Sender<ShellMsg>,
) {
    rt.spawn(async move {
        let current = env!("CARGO_PKG_VERSION");
        match update::check_for_update(&client, update::LATEST_RELEASE_URL, current).await {
            Ok(Some(latest)) => {
                tracing::info!(%latest, current, "update available");
                let _ = tx.send(ShellMsg::UpdateAvailable(latest));
            }
            Ok(None) => tracing::debug!(current, "up to date"),
            Err(e) => tracing::warn!(error = %e, "update check failed"),
        }
    });
}
