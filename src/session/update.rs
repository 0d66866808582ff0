//! Startup update check against the project's latest GitHub release.

use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;

pub const LATEST_RELEASE_URL: &str =
    "https://api.github.com/repos/piro0919/mac-classic-player/releases/latest";

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Ask GitHub for the latest release and return its version when it is
/// newer than `current`.
pub async fn check_for_update(
    client: &reqwest::Client,
    url: &str,
    current: &str,
) -> Result<Option<String>> {
    let release: LatestRelease = client
        .get(url)
        .header(reqwest::header::USER_AGENT, concat!("classic-player/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(10))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let latest = release.tag_name.trim_start_matches('v').to_string();
    Ok(is_newer(&latest, current).then_some(latest))
}

/// Compare dotted numeric versions. Non-numeric parts compare as zero.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    fn parts(v: &str) -> Vec<u64> {
        v.trim_start_matches('v')
            .split(['.', '-', '+'])
            .take(3)
            .map(|p| p.parse().unwrap_or(0))
            .collect()
    }
    let (a, b) = (parts(candidate), parts(current));
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        if x != y {
            return x > y;
        }
    }
    false
}
