use std::future::Future;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;

/// Entity kinds tried for every search term, in order.
pub const ENTITIES: [&str; 2] = ["song", "album"];

/// One catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub entity: &'static str,
    pub country: String,
}

/// A searchable artwork catalog.
pub trait ArtworkCatalog: Send + Sync {
    /// Return the artwork URL of the first result, if any.
    fn search(&self, query: &SearchQuery) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// The iTunes Search API.
pub struct ItunesCatalog {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "artworkUrl100")]
    artwork_url_100: Option<String>,
}

impl ItunesCatalog {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

impl ArtworkCatalog for ItunesCatalog {
    async fn search(&self, query: &SearchQuery) -> Result<Option<String>> {
        let response: SearchResponse = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("term", query.term.as_str()),
                ("media", "music"),
                ("entity", query.entity),
                ("country", query.country.as_str()),
                ("limit", "1"),
            ])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .results
            .into_iter()
            .next()
            .and_then(|r| r.artwork_url_100)
            .filter(|u| !u.is_empty()))
    }
}

/// Candidate search terms: "artist album", artist, album. Empty and
/// duplicate terms are skipped.
pub fn search_terms(artist: Option<&str>, album: Option<&str>) -> Vec<String> {
    let artist = artist.map(str::trim).filter(|s| !s.is_empty());
    let album = album.map(str::trim).filter(|s| !s.is_empty());

    let mut terms: Vec<String> = Vec::with_capacity(3);
    let combined = match (artist, album) {
        (Some(a), Some(b)) => Some(format!("{a} {b}")),
        _ => None,
    };
    for term in [combined.as_deref(), artist, album].into_iter().flatten() {
        if !terms.iter().any(|t| t == term) {
            terms.push(term.to_string());
        }
    }
    terms
}

/// Storefront countries to search: Japanese locales try JP first.
pub fn countries_for_locale(locale: &str) -> Vec<String> {
    if crate::session::menu::is_japanese(locale) {
        vec!["JP".to_string(), "US".to_string()]
    } else {
        vec!["US".to_string()]
    }
}

/// Swap the 100px thumbnail for the 600px variant.
pub fn upscale_artwork(url: &str) -> String {
    url.replace("100x100", "600x600")
}

/// Try every country × term × entity combination until one yields artwork,
/// returned upscaled.
///
/// Failed queries are logged and skipped.
pub async fn find_artwork<C: ArtworkCatalog>(
    catalog: &C,
    countries: &[String],
    artist: Option<&str>,
    album: Option<&str>,
) -> Option<String> {
    let terms = search_terms(artist, album);
    for country in countries {
        for term in &terms {
            for entity in ENTITIES {
                let query = SearchQuery {
                    term: term.clone(),
                    entity,
                    country: country.clone(),
                };
                match catalog.search(&query).await {
                    Ok(Some(url)) => return Some(upscale_artwork(&url)),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::debug!(
                            term = %query.term,
                            entity,
                            country = %query.country,
                            error = %e,
                            "artwork query failed"
                        );
                    }
                }
            }
        }
    }
    None
}
