//! HTTP session against the Vivino storefront.

mod landing;
mod search;

use std::time::Duration;

use reqwest::{Client, Url};
use vivino_core::{AppConfig, Destination};

use crate::error::ScraperError;
use crate::session::{CatalogSession, FetchedPage};

pub use landing::{parse_landing, LandingContext};

/// Cookie-carrying HTTP session for one run.
///
/// The ship-to destination is session state on the server side, so the same
/// client (and therefore the same cookie jar) must be used for negotiation
/// and for every search page that follows.
pub struct VivinoClient {
    client: Client,
    base_url: Url,
    landing: Option<LandingContext>,
}

impl VivinoClient {
    /// Creates a client for `base_url` with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be built.
    /// - [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;

        // Normalise to exactly one trailing slash so `Url::join` appends
        // rather than replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            landing: None,
        })
    }

    /// # Errors
    ///
    /// See [`VivinoClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// The landing context from the most recent successful load, if any.
    #[must_use]
    pub fn landing(&self) -> Option<&LandingContext> {
        self.landing.as_ref()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ScraperError> {
        self.base_url
            .join(path)
            .map_err(|e| ScraperError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }
}

impl CatalogSession for VivinoClient {
    async fn load_landing(&mut self) -> Result<(), ScraperError> {
        let context = self.fetch_landing().await?;
        tracing::debug!(
            destination = %context.destination,
            has_csrf_token = context.csrf_token.is_some(),
            "landing context loaded"
        );
        self.landing = Some(context);
        Ok(())
    }

    fn current_destination(&self) -> Result<Destination, ScraperError> {
        self.landing
            .as_ref()
            .map(|l| l.destination.clone())
            .ok_or(ScraperError::LandingNotLoaded)
    }

    async fn put_destination(
        &mut self,
        destination: &Destination,
    ) -> Result<Option<Destination>, ScraperError> {
        self.put_ship_to(destination).await
    }

    async fn fetch_search_page(
        &mut self,
        query: &str,
        start: u32,
    ) -> Result<FetchedPage, ScraperError> {
        self.get_search_page(query, start).await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
