//! The seam between the retrieval engine and whatever actually talks to the
//! catalog. The engine only ever sees a `&mut impl CatalogSession`, so two runs
//! never share session state.

use vivino_core::Destination;

use crate::error::ScraperError;

/// A fetched search results page. Non-2xx responses are returned as pages
/// too, so callers can tell a 429 apart from other failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// An authenticated browsing session against the catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogSession {
    /// Loads (or reloads) the landing context that carries the session's
    /// effective ship-to destination and request credentials.
    async fn load_landing(&mut self) -> Result<(), ScraperError>;

    /// The effective ship-to destination from the most recent landing load.
    ///
    /// # Errors
    ///
    /// [`ScraperError::LandingNotLoaded`] if [`Self::load_landing`] has not succeeded yet.
    fn current_destination(&self) -> Result<Destination, ScraperError>;

    /// Issues the single state-changing call that moves the session to
    /// `destination`. Returns the destination echoed by the server, or `None`
    /// when the call could not be made or was rejected.
    async fn put_destination(
        &mut self,
        destination: &Destination,
    ) -> Result<Option<Destination>, ScraperError>;

    /// Fetches the search results page starting at `start` (1-based).
    ///
    /// Only transport failures are errors; every HTTP status is returned in
    /// the [`FetchedPage`].
    async fn fetch_search_page(
        &mut self,
        query: &str,
        start: u32,
    ) -> Result<FetchedPage, ScraperError>;
}
