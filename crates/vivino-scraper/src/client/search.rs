//! Search results page requests.

use reqwest::Url;

use crate::error::ScraperError;
use crate::session::FetchedPage;

use super::VivinoClient;

impl VivinoClient {
    /// Builds `{base}/search/wines?q={query}&start={start}` with the query
    /// URL-encoded.
    pub(super) fn search_url(&self, query: &str, start: u32) -> Result<Url, ScraperError> {
        let mut url = self.endpoint("search/wines")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("start", &start.to_string());
        Ok(url)
    }

    pub(super) async fn get_search_page(
        &self,
        query: &str,
        start: u32,
    ) -> Result<FetchedPage, ScraperError> {
        let url = self.search_url(query, start)?;
        let response = self
            .client
            .get(url.clone())
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::REFERER, self.base_url.as_str())
            .send()
            .await?;

        let status = response.status().as_u16();
        // Only successful pages are handed to the extractor.
        let body = if response.status().is_success() {
            response.text().await?
        } else {
            String::new()
        };

        tracing::debug!(%url, status, bytes = body.len(), "search page fetched");

        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
        })
    }
}
