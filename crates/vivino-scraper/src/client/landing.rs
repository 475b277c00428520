//! Landing page parsing and the ship-to write path.

use regex::Regex;
use scraper::{Html, Selector};
use vivino_core::Destination;

use crate::error::ScraperError;
use crate::types::{ShipToRequest, ShipToResponse};

use super::VivinoClient;

/// Session facts read from the storefront landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingContext {
    /// Effective ship-to destination of the session.
    pub destination: Destination,
    /// Token required by state-changing API calls; absent for some
    /// anonymous page variants.
    pub csrf_token: Option<String>,
}

/// Parses the preloaded ship-to globals and CSRF meta tag from landing HTML.
///
/// The page embeds the destination as inline script assignments:
///
/// ```text
/// window.__PRELOADED_COUNTRY_CODE__ = "us";
/// window.__PRELOADED_STATE_CODE__ = "ca";
/// ```
///
/// # Errors
///
/// Returns [`ScraperError::LandingParse`] if the country code is missing. A
/// missing state code is read as empty.
pub fn parse_landing(html: &str) -> Result<LandingContext, ScraperError> {
    let country_code = preloaded_global(html, "__PRELOADED_COUNTRY_CODE__").ok_or(
        ScraperError::LandingParse {
            field: "__PRELOADED_COUNTRY_CODE__",
        },
    )?;
    let state_code = preloaded_global(html, "__PRELOADED_STATE_CODE__").unwrap_or_default();

    let document = Html::parse_document(html);
    let csrf = Selector::parse(r#"meta[name="csrf-token"]"#).expect("valid csrf selector");
    let csrf_token = document
        .select(&csrf)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned);

    Ok(LandingContext {
        destination: Destination::new(country_code, state_code),
        csrf_token,
    })
}

fn preloaded_global(html: &str, name: &str) -> Option<String> {
    let pattern = format!(
        r#"window\.{}\s*=\s*["']([^"']*)["']"#,
        regex::escape(name)
    );
    let re = Regex::new(&pattern).expect("valid preloaded global regex");
    re.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_owned())
}

impl VivinoClient {
    pub(super) async fn fetch_landing(&self) -> Result<LandingContext, ScraperError> {
        let url = self.base_url.clone();
        let response = self
            .client
            .get(url.clone())
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        parse_landing(&body)
    }

    /// `PUT /api/ship_to/` with the CSRF token from the landing context.
    ///
    /// Returns `Ok(None)` when no token is available or the server answers
    /// with anything but 200. A 200 whose body does not match the expected
    /// shape is a [`ScraperError::Deserialize`].
    pub(super) async fn put_ship_to(
        &self,
        destination: &Destination,
    ) -> Result<Option<Destination>, ScraperError> {
        let Some(token) = self.landing.as_ref().and_then(|l| l.csrf_token.as_deref()) else {
            tracing::warn!("no csrf token on landing page, cannot change ship-to destination");
            return Ok(None);
        };

        let url = self.endpoint("api/ship_to/")?;
        let body = ShipToRequest {
            country_code: &destination.country_code,
            state_code: &destination.state_code,
        };

        let response = self
            .client
            .put(url.clone())
            .header("x-csrf-token", token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!(
                status = status.as_u16(),
                %destination,
                "ship-to update rejected"
            );
            return Ok(None);
        }

        let text = response.text().await?;
        let parsed =
            serde_json::from_str::<ShipToResponse>(&text).map_err(|e| ScraperError::Deserialize {
                context: format!("ship_to response from {url}"),
                source: e,
            })?;

        Ok(Some(parsed.ship_to.into()))
    }
}
