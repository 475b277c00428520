//! The paginated retrieval engine.
//!
//! One run walks search pages from start index 1:
//!
//! ```text
//! FETCHING ──200, ≥1 record──▶ ADVANCING ──▶ FETCHING (next page)
//!    │  ──200, 0 records────▶ DONE
//!    │  ──429, budget left──▶ RATE_LIMITED ──sleep──▶ FETCHING (same page)
//!    │  ──other / budget spent─▶ HTTP_ERROR
//!    └─ any error ───────────▶ EXCEPTION
//! ```
//!
//! Records accumulate in page order and survive every terminal state. The
//! filter pass runs only on `DONE`.

use vivino_core::{apply_filters, SearchRequest, WineRecord};

use crate::error::ScraperError;
use crate::extract::RecordExtractor;
use crate::outcome::RunOutcome;
use crate::rate_limit::{RetryPolicy, RetryState};
use crate::session::CatalogSession;
use crate::ship_to::negotiate_destination;

/// How the page loop stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Termination {
    Done,
    HttpError { status: u16, page_index: u32 },
}

/// Executes one complete run: ship-to negotiation, the page loop, and the
/// filter pass.
///
/// Never fails: every error is folded into [`RunOutcome::Exception`] together
/// with whatever was collected before it happened.
pub async fn run_search<S, E>(
    session: &mut S,
    extractor: &E,
    request: &SearchRequest,
    policy: &RetryPolicy,
) -> RunOutcome
where
    S: CatalogSession,
    E: RecordExtractor,
{
    let mut records = Vec::new();
    let mut state = RetryState::new();

    let result = drive(session, extractor, request, policy, &mut state, &mut records).await;

    match result {
        Ok(Termination::Done) => {
            let collected = records.len();
            let records = apply_filters(records, request.bounds());
            tracing::info!(
                collected,
                kept = records.len(),
                pages = state.page_index() - 1,
                "search complete"
            );
            RunOutcome::Done { records }
        }
        Ok(Termination::HttpError { status, page_index }) => {
            tracing::error!(
                http_status = status,
                page_index,
                collected = records.len(),
                "search failed with HTTP error"
            );
            RunOutcome::HttpError {
                records,
                http_status: status,
                page_index,
            }
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                page_index = state.page_index(),
                collected = records.len(),
                "search aborted"
            );
            RunOutcome::Exception {
                records,
                message: e.to_string(),
            }
        }
    }
}

async fn drive<S, E>(
    session: &mut S,
    extractor: &E,
    request: &SearchRequest,
    policy: &RetryPolicy,
    state: &mut RetryState,
    records: &mut Vec<WineRecord>,
) -> Result<Termination, ScraperError>
where
    S: CatalogSession,
    E: RecordExtractor,
{
    negotiate_destination(session, request.destination()).await?;
    paginate(session, extractor, request.query(), policy, state, records).await
}

/// The page loop. Appends each page's records to `records` as it goes so a
/// failure part-way through keeps earlier pages.
pub(crate) async fn paginate<S, E>(
    session: &mut S,
    extractor: &E,
    query: &str,
    policy: &RetryPolicy,
    state: &mut RetryState,
    records: &mut Vec<WineRecord>,
) -> Result<Termination, ScraperError>
where
    S: CatalogSession,
    E: RecordExtractor,
{
    loop {
        let page_index = state.page_index();
        let page = session.fetch_search_page(query, page_index).await?;

        if page.is_success() {
            let items = extractor.extract(&page)?;
            if items.is_empty() {
                tracing::info!(page_index, "no more results");
                return Ok(Termination::Done);
            }
            tracing::info!(page_index, count = items.len(), "collected wines from page");
            records.extend(items);
            state.advance();
            continue;
        }

        if page.is_rate_limited() {
            if let Some(delay) = state.register_rate_limit(policy) {
                tracing::warn!(
                    page_index,
                    retry_count = state.retry_count(),
                    max_retries = policy.max_retries,
                    delay_secs = delay.as_secs(),
                    "rate limited, waiting before retrying page"
                );
                tokio::time::sleep(delay).await;
                continue;
            }
            tracing::warn!(
                page_index,
                max_retries = policy.max_retries,
                "rate limit retry budget exhausted"
            );
        }

        return Ok(Termination::HttpError {
            status: page.status,
            page_index,
        });
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
