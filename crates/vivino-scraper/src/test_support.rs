//! Scripted in-memory session and extractor for engine and negotiation tests.

use std::collections::VecDeque;

use vivino_core::{Destination, WineRecord};

use crate::error::ScraperError;
use crate::extract::RecordExtractor;
use crate::session::{CatalogSession, FetchedPage};

/// How the fake server reacts to a ship-to update.
#[derive(Debug, Clone)]
pub(crate) enum PutBehavior {
    /// Applies the destination and echoes it.
    Apply,
    /// Echoes the destination but the session keeps its old one.
    EchoWithoutApplying,
    /// Rejects the call (no token, non-200).
    Reject,
    /// Echoes a different destination.
    EchoOther(Destination),
}

/// One scripted response to a search page request.
#[derive(Debug, Clone)]
pub(crate) enum Step {
    /// 200 with this many cards.
    Records(usize),
    /// Non-2xx status.
    Status(u16),
    /// 200 whose body the extractor cannot interpret.
    Malformed,
    /// The request itself fails.
    SessionError,
}

pub(crate) struct FakeSession {
    pub server_destination: Destination,
    pub landing: Option<Destination>,
    pub put_behavior: PutBehavior,
    pub steps: VecDeque<Step>,
    pub landing_loads: u32,
    pub put_calls: Vec<Destination>,
    pub requested_pages: Vec<u32>,
}

impl FakeSession {
    pub(crate) fn new(server_destination: Destination, steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            server_destination,
            landing: None,
            put_behavior: PutBehavior::Apply,
            steps: steps.into_iter().collect(),
            landing_loads: 0,
            put_calls: Vec::new(),
            requested_pages: Vec::new(),
        }
    }

    pub(crate) fn with_put_behavior(mut self, behavior: PutBehavior) -> Self {
        self.put_behavior = behavior;
        self
    }
}

fn session_error() -> ScraperError {
    let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
    ScraperError::Deserialize {
        context: "scripted session failure".to_owned(),
        source,
    }
}

impl CatalogSession for FakeSession {
    async fn load_landing(&mut self) -> Result<(), ScraperError> {
        self.landing_loads += 1;
        self.landing = Some(self.server_destination.clone());
        Ok(())
    }

    fn current_destination(&self) -> Result<Destination, ScraperError> {
        self.landing.clone().ok_or(ScraperError::LandingNotLoaded)
    }

    async fn put_destination(
        &mut self,
        destination: &Destination,
    ) -> Result<Option<Destination>, ScraperError> {
        self.put_calls.push(destination.clone());
        Ok(match &self.put_behavior {
            PutBehavior::Apply => {
                self.server_destination = destination.clone();
                Some(destination.clone())
            }
            PutBehavior::EchoWithoutApplying => Some(destination.clone()),
            PutBehavior::Reject => None,
            PutBehavior::EchoOther(other) => Some(other.clone()),
        })
    }

    async fn fetch_search_page(
        &mut self,
        _query: &str,
        start: u32,
    ) -> Result<FetchedPage, ScraperError> {
        self.requested_pages.push(start);
        let url = format!("fake://search?start={start}");
        let step = self.steps.pop_front().unwrap_or(Step::Records(0));
        match step {
            Step::Records(n) => Ok(FetchedPage {
                url,
                status: 200,
                body: n.to_string(),
            }),
            Step::Status(status) => Ok(FetchedPage {
                url,
                status,
                body: String::new(),
            }),
            Step::Malformed => Ok(FetchedPage {
                url,
                status: 200,
                body: "garbled".to_owned(),
            }),
            Step::SessionError => Err(session_error()),
        }
    }
}

/// Reads the body as a card count and names each record `{url}#{i}`.
pub(crate) struct CountingExtractor;

impl RecordExtractor for CountingExtractor {
    fn extract(&self, page: &FetchedPage) -> Result<Vec<WineRecord>, ScraperError> {
        let count: usize = page.body.parse().map_err(|_| ScraperError::Extraction {
            url: page.url.clone(),
            reason: "unrecognised card markup".to_owned(),
        })?;
        Ok((0..count)
            .map(|i| WineRecord {
                name: Some(format!("{}#{i}", page.url)),
                ..WineRecord::default()
            })
            .collect())
    }
}
