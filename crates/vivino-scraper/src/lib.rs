pub mod client;
pub mod engine;
pub mod error;
pub mod extract;
pub mod outcome;
pub mod rate_limit;
pub mod session;
pub mod ship_to;
pub mod types;

pub use client::VivinoClient;
pub use engine::run_search;
pub use error::ScraperError;
pub use extract::{CardExtractor, RecordExtractor};
pub use outcome::{RunOutcome, RunReport, RunStatus};
pub use rate_limit::{RetryPolicy, RetryState};
pub use session::{CatalogSession, FetchedPage};
pub use ship_to::{destination_matches, negotiate_destination, set_destination};

#[cfg(test)]
pub(crate) mod test_support;
