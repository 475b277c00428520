//! Rate-limit retry accounting for the search page loop.
//!
//! Only HTTP 429 is retried. Each 429 bumps two counters:
//!
//! - `retry_count`: consecutive retries of the current page, capped by
//!   [`RetryPolicy::max_retries`] and reset whenever a page advances;
//! - `pause_multiplier`: total 429s seen in the run, never reset.
//!
//! The pause before re-requesting is `pause_multiplier * pause_unit`, so it
//! grows linearly across the whole run, not per burst.
//!
//! | 429s so far in run | Sleep with `pause_unit = 15s` |
//! |--------------------|-------------------------------|
//! | 1                  | 15 s                          |
//! | 2                  | 30 s                          |
//! | 3                  | 45 s                          |
//!
//! With `max_retries = 5` the sixth consecutive 429 on one page is fatal.

use std::time::Duration;

use vivino_core::AppConfig;

pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_PAUSE_UNIT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Consecutive 429 retries allowed for a single page.
    pub max_retries: u32,
    /// Backoff step; multiplied by the run-wide 429 count.
    pub pause_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            pause_unit: DEFAULT_PAUSE_UNIT,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            pause_unit: Duration::from_secs(config.pause_multiplier_secs),
        }
    }
}

/// Per-run cursor and retry counters owned by the page loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    page_index: u32,
    retry_count: u32,
    pause_multiplier: u32,
}

impl Default for RetryState {
    fn default() -> Self {
        Self {
            page_index: 1,
            retry_count: 0,
            pause_multiplier: 0,
        }
    }
}

impl RetryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 1-based start index of the page to request next.
    #[must_use]
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    #[must_use]
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    #[must_use]
    pub fn pause_multiplier(&self) -> u32 {
        self.pause_multiplier
    }

    /// Moves to the next page after it yielded records.
    pub fn advance(&mut self) {
        self.page_index = self.page_index.saturating_add(1);
        self.retry_count = 0;
    }

    /// Accounts for a 429 on the current page.
    ///
    /// Returns the pause to wait before re-requesting the same page, or
    /// `None` when the retry budget is exhausted and the page has failed.
    pub fn register_rate_limit(&mut self, policy: &RetryPolicy) -> Option<Duration> {
        if self.retry_count >= policy.max_retries {
            return None;
        }
        self.retry_count += 1;
        self.pause_multiplier = self.pause_multiplier.saturating_add(1);
        Some(policy.pause_unit.saturating_mul(self.pause_multiplier))
    }
}
