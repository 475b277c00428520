use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog origin without a trailing slash, e.g. `https://www.vivino.com`.
    pub base_url: String,
    pub user_agent: String,
    pub log_level: String,
    /// Directory the run report is written into.
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    /// Consecutive 429 retries allowed before a page fails the run.
    pub max_retries: u32,
    /// Seconds per backoff step; the n-th rate limit in a run waits `n * pause_multiplier_secs`.
    pub pause_multiplier_secs: u64,
}
