mod report;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vivino_core::{Destination, FilterBounds, SearchRequest};
use vivino_scraper::{run_search, CardExtractor, RetryPolicy, VivinoClient};

#[derive(Debug, Parser)]
#[command(name = "vivino-cli")]
#[command(about = "Search Vivino for wines and write the matches to a JSON report")]
struct Cli {
    /// Free-text search query.
    #[arg(long)]
    name: String,

    /// Ship-to country code.
    #[arg(long, default_value = "US")]
    country: String,

    /// Ship-to state code. Defaults to `CA` when shipping to the US.
    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    min_price: Option<f64>,

    #[arg(long)]
    max_price: Option<f64>,

    #[arg(long)]
    min_ratings: Option<f64>,

    #[arg(long)]
    max_ratings: Option<f64>,

    #[arg(long)]
    min_average: Option<f64>,

    #[arg(long)]
    max_average: Option<f64>,

    /// Keep wines without a listed price even when `--min-price` is set.
    #[arg(long)]
    no_price_included: bool,

    /// Directory for the report file (overrides `VIVINO_OUTPUT_DIR`).
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl Cli {
    fn destination(&self) -> Destination {
        Destination::resolve(Some(&self.country), self.state.as_deref())
    }

    fn bounds(&self) -> FilterBounds {
        FilterBounds {
            min_price: self.min_price,
            max_price: self.max_price,
            min_ratings: self.min_ratings,
            max_ratings: self.max_ratings,
            min_average: self.min_average,
            max_average: self.max_average,
            include_unpriced: self.no_price_included,
        }
    }

    fn search_request(&self) -> Result<SearchRequest, vivino_core::CoreError> {
        SearchRequest::new(self.name.clone(), self.destination(), self.bounds())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = vivino_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let request = cli.search_request()?;
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());

    let mut client = VivinoClient::from_config(&config)?;
    let policy = RetryPolicy::from_config(&config);

    let outcome = run_search(&mut client, &CardExtractor::new(), &request, &policy).await;
    let status = outcome.status();

    // Persisting and releasing the session are independent: a failed write
    // is logged and the client is still dropped.
    match report::write_report(&output_dir, &outcome.into_report(), chrono::Utc::now()) {
        Ok(path) => tracing::info!(path = %path.display(), "report written"),
        Err(e) => tracing::error!(dir = %output_dir.display(), "failed to write report: {e:#}"),
    }
    drop(client);

    tracing::info!(?status, "finished");
    Ok(())
}

#[cfg(test)]
mod tests;
