use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("landing context has not been loaded")]
    LandingNotLoaded,

    #[error("landing page does not expose {field}")]
    LandingParse { field: &'static str },

    #[error("ship-to destination {destination} could not be set")]
    DestinationNotSet { destination: String },

    #[error("ship-to destination {destination} could not be confirmed")]
    DestinationNotConfirmed { destination: String },

    #[error("could not extract records from {url}: {reason}")]
    Extraction { url: String, reason: String },
}
