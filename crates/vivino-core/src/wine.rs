use serde::{Deserialize, Serialize};

/// A single wine card extracted from a search results page.
///
/// Every field except `ratings` is optional because the card markup is not
/// guaranteed to carry it; serialized field names match the persisted report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WineRecord {
    pub name: Option<String>,
    /// Absolute URL of the wine detail page.
    pub link: Option<String>,
    /// Absolute URL of the bottle thumbnail.
    pub thumb: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    /// Community average on a 0–5 scale.
    pub average_rating: Option<f64>,
    /// Number of community ratings; `0` when the card omits the count.
    #[serde(default)]
    pub ratings: u64,
    pub price: Option<f64>,
}

impl WineRecord {
    /// Rating count as a float, for comparison against numeric filter bounds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratings_f64(&self) -> f64 {
        self.ratings as f64
    }
}
