//! Immutable search inputs: query term, ship-to destination and filter bounds.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Country used when the caller supplies none.
pub const DEFAULT_COUNTRY: &str = "US";

/// State assumed for US destinations when the caller supplies none.
pub const DEFAULT_US_STATE: &str = "CA";

/// The shipping destination the catalog session must be pinned to before
/// search results are trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub country_code: String,
    pub state_code: String,
}

impl Destination {
    #[must_use]
    pub fn new(country_code: impl Into<String>, state_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            state_code: state_code.into(),
        }
    }

    /// Applies the invocation defaults: country falls back to `US`, and a US
    /// destination without a state falls back to `CA`. Other countries keep
    /// an empty state code.
    #[must_use]
    pub fn resolve(country: Option<&str>, state: Option<&str>) -> Self {
        let country = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COUNTRY);
        let state = state.map(str::trim).unwrap_or_default();

        let state = if state.is_empty() && country.eq_ignore_ascii_case(DEFAULT_COUNTRY) {
            DEFAULT_US_STATE
        } else {
            state
        };

        Self::new(country, state)
    }

    /// Case-insensitive comparison on both fields.
    #[must_use]
    pub fn matches(&self, other: &Destination) -> bool {
        self.country_code.eq_ignore_ascii_case(&other.country_code)
            && self.state_code.eq_ignore_ascii_case(&other.state_code)
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.state_code.is_empty() {
            write!(f, "{}", self.country_code)
        } else {
            write!(f, "{}/{}", self.country_code, self.state_code)
        }
    }
}

/// Optional numeric bounds applied to the accumulated records once a run
/// completes. `min <= max` is not checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterBounds {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_ratings: Option<f64>,
    pub max_ratings: Option<f64>,
    pub min_average: Option<f64>,
    pub max_average: Option<f64>,
    /// Keep records without a price even when `min_price` is set.
    pub include_unpriced: bool,
}

impl FilterBounds {
    /// Returns `true` when no bound is set, i.e. filtering is the identity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.named().iter().all(|(_, v)| v.is_none())
    }

    fn named(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("min_price", self.min_price),
            ("max_price", self.max_price),
            ("min_ratings", self.min_ratings),
            ("max_ratings", self.max_ratings),
            ("min_average", self.min_average),
            ("max_average", self.max_average),
        ]
    }

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidBound`] for the first bound that is negative,
    /// `NaN` or infinite.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in self.named() {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(CoreError::InvalidBound { name, value });
                }
            }
        }
        Ok(())
    }
}

/// One run's worth of input. Built once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    query: String,
    destination: Destination,
    bounds: FilterBounds,
}

impl SearchRequest {
    /// # Errors
    ///
    /// - [`CoreError::EmptyQuery`] if `query` is blank.
    /// - [`CoreError::InvalidBound`] if any filter bound is out of range.
    pub fn new(
        query: impl Into<String>,
        destination: Destination,
        bounds: FilterBounds,
    ) -> Result<Self, CoreError> {
        let query = query.into();
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyQuery);
        }
        bounds.validate()?;
        Ok(Self {
            query: trimmed.to_string(),
            destination,
            bounds,
        })
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    #[must_use]
    pub fn bounds(&self) -> &FilterBounds {
        &self.bounds
    }
}
