//! Wire types for the catalog's `ship_to` API.
//!
//! `PUT /api/ship_to/` accepts `{"country_code": "us", "state_code": "ca"}`
//! and echoes the effective destination back under `ship_to`. Codes come
//! back lowercase on some responses and uppercase on others, so callers
//! compare them case-insensitively.

use serde::{Deserialize, Serialize};
use vivino_core::Destination;

/// Request body for `PUT /api/ship_to/`.
#[derive(Debug, Serialize)]
pub struct ShipToRequest<'a> {
    pub country_code: &'a str,
    pub state_code: &'a str,
}

/// Response body from `PUT /api/ship_to/`.
#[derive(Debug, Deserialize)]
pub struct ShipToResponse {
    pub ship_to: ShipTo,
}

#[derive(Debug, Deserialize)]
pub struct ShipTo {
    pub country_code: String,
    /// Absent or `null` for countries without regional variants.
    #[serde(default)]
    pub state_code: Option<String>,
}

impl From<ShipTo> for Destination {
    fn from(ship_to: ShipTo) -> Self {
        Destination::new(ship_to.country_code, ship_to.state_code.unwrap_or_default())
    }
}
