//! Ship-to destination negotiation.
//!
//! Search results (prices, availability) depend on the session's ship-to
//! destination, so it must match the request before any search page is
//! fetched. Negotiation runs once per run and is never retried.

use vivino_core::Destination;

use crate::error::ScraperError;
use crate::session::CatalogSession;

/// Reports whether the session's effective destination equals `destination`
/// (case-insensitive on both fields). Reads the already loaded landing context.
///
/// # Errors
///
/// [`ScraperError::LandingNotLoaded`] if no landing context is available.
pub fn destination_matches<S: CatalogSession>(
    session: &S,
    destination: &Destination,
) -> Result<bool, ScraperError> {
    let current = session.current_destination()?;
    Ok(current.matches(destination))
}

/// Attempts to move the session to `destination`.
///
/// Returns `true` only if the call succeeded and the server echoed back the
/// requested destination.
///
/// # Errors
///
/// Propagates transport and response-shape failures from the session.
pub async fn set_destination<S: CatalogSession>(
    session: &mut S,
    destination: &Destination,
) -> Result<bool, ScraperError> {
    match session.put_destination(destination).await? {
        Some(echoed) if echoed.matches(destination) => Ok(true),
        Some(echoed) => {
            tracing::warn!(
                requested = %destination,
                echoed = %echoed,
                "ship-to update echoed a different destination"
            );
            Ok(false)
        }
        None => Ok(false),
    }
}

/// Ensures the session ships to `destination` before searching.
///
/// Loads the landing context, and if the destination differs, sets it once,
/// reloads and checks again.
///
/// # Errors
///
/// - [`ScraperError::DestinationNotSet`] if the update call failed or was not echoed back.
/// - [`ScraperError::DestinationNotConfirmed`] if the reloaded landing context still disagrees.
/// - Any session error from loading the landing context.
pub async fn negotiate_destination<S: CatalogSession>(
    session: &mut S,
    destination: &Destination,
) -> Result<(), ScraperError> {
    session.load_landing().await?;

    if destination_matches(session, destination)? {
        tracing::info!(%destination, "ship-to destination already set");
        return Ok(());
    }

    tracing::info!(
        current = %session.current_destination()?,
        requested = %destination,
        "changing ship-to destination"
    );

    if !set_destination(session, destination).await? {
        return Err(ScraperError::DestinationNotSet {
            destination: destination.to_string(),
        });
    }

    session.load_landing().await?;
    if !destination_matches(session, destination)? {
        return Err(ScraperError::DestinationNotConfirmed {
            destination: destination.to_string(),
        });
    }

    tracing::info!(%destination, "ship-to destination confirmed");
    Ok(())
}

#[cfg(test)]
#[path = "ship_to_test.rs"]
mod tests;
