//! Itinerary resolution against the two backend versions.
//!
//! The legacy endpoint is asked first. If it fails or finds nothing, the
//! canonical endpoint is asked exactly once, provided the origin is given as
//! coordinates. Attempts never overlap.

use std::fmt;
use std::future::Future;

use crate::backend::{
    BackendClient, BackendError, BusLine, CanonicalQuery, ItineraryResponse, LegacyQuery, Origin,
    Stop,
};

use super::config::ResolverConfig;
use super::fallback::{Attempt, AttemptOutcome, Exhausted, try_in_order};

const LEGACY: &str = "legacy";
const CANONICAL: &str = "canonical";

/// Why a resolution was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The caller's cancellation signal fired.
    Caller,
    /// The configured deadline elapsed.
    Deadline,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Caller => f.write_str("cancelled by caller"),
            CancelReason::Deadline => f.write_str("deadline elapsed"),
        }
    }
}

/// Error from itinerary resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Request rejected before any backend call
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The final backend attempt failed
    #[error("{attempt} itinerary request failed{}: {source}", fallback_note(.fell_back_from))]
    Backend {
        attempt: &'static str,
        fell_back_from: Vec<&'static str>,
        source: BackendError,
    },

    /// Every backend version answered with zero itineraries
    #[error("no itineraries found")]
    NoItineraries,

    /// Resolution stopped before it finished
    #[error("resolution {0}")]
    Cancelled(CancelReason),
}

fn fallback_note(fell_back_from: &[&'static str]) -> String {
    if fell_back_from.is_empty() {
        String::new()
    } else {
        format!(" (after falling back from {})", fell_back_from.join(", "))
    }
}

/// Request for itinerary resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryRequest {
    pub origin: Origin,
    pub destination_address: String,
    pub city_id: u32,
}

impl ItineraryRequest {
    /// Create a new itinerary request.
    pub fn new(origin: Origin, destination_address: impl Into<String>, city_id: u32) -> Self {
        Self {
            origin,
            destination_address: destination_address.into(),
            city_id,
        }
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.destination_address.trim().is_empty() {
            return Err(ResolveError::InvalidRequest(
                "destination address is empty".to_string(),
            ));
        }

        if self.city_id == 0 {
            return Err(ResolveError::InvalidRequest(
                "city_id must be positive".to_string(),
            ));
        }

        match &self.origin {
            Origin::Address(address) if address.trim().is_empty() => Err(
                ResolveError::InvalidRequest("origin address is empty".to_string()),
            ),
            Origin::Coordinates(c) if !c.is_valid() => Err(ResolveError::InvalidRequest(format!(
                "origin {c} is out of range"
            ))),
            _ => Ok(()),
        }
    }

    fn legacy_query(&self) -> LegacyQuery {
        LegacyQuery {
            destination_address: self.destination_address.clone(),
            city_id: self.city_id,
            origin: self.origin.clone(),
        }
    }

    /// The canonical endpoint only takes coordinates, so an address origin
    /// has no canonical query.
    fn canonical_query(&self) -> Option<CanonicalQuery> {
        match &self.origin {
            Origin::Coordinates(c) => Some(CanonicalQuery {
                destination_address: self.destination_address.clone(),
                origin: *c,
            }),
            Origin::Address(_) => None,
        }
    }
}

/// Trait for the upstream transit backend.
///
/// This abstraction allows the resolver to be tested with mock data.
pub trait ItineraryBackend: Send + Sync {
    /// Itineraries from the legacy single-ride endpoint.
    fn legacy_itinerary(
        &self,
        query: &LegacyQuery,
    ) -> impl Future<Output = Result<ItineraryResponse, BackendError>> + Send;

    /// Itineraries from the canonical multi-step endpoint.
    fn canonical_itinerary(
        &self,
        query: &CanonicalQuery,
    ) -> impl Future<Output = Result<ItineraryResponse, BackendError>> + Send;

    /// One transit line by id.
    fn find_line(
        &self,
        line_id: u32,
    ) -> impl Future<Output = Result<Option<BusLine>, BackendError>> + Send;

    /// Stops served by a line, in route order.
    fn stops_by_line(
        &self,
        line_id: u32,
    ) -> impl Future<Output = Result<Vec<Stop>, BackendError>> + Send;
}

impl ItineraryBackend for BackendClient {
    async fn legacy_itinerary(
        &self,
        query: &LegacyQuery,
    ) -> Result<ItineraryResponse, BackendError> {
        BackendClient::legacy_itinerary(self, query).await
    }

    async fn canonical_itinerary(
        &self,
        query: &CanonicalQuery,
    ) -> Result<ItineraryResponse, BackendError> {
        BackendClient::canonical_itinerary(self, query).await
    }

    async fn find_line(&self, line_id: u32) -> Result<Option<BusLine>, BackendError> {
        BackendClient::find_line(self, line_id).await
    }

    async fn stops_by_line(&self, line_id: u32) -> Result<Vec<Stop>, BackendError> {
        BackendClient::stops_by_line(self, line_id).await
    }
}

/// A backend response is only a result if it carries itineraries.
fn classify(
    result: Result<ItineraryResponse, BackendError>,
) -> AttemptOutcome<ItineraryResponse, BackendError> {
    match result {
        Ok(response) if response.is_empty() => AttemptOutcome::Empty,
        Ok(response) => AttemptOutcome::Found(response),
        Err(e) => AttemptOutcome::Failed(e),
    }
}

/// Itinerary resolver with version fallback.
#[derive(Debug, Clone)]
pub struct Resolver<B> {
    backend: B,
    config: ResolverConfig,
}

impl<B: ItineraryBackend> Resolver<B> {
    /// Create a new resolver.
    pub fn new(backend: B, config: ResolverConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolve a request to a non-empty itinerary response.
    ///
    /// Bounded by the configured deadline, if any.
    pub async fn resolve_itinerary(
        &self,
        request: &ItineraryRequest,
    ) -> Result<ItineraryResponse, ResolveError> {
        request.validate()?;

        match self.config.deadline() {
            Some(deadline) => tokio::time::timeout(deadline, self.run(request))
                .await
                .map_err(|_| {
                    tracing::warn!(?deadline, "itinerary resolution timed out");
                    ResolveError::Cancelled(CancelReason::Deadline)
                })?,
            None => self.run(request).await,
        }
    }

    /// Resolve, giving up as soon as `cancel` completes.
    ///
    /// Whatever request is in flight at that point is dropped.
    pub async fn resolve_with_cancel<C>(
        &self,
        request: &ItineraryRequest,
        cancel: C,
    ) -> Result<ItineraryResponse, ResolveError>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            result = self.resolve_itinerary(request) => result,
            () = cancel => {
                tracing::info!("itinerary resolution cancelled by caller");
                Err(ResolveError::Cancelled(CancelReason::Caller))
            }
        }
    }

    async fn run(&self, request: &ItineraryRequest) -> Result<ItineraryResponse, ResolveError> {
        let backend = &self.backend;
        let legacy_query = request.legacy_query();

        let mut attempts = vec![Attempt::new(LEGACY, async move {
            classify(backend.legacy_itinerary(&legacy_query).await)
        })];
        match request.canonical_query() {
            Some(query) => attempts.push(Attempt::new(CANONICAL, async move {
                classify(backend.canonical_itinerary(&query).await)
            })),
            None => tracing::debug!("address origin; no canonical fallback"),
        }

        match try_in_order(attempts).await {
            Ok(response) => {
                tracing::debug!(
                    itineraries = response.itinerary_count(),
                    canonical = response.is_canonical(),
                    "itineraries resolved"
                );
                Ok(response)
            }
            Err(Exhausted::Failed {
                label,
                error,
                fell_back_from,
            }) => Err(ResolveError::Backend {
                attempt: label,
                fell_back_from,
                source: error,
            }),
            Err(Exhausted::Empty { .. }) => Err(ResolveError::NoItineraries),
        }
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
