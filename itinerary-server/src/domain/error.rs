//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from upstream/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude or longitude outside its valid range
    #[error("invalid coordinate: ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Itinerary has no steps
    #[error("itinerary must have at least one step")]
    EmptyItinerary,
}
