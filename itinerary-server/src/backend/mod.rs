//! Transit backend API client.
//!
//! The backend serves itineraries in two schemas: a legacy single-ride
//! `lines` list and a canonical multi-step `v2_itin` list. This module talks
//! to both endpoints and decodes either schema into [`ItineraryResponse`].

mod client;
mod envelope;
mod error;
mod mock;
mod query;
mod types;

pub use client::{BackendClient, BackendConfig};
pub use envelope::{ENVELOPE_KEY, decode_payload, unwrap_envelope};
pub use error::BackendError;
pub use mock::MockBackend;
pub use query::{CanonicalQuery, LegacyQuery, Origin};
pub use types::{
    BusLine, ItineraryBody, ItineraryResponse, LegacyLine, LegacyStop, Place,
    RawItineraryResponse, Stop,
};
