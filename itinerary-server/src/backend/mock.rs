//! Mock backend for running without network access.
//!
//! Loads sample payloads from JSON files and serves them as if they were
//! live backend responses, envelope and all.

use std::collections::HashMap;
use std::path::Path;

use crate::resolve::ItineraryBackend;

use super::envelope::decode_payload;
use super::error::BackendError;
use super::query::{CanonicalQuery, LegacyQuery};
use super::types::{BusLine, ItineraryResponse, RawItineraryResponse, Stop};

const LEGACY_FILE: &str = "legacy.json";
const CANONICAL_FILE: &str = "canonical.json";
const LINES_FILE: &str = "lines.json";
const STOPS_FILE: &str = "stops.json";

/// Mock backend that serves data from JSON files.
///
/// Expects any of `legacy.json`, `canonical.json`, `lines.json` and
/// `stops.json` (an object keyed by line id) in the data directory. An
/// itinerary endpoint whose file is missing fails every call with
/// [`BackendError::NotConfigured`], which the resolver treats like any
/// other failed attempt. Missing line data just finds nothing.
#[derive(Debug, Clone)]
pub struct MockBackend {
    legacy: Option<String>,
    canonical: Option<String>,
    lines: Option<String>,
    stops: Option<String>,
}

impl MockBackend {
    /// Create a new mock backend by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, BackendError> {
        let data_dir = data_dir.as_ref();

        if !data_dir.is_dir() {
            return Err(BackendError::NotConfigured(format!(
                "mock data directory {data_dir:?} does not exist"
            )));
        }

        let backend = Self {
            legacy: read_optional(data_dir, LEGACY_FILE)?,
            canonical: read_optional(data_dir, CANONICAL_FILE)?,
            lines: read_optional(data_dir, LINES_FILE)?,
            stops: read_optional(data_dir, STOPS_FILE)?,
        };

        if backend.legacy.is_none() && backend.canonical.is_none() {
            return Err(BackendError::NotConfigured(format!(
                "no mock itinerary files found in {data_dir:?}"
            )));
        }

        Ok(backend)
    }

    fn itinerary(&self, body: Option<&str>, file: &str) -> Result<ItineraryResponse, BackendError> {
        let body = body.ok_or_else(|| BackendError::NotConfigured(format!("no mock {file}")))?;
        let raw: RawItineraryResponse = decode_payload(body)?;
        ItineraryResponse::from_raw(raw)
    }
}

fn read_optional(dir: &Path, file: &str) -> Result<Option<String>, BackendError> {
    let path = dir.join(file);
    if !path.is_file() {
        return Ok(None);
    }
    std::fs::read_to_string(&path)
        .map(Some)
        .map_err(|e| BackendError::NotConfigured(format!("failed to read {path:?}: {e}")))
}

impl ItineraryBackend for MockBackend {
    /// Query parameters are ignored; mock data is static.
    async fn legacy_itinerary(
        &self,
        _query: &LegacyQuery,
    ) -> Result<ItineraryResponse, BackendError> {
        self.itinerary(self.legacy.as_deref(), LEGACY_FILE)
    }

    async fn canonical_itinerary(
        &self,
        _query: &CanonicalQuery,
    ) -> Result<ItineraryResponse, BackendError> {
        self.itinerary(self.canonical.as_deref(), CANONICAL_FILE)
    }

    async fn find_line(&self, line_id: u32) -> Result<Option<BusLine>, BackendError> {
        let Some(body) = self.lines.as_deref() else {
            return Ok(None);
        };
        let lines: Vec<BusLine> = decode_payload(body)?;
        Ok(lines.into_iter().find(|line| line.id == line_id))
    }

    async fn stops_by_line(&self, line_id: u32) -> Result<Vec<Stop>, BackendError> {
        let Some(body) = self.stops.as_deref() else {
            return Ok(Vec::new());
        };
        let mut by_line: HashMap<String, Vec<Stop>> = decode_payload(body)?;
        Ok(by_line.remove(&line_id.to_string()).unwrap_or_default())
    }
}
