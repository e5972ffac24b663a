//! Application state for the web layer.

use std::sync::Arc;

use crate::normalize::Normalizer;
use crate::resolve::Resolver;

/// Shared application state.
///
/// Contains all the services needed to handle requests. Nothing in it is
/// mutated after start-up.
pub struct AppState<B> {
    /// Backend resolver with version fallback
    pub resolver: Arc<Resolver<B>>,

    /// Legacy-to-canonical normalizer
    pub normalizer: Arc<Normalizer>,
}

impl<B> AppState<B> {
    /// Create a new app state.
    pub fn new(resolver: Resolver<B>, normalizer: Normalizer) -> Self {
        Self {
            resolver: Arc::new(resolver),
            normalizer: Arc::new(normalizer),
        }
    }
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            normalizer: Arc::clone(&self.normalizer),
        }
    }
}
