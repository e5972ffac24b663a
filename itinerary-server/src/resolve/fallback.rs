//! Ordered-attempt fallback.
//!
//! Runs a list of labelled attempts one after another until one of them
//! finds something. Attempts are futures that have not been polled yet, so
//! building the list issues no work; each one starts only once every attempt
//! before it has come back empty or failed.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use tracing::{debug, info, warn};

/// What a single attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome<T, E> {
    /// A usable result; stop here.
    Found(T),
    /// The attempt worked but had nothing to offer.
    Empty,
    /// The attempt failed.
    Failed(E),
}

/// A labelled attempt that has not started yet.
pub struct Attempt<'a, T, E> {
    label: &'static str,
    run: BoxFuture<'a, AttemptOutcome<T, E>>,
}

impl<'a, T, E> Attempt<'a, T, E> {
    pub fn new(
        label: &'static str,
        run: impl Future<Output = AttemptOutcome<T, E>> + Send + 'a,
    ) -> Self {
        Self {
            label,
            run: Box::pin(run),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// Why no attempt produced a result.
#[derive(Debug, Clone, PartialEq)]
pub enum Exhausted<E> {
    /// The last attempt failed.
    Failed {
        label: &'static str,
        error: E,
        /// Labels of the attempts tried before it, in order.
        fell_back_from: Vec<&'static str>,
    },
    /// The last attempt came back empty.
    Empty { tried: Vec<&'static str> },
}

/// Run attempts in order and return the first [`AttemptOutcome::Found`].
///
/// The outcome of the last attempt decides the error when nothing is found.
/// An empty list is reported as [`Exhausted::Empty`] with nothing tried.
pub async fn try_in_order<T, E>(attempts: Vec<Attempt<'_, T, E>>) -> Result<T, Exhausted<E>>
where
    E: fmt::Display,
{
    let total = attempts.len();
    let mut tried = Vec::with_capacity(total);
    let mut last_failure = None;

    for (index, attempt) in attempts.into_iter().enumerate() {
        let label = attempt.label;
        debug!(attempt = label, "starting attempt");

        let outcome = attempt.run.await;
        let is_last = index + 1 == total;

        match outcome {
            AttemptOutcome::Found(value) => {
                debug!(attempt = label, "attempt found a result");
                return Ok(value);
            }
            AttemptOutcome::Empty => {
                if is_last {
                    debug!(attempt = label, "attempt came back empty");
                } else {
                    info!(attempt = label, "attempt came back empty; falling back");
                }
                last_failure = None;
            }
            AttemptOutcome::Failed(error) => {
                if is_last {
                    warn!(attempt = label, %error, "attempt failed");
                } else {
                    warn!(attempt = label, %error, "attempt failed; falling back");
                }
                last_failure = Some((label, error));
            }
        }
        tried.push(label);
    }

    match last_failure {
        Some((label, error)) => {
            tried.pop();
            Err(Exhausted::Failed {
                label,
                error,
                fell_back_from: tried,
            })
        }
        None => Err(Exhausted::Empty { tried }),
    }
}
