//! Retrying wire decorator and its predicates.
//!
//! [`RetryWire`] re-invokes a wrapped wire under a bounded-attempt policy.
//! Two things can trigger another attempt: a completed response the
//! [`RetryPredicate`] rejects (429/5xx by default), or a retryable failure
//! (network, timeout, cancellation — see [`crate::Error::is_retryable`]).
//! The two paths exhaust differently: the response path returns the last
//! response as-is, the failure path raises
//! [`crate::Error::RetriesExhausted`]. A response is a completed,
//! inspectable exchange the caller can judge; a failure leaves nothing to
//! return, so the decorator must signal it.

use crate::{Error, Result, Wire, WireResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Default number of retries beyond the initial attempt.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Default fixed wait between attempts.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Decides, from a completed response alone, whether another attempt should
/// be made.
///
/// Implement this for reusable policies, or hand a plain closure to
/// [`RetryWire::retry_if`]. A custom predicate fully replaces the default
/// one — the default 429/5xx set is not OR'd back in.
///
/// # Examples
///
/// ```
/// use fluent_wire::{RetryPredicate, WireResponse};
///
/// struct RetryOnConflict;
///
/// impl RetryPredicate for RetryOnConflict {
///     fn should_retry(&self, response: &WireResponse) -> bool {
///         response.status().as_u16() == 409
///     }
/// }
/// ```
pub trait RetryPredicate: Send + Sync {
    /// Returns `true` if the exchange should be attempted again.
    fn should_retry(&self, response: &WireResponse) -> bool;
}

struct FnPredicate<F>(F);

impl<F> RetryPredicate for FnPredicate<F>
where
    F: Fn(&WireResponse) -> bool + Send + Sync,
{
    fn should_retry(&self, response: &WireResponse) -> bool {
        (self.0)(response)
    }
}

/// The default predicate: retry on 429 (Too Many Requests) and any 5xx.
#[derive(Debug, Clone, Copy)]
pub struct DefaultRetryPredicate;

impl RetryPredicate for DefaultRetryPredicate {
    fn should_retry(&self, response: &WireResponse) -> bool {
        let status = response.status().as_u16();
        status == 429 || (500..600).contains(&status)
    }
}

/// Retry on an explicit set of status codes.
///
/// # Examples
///
/// ```
/// use fluent_wire::retry::{RetryOnStatus, RetryPredicate};
/// use fluent_wire::WireResponse;
/// use http::{HeaderMap, StatusCode};
///
/// let predicate = RetryOnStatus::new([404, 409]);
/// let not_found = WireResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), "");
/// assert!(predicate.should_retry(&not_found));
/// ```
#[derive(Debug, Clone)]
pub struct RetryOnStatus {
    statuses: Vec<u16>,
}

impl RetryOnStatus {
    /// Creates a predicate matching exactly the given status codes.
    pub fn new(statuses: impl IntoIterator<Item = u16>) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
        }
    }
}

impl RetryPredicate for RetryOnStatus {
    fn should_retry(&self, response: &WireResponse) -> bool {
        self.statuses.contains(&response.status().as_u16())
    }
}

/// A wire decorator that re-invokes its inner wire on retryable outcomes.
///
/// Policy is fixed at construction: `max_attempts` retries beyond the first
/// attempt (total attempts ≤ `max_attempts + 1`), a fixed `delay` between
/// attempts (no backoff or jitter), and a [`RetryPredicate`] over completed
/// responses. With `max_attempts == 0` exactly one attempt is made and the
/// first outcome stands, with no wait.
///
/// Retry wires nest: wrapping a `RetryWire` in another compounds attempts
/// multiplicatively on persistent failure.
///
/// The inter-attempt wait suspends only the calling task, so one `RetryWire`
/// can serve many concurrent calls; dropping the call future (caller
/// cancellation) aborts the loop mid-wait or mid-attempt.
///
/// # Examples
///
/// ```no_run
/// use fluent_wire::{HttpWire, RetryWire, Wire};
/// use std::collections::HashMap;
/// use std::time::Duration;
///
/// # async fn example() -> fluent_wire::Result<()> {
/// let wire = RetryWire::with_policy(HttpWire::new(), 5, Duration::from_millis(500));
/// let response = wire
///     .send("GET", "https://api.example.com/jobs", &HashMap::new(), None)
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// With a custom predicate:
///
/// ```no_run
/// use fluent_wire::{HttpWire, RetryWire, WireResponse};
/// use std::time::Duration;
///
/// let wire = RetryWire::with_policy(HttpWire::new(), 3, Duration::from_millis(100))
///     .retry_if(|response: &WireResponse| response.status().as_u16() == 503);
/// ```
pub struct RetryWire<W> {
    inner: W,
    max_attempts: usize,
    delay: Duration,
    predicate: Box<dyn RetryPredicate>,
}

impl<W: Wire> RetryWire<W> {
    /// Creates a `RetryWire` with the default policy: 3 retries, 1 s apart,
    /// retrying on 429 and 5xx.
    pub fn new(inner: W) -> Self {
        Self::with_policy(inner, DEFAULT_MAX_ATTEMPTS, DEFAULT_DELAY)
    }

    /// Creates a `RetryWire` with an explicit attempt budget and delay.
    ///
    /// `max_attempts` counts retries beyond the initial attempt.
    pub fn with_policy(inner: W, max_attempts: usize, delay: Duration) -> Self {
        Self {
            inner,
            max_attempts,
            delay,
            predicate: Box::new(DefaultRetryPredicate),
        }
    }

    /// Replaces the response predicate with a closure.
    ///
    /// The closure fully replaces the default predicate; statuses the
    /// default would retry are no longer retried unless the closure says so.
    pub fn retry_if<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&WireResponse) -> bool + Send + Sync + 'static,
    {
        self.predicate = Box::new(FnPredicate(predicate));
        self
    }

    /// Replaces the response predicate with a boxed [`RetryPredicate`].
    pub fn retry_predicate(mut self, predicate: Box<dyn RetryPredicate>) -> Self {
        self.predicate = predicate;
        self
    }
}

#[async_trait]
impl<W: Wire> Wire for RetryWire<W> {
    async fn send(
        &self,
        method: &str,
        uri: &str,
        headers: &HashMap<String, String>,
        body: Option<&str>,
    ) -> Result<WireResponse> {
        let mut attempt = 0;

        loop {
            match self.inner.send(method, uri, headers, body).await {
                Ok(response) => {
                    if !self.predicate.should_retry(&response) {
                        return Ok(response);
                    }
                    if attempt == self.max_attempts {
                        // Exhaustion on the response path is not an error;
                        // the last response is the caller's to interpret.
                        tracing::debug!(
                            status = response.status().as_u16(),
                            attempts = attempt + 1,
                            "Retries exhausted, returning last response"
                        );
                        return Ok(response);
                    }
                    tracing::warn!(
                        status = response.status().as_u16(),
                        attempt = attempt + 1,
                        delay_ms = self.delay.as_millis(),
                        "Retryable status, retrying after delay"
                    );
                }
                Err(e) if e.is_retryable() => {
                    if attempt == self.max_attempts {
                        tracing::debug!(
                            error = %e,
                            attempts = attempt + 1,
                            "Retries exhausted after failure"
                        );
                        return Err(Error::RetriesExhausted {
                            attempts: attempt + 1,
                            last: Box::new(e),
                        });
                    }
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        delay_ms = self.delay.as_millis(),
                        "Retryable failure, retrying after delay"
                    );
                }
                Err(e) => return Err(e),
            }

            tokio::time::sleep(self.delay).await;
            attempt += 1;
        }
    }
}
