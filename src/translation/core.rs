/*!
 * Core translation functionality.
 *
 * `TranslationService` owns the provider client, the request budget, and the
 * retry policy. It guarantees exactly-once translation per distinct source
 * string within a run: callers hand it the full ordered unit list, it
 * resolves cache hits, deduplicates the misses in first-occurrence order,
 * ships them in batches, and returns a source→translation mapping.
 */

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::errors::TranslationError;
use crate::glossary::Glossary;
use crate::providers::Provider;
use crate::translation::batch::plan_batches;
use crate::translation::cache::TranslationCache;
use crate::translation::rate_limit::RateLimiter;

/// Tunables for batching, budgeting, and retries
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    /// Maximum texts per API call
    pub batch_size: usize,

    /// Maximum cumulative characters per API call
    pub max_chars_per_batch: usize,

    /// Request budget per rolling minute
    pub requests_per_minute: u32,

    /// Attempts per batch before the failure propagates
    pub max_attempts: u32,

    /// First retry delay
    pub initial_backoff: Duration,

    /// Retry delay ceiling
    pub max_backoff: Duration,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            batch_size: 80,
            max_chars_per_batch: 9000,
            requests_per_minute: 300,
            max_attempts: 6,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// Translation service driving the provider client
pub struct TranslationService {
    /// Provider the batches are sent through
    provider: Arc<dyn Provider>,

    /// Batching and retry tunables
    options: TranslationOptions,

    /// Rolling request budget
    limiter: RateLimiter,
}

impl TranslationService {
    /// Create a new translation service
    pub fn new(provider: Arc<dyn Provider>, options: TranslationOptions) -> Self {
        let limiter = RateLimiter::new(options.requests_per_minute);
        Self {
            provider,
            options,
            limiter,
        }
    }

    /// Requests issued since the service was created
    pub fn total_requests(&self) -> u64 {
        self.limiter.total_requests()
    }

    /// Translate an ordered list of distinct strings.
    ///
    /// Returns translations in the same order and count as the input. Batches
    /// are issued sequentially; each one takes a budget slot, retries
    /// transient failures with exponential backoff, and fails the run once
    /// the attempt limit is exhausted. A count mismatch between a batch and
    /// its response is a protocol violation and fails immediately.
    pub async fn translate(&mut self, texts: &[String]) -> Result<Vec<String>, TranslationError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batches = plan_batches(texts, self.options.batch_size, self.options.max_chars_per_batch);
        debug!(
            "Translating {} text(s) in {} batch(es)",
            texts.len(),
            batches.len()
        );

        let mut results = Vec::with_capacity(texts.len());
        for batch in &batches {
            let translated = self.translate_batch_with_retry(batch).await?;
            results.extend(translated);
        }

        Ok(results)
    }

    /// Resolve a mapping from source string to translation for every text in
    /// `texts`, translating only the cache misses.
    ///
    /// Duplicate inputs collapse to a single entry; misses are submitted in
    /// first-occurrence order. Fresh translations pass through the glossary's
    /// post pass before being memoized.
    pub async fn translate_unique(
        &mut self,
        texts: &[String],
        cache: &TranslationCache,
        glossary: &Glossary,
    ) -> Result<HashMap<String, String>, TranslationError> {
        let mut mapping = HashMap::new();
        let mut pending = Vec::new();
        let mut seen = HashSet::new();

        for text in texts {
            if !seen.insert(text.as_str()) {
                continue;
            }
            match cache.get(text) {
                Some(translation) => {
                    mapping.insert(text.clone(), translation);
                }
                None => pending.push(text.clone()),
            }
        }

        if pending.is_empty() {
            return Ok(mapping);
        }

        let translated = self.translate(&pending).await?;
        for (source, target) in pending.into_iter().zip(translated) {
            let target = glossary.apply_post(&target);
            cache.set(&source, &target);
            mapping.insert(source, target);
        }

        Ok(mapping)
    }

    /// Send one batch, retrying transient failures with exponential backoff
    async fn translate_batch_with_retry(
        &mut self,
        batch: &[String],
    ) -> Result<Vec<String>, TranslationError> {
        let mut backoff = self.options.initial_backoff;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            self.limiter.acquire().await;

            match self.provider.translate_batch(batch).await {
                Ok(translated) => {
                    if translated.len() != batch.len() {
                        return Err(TranslationError::MisalignedResponse {
                            sent: batch.len(),
                            received: translated.len(),
                        });
                    }
                    return Ok(translated);
                }
                Err(e) if attempt >= self.options.max_attempts => {
                    return Err(TranslationError::RetriesExhausted {
                        attempts: attempt,
                        source: e,
                    });
                }
                Err(e) => {
                    let kind = if e.is_rate_limit() { "rate limit" } else { "request" };
                    warn!(
                        "Batch {} error on attempt {}/{}: {}. Retrying in {:?}",
                        kind, attempt, self.options.max_attempts, e, backoff
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(self.options.max_backoff);
                }
            }
        }
    }
}
