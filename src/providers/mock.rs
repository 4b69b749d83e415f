/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::echo()` - Returns every text unchanged
 * - `MockProvider::with_responses(..)` - Looks up canned translations
 * - `MockProvider::rate_limited(n)` - Rejects the first n calls with 429
 * - `MockProvider::failing()` - Always fails with a request error
 * - `MockProvider::misaligned()` - Drops one translation from each response
 *
 * Every mock records the batches it receives so tests can assert on call
 * counts and deduplication.
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return every text unchanged
    Echo,
    /// Look up canned translations, marking unknown texts
    Canned(HashMap<String, String>),
    /// Fail the first n calls with a rate-limit error, then echo
    RateLimited { failures: usize },
    /// Always fail with a request error
    Failing,
    /// Return one translation fewer than requested (protocol violation)
    Misaligned,
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of calls made so far
    call_count: Arc<AtomicUsize>,
    /// Batches received, in call order
    received: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that returns every text unchanged
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create a mock with canned translations
    ///
    /// Texts without a canned entry come back wrapped as `[uz] <text>` so a
    /// test can tell translated output from pass-through.
    pub fn with_responses(responses: HashMap<String, String>) -> Self {
        Self::new(MockBehavior::Canned(responses))
    }

    /// Create a mock that rate-limits the first `failures` calls
    pub fn rate_limited(failures: usize) -> Self {
        Self::new(MockBehavior::RateLimited { failures })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that violates the count contract
    pub fn misaligned() -> Self {
        Self::new(MockBehavior::Misaligned)
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Batches received, in call order
    pub fn received_batches(&self) -> Vec<Vec<String>> {
        self.received.lock().clone()
    }

    /// Every text received, flattened in call order
    pub fn received_texts(&self) -> Vec<String> {
        self.received.lock().iter().flatten().cloned().collect()
    }

    fn translate_one(&self, text: &str) -> String {
        match &self.behavior {
            MockBehavior::Canned(responses) => responses
                .get(text)
                .cloned()
                .unwrap_or_else(|| format!("[uz] {}", text)),
            _ => text.to_string(),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>, ProviderError> {
        let call_index = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.received.lock().push(texts.to_vec());

        match &self.behavior {
            MockBehavior::Failing => {
                Err(ProviderError::RequestFailed("mock failure".to_string()))
            }
            MockBehavior::RateLimited { failures } if call_index < *failures => Err(
                ProviderError::RateLimitExceeded("mock 429".to_string()),
            ),
            MockBehavior::Misaligned => Ok(texts
                .iter()
                .skip(1)
                .map(|t| self.translate_one(t))
                .collect()),
            _ => Ok(texts.iter().map(|t| self.translate_one(t)).collect()),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => {
                Err(ProviderError::ConnectionError("mock failure".to_string()))
            }
            _ => Ok(()),
        }
    }
}
