/*!
 * Provider implementations for the translation API boundary.
 *
 * This module contains the client seam the translation service talks
 * through:
 * - Yandex: Yandex Cloud Translate v2 integration
 * - Mock: call-recording test double
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for translation providers
///
/// This trait defines the one operation the pipeline needs, allowing the
/// network client and the test double to be used interchangeably in the
/// translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate a batch of texts
    ///
    /// # Arguments
    /// * `texts` - The texts to translate, in order
    ///
    /// # Returns
    /// * `Result<Vec<String>, ProviderError>` - Translations in the same
    ///   order and count as `texts`, or an error
    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is usable, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod mock;
pub mod yandex;
