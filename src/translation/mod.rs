/*!
 * Translation service for the site mirror.
 *
 * This module contains the machinery between extracted text units and the
 * translation API. It is split into several submodules:
 *
 * - `core`: Service definition, deduplication, and retry policy
 * - `batch`: Batch planning under count and character limits
 * - `cache`: Persistent source→translation memo
 * - `rate_limit`: Requests-per-minute budget
 */

// Re-export main types for easier usage
pub use self::cache::TranslationCache;
pub use self::core::{TranslationOptions, TranslationService};
pub use self::rate_limit::RateLimiter;

// Submodules
pub mod batch;
pub mod cache;
pub mod core;
pub mod rate_limit;
