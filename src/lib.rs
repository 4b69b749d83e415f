/*!
 * # uzmirror - static site translation mirror
 *
 * A Rust library for mirroring a static Russian-language HTML site into an
 * Uzbek (Latin-script) copy, translating visible text through Yandex Cloud
 * Translate.
 *
 * ## Features
 *
 * - Walks the source tree, translating HTML documents and mirroring every
 *   other file verbatim
 * - Persistent translation cache so each distinct string is translated once
 * - Ordered glossary substitution before and after translation
 * - Batched API calls under count/character limits with a requests-per-minute
 *   budget and bounded exponential-backoff retries
 * - Reciprocal language-switcher and hreflang links, re-injected idempotently
 * - Per-file CSV report of translated unit counts
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `html`: Document handling:
 *   - `html::dom`: Parse/serialize and node helpers
 *   - `html::text_model`: Translatable-unit extraction and replacement
 *   - `html::injection`: Language-switcher and hreflang link management
 * - `translation`: Translation machinery:
 *   - `translation::core`: Service, deduplication, and retry policy
 *   - `translation::batch`: Batch planning under count/char limits
 *   - `translation::cache`: Persistent source→translation memo
 *   - `translation::rate_limit`: Requests-per-minute budget
 * - `providers`: Translation API clients:
 *   - `providers::yandex`: Yandex Cloud Translate v2 client
 *   - `providers::mock`: Call-recording test double
 * - `glossary`: Ordered substitution rules
 * - `relpath`: Cross-tree relative-path math
 * - `report`: Per-file CSV report
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod glossary;
pub mod html;
pub mod providers;
pub mod relpath;
pub mod report;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOptions, RunSummary};
pub use errors::{AppError, ProviderError, TranslationError};
pub use glossary::{Glossary, GlossaryMode, GlossaryRule};
pub use translation::{TranslationCache, TranslationService};
