//! # Veracity
//!
//! A client for a mock news-voting REST backend: paginated news, per-news
//! paginated comments, and locally-added "optimistic" comments that are
//! never sent to the server.
//!
//! ## Architecture
//!
//! ```text
//! CLI → Store → NewsApi (HTTP)
//! ```
//!
//! Data flows one direction: a command calls a store action, the store
//! talks to the API adapter and mutates its own slice of state, and the
//! caller reads the result back out of the store. Fetch failures are
//! captured as messages on the store state, never raised to callers.
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`api`]: The [`NewsApi`](api::NewsApi) trait and its reqwest implementation
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: TOML configuration (base URL, timeouts, local cache)
//! - [`domain`]: News and comment models, vote helpers
//! - [`pagination`]: Page arithmetic and query-string normalization
//! - [`store`]: The news and comment state containers

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the API
/// client and both stores.
pub mod app;

/// HTTP access to the two REST collections.
///
/// - [`NewsApi`](api::NewsApi): async trait over the backend
/// - [`HttpApi`](api::HttpApi): reqwest-based implementation reading
///   totals from the `x-total-count` header
pub mod api;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/veracity/config.toml`; a commented default file
/// is created on first run.
pub mod config;

/// Core domain models.
///
/// - [`NewsItem`](domain::NewsItem): read-only news records
/// - [`CommentItem`](domain::CommentItem): comments, local ones negative-ID'd
/// - [`majority_label`](domain::majority_label) / [`fake_percent`](domain::fake_percent):
///   pure vote aggregation helpers
pub mod domain;

/// Pagination arithmetic and total, never-throwing normalization of
/// untrusted page/size/filter input.
pub mod pagination;

/// State containers.
///
/// - [`NewsStore`](store::NewsStore): current page plus a memoized full list
/// - [`CommentStore`](store::CommentStore): per-news pagination slots and
///   local comment lists
pub mod store;
