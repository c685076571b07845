//! Page fetching for regulation and faculty pages.
//!
//! This crate provides:
//! - [`PageFetcher`] — Abstraction over where raw HTML comes from
//! - [`HttpFetcher`] — reqwest-backed fetcher honouring [`FetchConfig`](syllabi_shared::FetchConfig)

pub mod fetch;

pub use fetch::{HttpFetcher, PageFetcher};
