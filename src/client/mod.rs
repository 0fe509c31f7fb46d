// src/client/mod.rs
//
// Dashboard side: polls the API per widget and renders the results.

pub mod binder;
pub mod fetch;
pub mod widgets;

pub use binder::{Binder, CommitPolicy, Mounted, Phase, ViewState};
pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use widgets::Widget;
