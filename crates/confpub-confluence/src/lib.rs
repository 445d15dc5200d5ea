//! Confluence integration for confpub.
//!
//! Provides the [`ConfluenceClient`] (sync HTTP client for the Confluence
//! Server/Data Center REST API with basic authentication) and the
//! [`PageSynchronizer`], which materializes a configured page tree against
//! the remote store idempotently or validates it without any remote I/O.

mod client;
mod error;
mod sync;
mod types;

pub use client::ConfluenceClient;
pub use error::ConfluenceError;
pub use sync::{
    PageStore, PageSynchronizer, SyncError, SyncReporter, TracingReporter, VALIDATE_ONLY_ID,
};
pub use types::{Ancestor, CandidatePage, PageHandle};
