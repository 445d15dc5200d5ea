//! Page-tree synchronization.
//!
//! This module provides the [`PageSynchronizer`], which walks a configured
//! page tree depth-first and materializes each node against a remote
//! [`PageStore`]:
//!
//! 1. Resolve the effective parent id (caller-threaded id wins over the
//!    node's own `parent_id`)
//! 2. Skip (normal mode) or fail (validate-only mode) nodes with no
//!    resolvable parent or no title
//! 3. Reuse the existing page when the store already holds a structurally
//!    equivalent one, create it otherwise
//! 4. Recurse into children with the node's resolved id as their parent
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use confpub_config::Config;
//! use confpub_confluence::{ConfluenceClient, PageSynchronizer, TracingReporter};
//!
//! let mut config = Config::from_yaml_str("version: 2")?;
//! let client = ConfluenceClient::from_config(
//!     "https://confluence.example.com",
//!     "publisher",
//!     "api-token",
//! );
//!
//! let reporter = TracingReporter;
//! let synchronizer = PageSynchronizer::new(&client, &reporter);
//! synchronizer.synchronize(&mut config.pages, None)?;
//!
//! // Or check the tree structure without touching the server
//! PageSynchronizer::validate_only(&reporter).synchronize(&mut config.pages, None)?;
//! # Ok(())
//! # }
//! ```

mod reporter;
mod synchronizer;

pub use reporter::{SyncReporter, TracingReporter};
pub use synchronizer::{PageSynchronizer, VALIDATE_ONLY_ID};

use crate::error::ConfluenceError;
use crate::types::{CandidatePage, PageHandle};

/// Remote page store used by the synchronizer.
///
/// Implemented by [`ConfluenceClient`](crate::ConfluenceClient); tests
/// substitute in-memory stores.
pub trait PageStore {
    /// Fetch a page's identity and context by id. Fails if not found.
    fn load(&self, page_id: u64) -> Result<PageHandle, ConfluenceError>;

    /// Structural existence check: returns the id of a page matching the
    /// candidate by space, title and direct ancestor, if one exists.
    fn exists(&self, page: &CandidatePage) -> Result<Option<u64>, ConfluenceError>;

    /// Create the page and return its new id.
    fn create(&self, page: &CandidatePage) -> Result<u64, ConfluenceError>;
}

/// Error during page-tree synchronization.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A page has no caller-supplied parent and no `parent_id` of its own.
    /// Raised only in validate-only mode; normal mode skips the node.
    #[error("page without parent page: {title}")]
    MissingParent {
        /// Title of the offending page (empty when the page has none).
        title: String,
    },

    /// A page has a resolvable parent but no title. Raised only in
    /// validate-only mode; normal mode skips the node.
    #[error("page without title (parent page id: {parent_id})")]
    MissingTitle {
        /// Effective parent id of the offending page.
        parent_id: u64,
    },

    /// Remote store failure. Always fatal, in either mode.
    #[error(transparent)]
    Confluence(#[from] ConfluenceError),
}
