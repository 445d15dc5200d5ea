//! Synchronization event reporting.

use tracing::{info, warn};

/// Observer for synchronization outcomes.
///
/// Injected into the synchronizer so the core stays free of process-wide
/// logging state; the production impl is [`TracingReporter`], tests record
/// events instead.
pub trait SyncReporter {
    /// A page was created under `parent_id`.
    fn page_created(&self, page_id: u64, parent_id: u64);

    /// A structurally equivalent page already existed; its id was reused.
    fn page_exists(&self, page_id: u64, parent_id: u64);

    /// A node was skipped because no parent id could be resolved.
    fn skipped_missing_parent(&self, title: Option<&str>);

    /// A node was skipped because it has no title.
    fn skipped_missing_title(&self, parent_id: u64);
}

/// [`SyncReporter`] backed by `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl SyncReporter for TracingReporter {
    fn page_created(&self, page_id: u64, parent_id: u64) {
        info!(page_id, parent_id, "page created");
    }

    fn page_exists(&self, page_id: u64, parent_id: u64) {
        info!(page_id, parent_id, "page already exists, no need to create it");
    }

    fn skipped_missing_parent(&self, title: Option<&str>) {
        warn!(
            title = title.unwrap_or_default(),
            "page without parent page, skipping"
        );
    }

    fn skipped_missing_title(&self, parent_id: u64) {
        warn!(parent_id, "page without title, skipping");
    }
}
