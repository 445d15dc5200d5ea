//! Page-tree synchronizer implementation.

use confpub_config::PageConfig;

use crate::types::{CandidatePage, PageHandle};

use super::reporter::SyncReporter;
use super::{PageStore, SyncError};

/// Placeholder id assigned to every resolvable node in validate-only mode.
/// Never a real Confluence content id.
pub const VALIDATE_ONLY_ID: u64 = 0;

/// Walks a configured page tree depth-first and resolves every node's
/// remote id, creating missing pages idempotently.
///
/// Constructed with [`PageSynchronizer::new`] for a real run or
/// [`PageSynchronizer::validate_only`] for a dry traversal that performs
/// the same structural checks without any store access.
pub struct PageSynchronizer<'a> {
    store: Option<&'a dyn PageStore>,
    reporter: &'a dyn SyncReporter,
}

impl<'a> PageSynchronizer<'a> {
    /// Create a synchronizer that materializes pages against `store`.
    #[must_use]
    pub fn new(store: &'a dyn PageStore, reporter: &'a dyn SyncReporter) -> Self {
        Self {
            store: Some(store),
            reporter,
        }
    }

    /// Create a validate-only synchronizer.
    ///
    /// It runs the exact same traversal and branch decisions as a real
    /// run, but assigns [`VALIDATE_ONLY_ID`] instead of touching the
    /// store, and treats missing-parent/missing-title as immediate errors
    /// instead of skips.
    #[must_use]
    pub fn validate_only(reporter: &'a dyn SyncReporter) -> Self {
        Self {
            store: None,
            reporter,
        }
    }

    /// Synchronize the given sibling pages and, recursively, their
    /// subtrees.
    ///
    /// `parent_id` is the externally supplied root parent; pages without it
    /// fall back to their own `parent_id` field. Each resolved page gets
    /// its remote id assigned in place and threads it down to its
    /// children.
    ///
    /// # Errors
    ///
    /// In validate-only mode, returns [`SyncError::MissingParent`] or
    /// [`SyncError::MissingTitle`] for the first malformed node in
    /// traversal order. In normal mode those nodes are skipped with a
    /// warning and only store failures ([`SyncError::Confluence`]) abort
    /// the run.
    pub fn synchronize(
        &self,
        pages: &mut [PageConfig],
        parent_id: Option<u64>,
    ) -> Result<(), SyncError> {
        // One load of the threaded parent serves every sibling at this
        // level. Loaded lazily so leaf levels cost nothing.
        let mut level_parent: Option<PageHandle> = None;

        for page in pages {
            let resolved = match (parent_id.or(page.parent_id), &page.title) {
                (None, title) => {
                    if self.store.is_none() {
                        return Err(SyncError::MissingParent {
                            title: title.clone().unwrap_or_default(),
                        });
                    }
                    self.reporter.skipped_missing_parent(title.as_deref());
                    None
                }
                (Some(effective_parent), None) => {
                    if self.store.is_none() {
                        return Err(SyncError::MissingTitle {
                            parent_id: effective_parent,
                        });
                    }
                    self.reporter.skipped_missing_title(effective_parent);
                    None
                }
                (Some(effective_parent), Some(title)) => match self.store {
                    None => Some(VALIDATE_ONLY_ID),
                    Some(store) => {
                        if parent_id.is_some() && level_parent.is_none() {
                            level_parent = Some(store.load(effective_parent)?);
                        }
                        let own_parent;
                        let parent = match level_parent.as_ref() {
                            Some(handle) => handle,
                            None => {
                                own_parent = store.load(effective_parent)?;
                                &own_parent
                            }
                        };
                        Some(self.make_page(store, parent, title)?)
                    }
                },
            };

            if resolved.is_some() {
                page.id = resolved;
            }

            // Children always see this node's id, even when it stayed
            // unset: a skipped node cascades the skip to children that
            // have no parent_id of their own.
            self.synchronize(&mut page.pages, page.id)?;
        }

        Ok(())
    }

    /// Resolve one page against the store: reuse the structurally
    /// equivalent existing page or create a new one.
    fn make_page(
        &self,
        store: &dyn PageStore,
        parent: &PageHandle,
        title: &str,
    ) -> Result<u64, SyncError> {
        let candidate = CandidatePage::child_of(parent, title);

        if let Some(page_id) = store.exists(&candidate)? {
            self.reporter.page_exists(page_id, parent.id);
            Ok(page_id)
        } else {
            let page_id = store.create(&candidate)?;
            self.reporter.page_created(page_id, parent.id);
            Ok(page_id)
        }
    }
}
