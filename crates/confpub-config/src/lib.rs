//! Page tree configuration for confpub.
//!
//! Models the declarative publishing tree: a [`Config`] holds global
//! settings and an ordered list of top-level [`PageConfig`] nodes, each of
//! which may nest further pages. Loading from YAML (with the mandatory
//! `version: 2` gate) lives in the loader module; the types here carry pure
//! value semantics and are mutated only by the synchronizer, which assigns
//! resolved page ids in place.
//!
//! Equality is structural: two trees are equal iff their scalar fields
//! match and their attachment and child sequences match element-wise, in
//! order. Sequence length mismatch is inequality, not an error.

mod loader;

use std::path::PathBuf;

/// Top-level publishing configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Confluence base URL.
    pub url: Option<String>,
    /// Base directory for page sources.
    pub base_dir: Option<String>,
    /// Directory holding downloadable attachments.
    pub downloads_dir: Option<String>,
    /// Directory holding image attachments.
    pub images_dir: Option<String>,
    /// File extension of page sources.
    pub source_ext: Option<String>,
    /// Top-level pages, in publishing order.
    pub pages: Vec<PageConfig>,
}

impl Config {
    /// Apply CLI overrides to the loaded configuration.
    ///
    /// Only non-None values replace the config file values.
    pub fn override_url(&mut self, url: Option<&str>) {
        if let Some(url) = url {
            self.url = Some(url.to_owned());
        }
    }
}

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        // Sequences first: length mismatch is inequality, then element-wise.
        if self.pages.len() != other.pages.len() {
            return false;
        }
        if self.pages.iter().zip(&other.pages).any(|(a, b)| a != b) {
            return false;
        }

        self.url == other.url
            && self.base_dir == other.base_dir
            && self.downloads_dir == other.downloads_dir
            && self.images_dir == other.images_dir
            && self.source_ext == other.source_ext
    }
}

/// One node of the publishing tree, corresponding to one remote page.
#[derive(Debug, Clone, Default)]
pub struct PageConfig {
    /// Resolved remote page id. Unset until the synchronizer assigns it.
    pub id: Option<u64>,
    /// Explicit parent page id, used only when no id is threaded down from
    /// the caller or an ancestor node.
    pub parent_id: Option<u64>,
    /// Page title. Required for creation.
    pub title: Option<String>,
    /// Source file reference, relative to the configured base directory.
    pub source: Option<String>,
    /// External link reference.
    pub link: Option<String>,
    /// Watermark text applied when publishing content.
    pub watermark: Option<String>,
    /// Image attachments, in upload order.
    pub images: Vec<AttachmentConfig>,
    /// Download attachments, in upload order.
    pub downloads: Vec<AttachmentConfig>,
    /// Child pages, in publishing order.
    pub pages: Vec<PageConfig>,
}

impl PartialEq for PageConfig {
    fn eq(&self, other: &Self) -> bool {
        if self.images.len() != other.images.len()
            || self.downloads.len() != other.downloads.len()
            || self.pages.len() != other.pages.len()
        {
            return false;
        }
        if self.images.iter().zip(&other.images).any(|(a, b)| a != b) {
            return false;
        }
        if self
            .downloads
            .iter()
            .zip(&other.downloads)
            .any(|(a, b)| a != b)
        {
            return false;
        }
        if self.pages.iter().zip(&other.pages).any(|(a, b)| a != b) {
            return false;
        }

        self.id == other.id
            && self.parent_id == other.parent_id
            && self.title == other.title
            && self.source == other.source
            && self.link == other.link
            && self.watermark == other.watermark
    }
}

/// Attachment reference. The variant decides downstream handling: images
/// are embedded into page bodies, plain attachments are offered for
/// download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentConfig {
    /// Downloadable attachment.
    Attachment {
        /// Path relative to the downloads directory.
        path: String,
    },
    /// Image attachment.
    Image {
        /// Path relative to the images directory.
        path: String,
    },
}

impl AttachmentConfig {
    /// Attachment path, regardless of variant.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Attachment { path } | Self::Image { path } => path,
        }
    }
}

/// Iterate over a page tree in pre-order: each page before its children,
/// siblings left to right.
pub fn flatten_pages(pages: &[PageConfig]) -> FlattenPages<'_> {
    FlattenPages {
        stack: pages.iter().rev().collect(),
    }
}

/// Pre-order iterator over a page tree. Created by [`flatten_pages`].
#[derive(Debug)]
pub struct FlattenPages<'a> {
    stack: Vec<&'a PageConfig>,
}

impl<'a> Iterator for FlattenPages<'a> {
    type Item = &'a PageConfig;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.stack.pop()?;
        self.stack.extend(page.pages.iter().rev());
        Some(page)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The mandatory `version` field is absent.
    #[error("`version` param is required")]
    MissingVersion,
    /// The `version` field holds an unsupported value.
    #[error("invalid config version {0}. required: 2")]
    UnsupportedVersion(u64),
}
