//! YAML ingestion for the publishing tree.
//!
//! The on-disk format is versioned; only `version: 2` documents are
//! accepted. Raw serde mirror structs are parsed first and then converted
//! into the resolved model, so the public types stay free of serde
//! attributes and the `attachments:` mapping can be split into tagged
//! image/download variants.

use std::path::Path;

use serde::Deserialize;

use crate::{AttachmentConfig, Config, ConfigError, PageConfig};

/// Supported config format version.
const CONFIG_VERSION: u64 = 2;

/// Raw top-level document as parsed from YAML.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    version: Option<u64>,
    url: Option<String>,
    base_dir: Option<String>,
    downloads_dir: Option<String>,
    images_dir: Option<String>,
    source_ext: Option<String>,
    #[serde(default)]
    pages: Vec<PageEntry>,
}

/// Raw page node as parsed from YAML.
#[derive(Debug, Deserialize)]
struct PageEntry {
    parent_id: Option<u64>,
    title: Option<String>,
    source: Option<String>,
    link: Option<String>,
    watermark: Option<String>,
    attachments: Option<AttachmentsEntry>,
    #[serde(default)]
    pages: Vec<PageEntry>,
}

/// Raw `attachments:` mapping: plain path lists per kind.
#[derive(Debug, Deserialize, Default)]
struct AttachmentsEntry {
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    downloads: Vec<String>,
}

impl Config {
    /// Load a publishing configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist,
    /// [`ConfigError::Yaml`] on malformed YAML, and the version errors
    /// described on [`Config::from_yaml_str`].
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse a publishing configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVersion`] when the document has no
    /// `version` field and [`ConfigError::UnsupportedVersion`] when it is
    /// not `2`.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: ConfigFile = serde_yaml::from_str(content)?;

        match raw.version {
            None => return Err(ConfigError::MissingVersion),
            Some(CONFIG_VERSION) => {}
            Some(found) => return Err(ConfigError::UnsupportedVersion(found)),
        }

        Ok(Self {
            url: raw.url,
            base_dir: raw.base_dir,
            downloads_dir: raw.downloads_dir,
            images_dir: raw.images_dir,
            source_ext: raw.source_ext,
            pages: raw.pages.into_iter().map(PageConfig::from).collect(),
        })
    }
}

impl From<PageEntry> for PageConfig {
    fn from(entry: PageEntry) -> Self {
        let attachments = entry.attachments.unwrap_or_default();
        Self {
            id: None,
            parent_id: entry.parent_id,
            title: entry.title,
            source: entry.source,
            link: entry.link,
            watermark: entry.watermark,
            images: attachments
                .images
                .into_iter()
                .map(|path| AttachmentConfig::Image { path })
                .collect(),
            downloads: attachments
                .downloads
                .into_iter()
                .map(|path| AttachmentConfig::Attachment { path })
                .collect(),
            pages: entry.pages.into_iter().map(Self::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r"
version: 2
url: https://confluence.example.com
base_dir: docs
source_ext: .md
pages:
  - title: Guide
    parent_id: 10
    source: guide
    attachments:
      images:
        - diagrams/flow.png
      downloads:
        - guide.pdf
        - cheatsheet.pdf
    pages:
      - title: Install
        source: install
      - title: Usage
        source: usage
";

    #[test]
    fn parses_nested_tree_with_attachments() {
        let config = Config::from_yaml_str(SAMPLE).unwrap();

        assert_eq!(config.url.as_deref(), Some("https://confluence.example.com"));
        assert_eq!(config.base_dir.as_deref(), Some("docs"));
        assert_eq!(config.source_ext.as_deref(), Some(".md"));

        let guide = &config.pages[0];
        assert_eq!(guide.title.as_deref(), Some("Guide"));
        assert_eq!(guide.parent_id, Some(10));
        assert_eq!(guide.id, None);
        assert_eq!(
            guide.images,
            vec![AttachmentConfig::Image {
                path: "diagrams/flow.png".to_owned()
            }]
        );
        assert_eq!(
            guide.downloads,
            vec![
                AttachmentConfig::Attachment {
                    path: "guide.pdf".to_owned()
                },
                AttachmentConfig::Attachment {
                    path: "cheatsheet.pdf".to_owned()
                },
            ]
        );
        assert_eq!(guide.pages.len(), 2);
        assert_eq!(guide.pages[1].title.as_deref(), Some("Usage"));
    }

    #[test]
    fn missing_version_is_an_error() {
        let err = Config::from_yaml_str("pages: []").unwrap_err();
        assert!(matches!(err, ConfigError::MissingVersion));
    }

    #[test]
    fn wrong_version_is_an_error() {
        let err = Config::from_yaml_str("version: 1\npages: []").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion(1)));
    }

    #[test]
    fn empty_document_fields_default() {
        let config = Config::from_yaml_str("version: 2").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn flatten_is_preorder() {
        let config = Config::from_yaml_str(SAMPLE).unwrap();
        let titles: Vec<_> = crate::flatten_pages(&config.pages)
            .map(|page| page.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, vec!["Guide", "Install", "Usage"]);
    }
}
