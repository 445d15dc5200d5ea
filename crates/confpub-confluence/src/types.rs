//! Confluence content types.

use serde::{Deserialize, Deserializer};

use crate::error::ConfluenceError;

/// Identity and context of an existing remote page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHandle {
    /// Content id.
    pub id: u64,
    /// Key of the space the page lives in.
    pub space_key: String,
    /// Content type (normally "page").
    pub content_type: String,
}

/// Ancestor reference on a candidate page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    /// Parent content id.
    pub id: u64,
    /// Parent content type.
    pub content_type: String,
}

/// Page shape submitted to existence checks and creation. Carries an empty
/// body and exactly one ancestor, the effective parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePage {
    /// Space the page belongs to.
    pub space_key: String,
    /// Page title.
    pub title: String,
    /// Storage-format body.
    pub body: String,
    /// Ancestor chain. The synchronizer always supplies a single entry.
    pub ancestors: Vec<Ancestor>,
}

impl CandidatePage {
    /// Build a candidate child page in the parent's space, under the
    /// parent, with an empty body.
    #[must_use]
    pub fn child_of(parent: &PageHandle, title: &str) -> Self {
        Self {
            space_key: parent.space_key.clone(),
            title: title.to_owned(),
            body: String::new(),
            ancestors: vec![Ancestor {
                id: parent.id,
                content_type: parent.content_type.clone(),
            }],
        }
    }

    /// The direct parent ancestor, if any.
    #[must_use]
    pub fn direct_ancestor(&self) -> Option<&Ancestor> {
        self.ancestors.first()
    }
}

/// Content record returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentRecord {
    #[serde(deserialize_with = "content_id")]
    pub id: u64,
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default)]
    pub space: Option<Space>,
    /// Ancestor chain, root first. The direct parent is the last entry.
    #[serde(default)]
    pub ancestors: Vec<AncestorRecord>,
}

impl ContentRecord {
    /// Convert into a [`PageHandle`]; the record must carry its space
    /// (i.e. it was fetched with `expand=space`).
    pub fn into_handle(self) -> Result<PageHandle, ConfluenceError> {
        let space = self.space.ok_or_else(|| ConfluenceError::HttpResponse {
            status: 200,
            body: format!("page {} response carries no space", self.id),
        })?;
        Ok(PageHandle {
            id: self.id,
            space_key: space.key,
            content_type: self.content_type,
        })
    }
}

/// Space reference on a content record.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Space {
    pub key: String,
}

/// Ancestor entry on a content record.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AncestorRecord {
    #[serde(deserialize_with = "content_id")]
    pub id: u64,
}

/// Paged content search response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentSearchResponse {
    #[serde(default)]
    pub results: Vec<ContentRecord>,
}

/// Confluence serializes content ids as JSON strings; accept both string
/// and number representations.
fn content_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(id) => Ok(id),
        Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_record_accepts_string_ids() {
        let record: ContentRecord = serde_json::from_str(
            r#"{"id": "123", "type": "page", "space": {"key": "DOC"},
                "ancestors": [{"id": "10"}, {"id": "42"}]}"#,
        )
        .unwrap();
        assert_eq!(record.id, 123);
        assert_eq!(record.ancestors.last().map(|a| a.id), Some(42));

        let handle = record.into_handle().unwrap();
        assert_eq!(
            handle,
            PageHandle {
                id: 123,
                space_key: "DOC".to_owned(),
                content_type: "page".to_owned(),
            }
        );
    }

    #[test]
    fn content_record_accepts_numeric_ids() {
        let record: ContentRecord =
            serde_json::from_str(r#"{"id": 7, "type": "page"}"#).unwrap();
        assert_eq!(record.id, 7);
        assert!(record.ancestors.is_empty());
    }

    #[test]
    fn record_without_space_is_not_a_handle() {
        let record: ContentRecord =
            serde_json::from_str(r#"{"id": "7", "type": "page"}"#).unwrap();
        assert!(record.into_handle().is_err());
    }

    #[test]
    fn child_of_builds_single_ancestor_candidate() {
        let parent = PageHandle {
            id: 10,
            space_key: "DOC".to_owned(),
            content_type: "page".to_owned(),
        };
        let candidate = CandidatePage::child_of(&parent, "Guide");

        assert_eq!(candidate.space_key, "DOC");
        assert_eq!(candidate.title, "Guide");
        assert_eq!(candidate.body, "");
        assert_eq!(
            candidate.ancestors,
            vec![Ancestor {
                id: 10,
                content_type: "page".to_owned(),
            }]
        );
        assert_eq!(candidate.direct_ancestor().map(|a| a.id), Some(10));
    }
}
