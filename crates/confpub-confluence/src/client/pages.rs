//! Page operations for the Confluence API.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::sync::PageStore;
use crate::types::{CandidatePage, ContentRecord, ContentSearchResponse, PageHandle};

/// Characters escaped in query string values.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'?');

impl ConfluenceClient {
    /// Fetch a content record with its space context.
    pub(crate) fn get_content(&self, page_id: u64) -> Result<ContentRecord, ConfluenceError> {
        let url = format!("{}/content/{page_id}?expand=space", self.api_url());

        info!("Loading page {}", page_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        read_checked(response)
    }

    /// Find a page structurally equivalent to the candidate: same space,
    /// same title, same direct ancestor. Body content is not compared.
    pub(crate) fn find_page(&self, page: &CandidatePage) -> Result<Option<u64>, ConfluenceError> {
        let url = format!(
            "{}/content?spaceKey={}&title={}&expand=ancestors",
            self.api_url(),
            utf8_percent_encode(&page.space_key, QUERY_VALUE),
            utf8_percent_encode(&page.title, QUERY_VALUE),
        );

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let found: ContentSearchResponse = read_checked(response)?;
        let ancestor_id = page.direct_ancestor().map(|ancestor| ancestor.id);

        Ok(found
            .results
            .into_iter()
            .find(|record| record.ancestors.last().map(|a| a.id) == ancestor_id)
            .map(|record| record.id))
    }

    /// Create a page and return its new content id.
    pub(crate) fn create_page(&self, page: &CandidatePage) -> Result<u64, ConfluenceError> {
        let url = format!("{}/content", self.api_url());

        let ancestors: Vec<_> = page
            .ancestors
            .iter()
            .map(|ancestor| json!({ "id": ancestor.id }))
            .collect();
        let payload = json!({
            "type": "page",
            "title": page.title,
            "space": { "key": page.space_key },
            "body": {
                "storage": { "value": page.body, "representation": "storage" }
            },
            "ancestors": ancestors,
        });

        info!("Creating page '{}' in space {}", page.title, page.space_key);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .send_json(&payload)?;

        let record: ContentRecord = read_checked(response)?;
        Ok(record.id)
    }
}

impl PageStore for ConfluenceClient {
    fn load(&self, page_id: u64) -> Result<PageHandle, ConfluenceError> {
        self.get_content(page_id)?.into_handle()
    }

    fn exists(&self, page: &CandidatePage) -> Result<Option<u64>, ConfluenceError> {
        self.find_page(page)
    }

    fn create(&self, page: &CandidatePage) -> Result<u64, ConfluenceError> {
        self.create_page(page)
    }
}

/// Check the response status and deserialize the JSON body.
fn read_checked<T: DeserializeOwned>(
    response: ureq::http::Response<ureq::Body>,
) -> Result<T, ConfluenceError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ConfluenceError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body_reader.read_json()?)
}
