//! Confluence page adapter (REST API v2)

use crate::error::ApiError;
use crate::http::{ApiRequest, Transport};
use atl_babel::storage_to_markdown;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub fn validate_page_id(id: &str) -> Result<(), ApiError> {
    if id.is_empty() {
        return Err(ApiError::validation("page ID cannot be empty"));
    }
    if !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::validation(format!(
            "invalid page ID: {id:?} (must be numeric)"
        )));
    }
    Ok(())
}

/// How the storage body is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFormat {
    #[default]
    Markdown,
    Storage,
}

impl PageFormat {
    pub const NAMES: &'static [&'static str] = &["markdown", "storage"];

    pub fn render(&self, storage: &str) -> Result<String, ApiError> {
        match self {
            PageFormat::Markdown => Ok(storage_to_markdown(storage)?),
            PageFormat::Storage => Ok(storage.to_string()),
        }
    }
}

impl FromStr for PageFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(PageFormat::Markdown),
            "storage" => Ok(PageFormat::Storage),
            other => Err(ApiError::validation(format!(
                "invalid body format {other:?} (valid formats: {})",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// Page as printed by `confluence page get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    /// The v2 API only exposes the space id; it is reported under this name.
    #[serde(rename = "spaceKey")]
    pub space_key: String,
    pub version: u64,
    pub updated: String,
    pub body: String,
}

#[derive(Deserialize)]
struct PageResponse {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "spaceId", default)]
    space_id: String,
    #[serde(default)]
    version: VersionInfo,
    #[serde(default)]
    body: BodyInfo,
}

#[derive(Deserialize, Default)]
struct VersionInfo {
    #[serde(default)]
    number: u64,
    #[serde(rename = "createdAt", default)]
    created_at: String,
}

#[derive(Deserialize, Default)]
struct BodyInfo {
    #[serde(default)]
    storage: Option<StorageBody>,
}

#[derive(Deserialize)]
struct StorageBody {
    #[serde(default)]
    value: String,
}

pub struct ConfluenceClient<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> ConfluenceClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        ConfluenceClient {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn get_page(&self, id: &str, format: PageFormat) -> Result<Page, ApiError> {
        validate_page_id(id)?;
        let url = format!(
            "{}/wiki/api/v2/pages/{}?body-format=storage",
            self.base_url, id
        );
        let response = self.transport.send(&ApiRequest::get(url))?.expect_status(200)?;
        let parsed: PageResponse = response.json()?;

        let body = match parsed.body.storage {
            Some(storage) => format.render(&storage.value)?,
            None => String::new(),
        };

        Ok(Page {
            id: parsed.id,
            title: parsed.title,
            space_key: parsed.space_id,
            version: parsed.version.number,
            updated: parsed.version.created_at,
            body,
        })
    }

    /// `GET /wiki/api/v2/spaces?limit=1`
    pub fn check_connectivity(&self) -> Result<(), ApiError> {
        let url = format!("{}/wiki/api/v2/spaces?limit=1", self.base_url);
        self.transport.send(&ApiRequest::get(url))?.expect_status(200)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::http::stub::StubTransport;

    const BASE: &str = "https://example.atlassian.net";

    const PAGE_BODY: &str = r#"{
        "id": "12345",
        "title": "Runbook",
        "spaceId": "98765",
        "version": {"number": 7, "createdAt": "2026-02-01T09:30:00.000Z"},
        "body": {
            "storage": {
                "value": "<h1>Deploy</h1><ac:structured-macro ac:name=\"info\"><ac:rich-text-body><p>Read first</p></ac:rich-text-body></ac:structured-macro>",
                "representation": "storage"
            }
        }
    }"#;

    #[test]
    fn page_ids_must_be_numeric() {
        assert!(validate_page_id("12345").is_ok());
        assert_eq!(
            validate_page_id("").unwrap_err().message,
            "page ID cannot be empty"
        );
        assert_eq!(
            validate_page_id("12a").unwrap_err().message,
            "invalid page ID: \"12a\" (must be numeric)"
        );
        assert!(validate_page_id("-1").is_err());
    }

    #[test]
    fn get_page_requests_storage_body() {
        let stub = StubTransport::replying(200, PAGE_BODY);
        ConfluenceClient::new(&stub, BASE)
            .get_page("12345", PageFormat::Storage)
            .unwrap();
        assert_eq!(
            stub.last_request().url,
            "https://example.atlassian.net/wiki/api/v2/pages/12345?body-format=storage"
        );
    }

    #[test]
    fn get_page_maps_fields() {
        let stub = StubTransport::replying(200, PAGE_BODY);
        let page = ConfluenceClient::new(&stub, BASE)
            .get_page("12345", PageFormat::Storage)
            .unwrap();
        assert_eq!(page.id, "12345");
        assert_eq!(page.title, "Runbook");
        assert_eq!(page.space_key, "98765");
        assert_eq!(page.version, 7);
        assert_eq!(page.updated, "2026-02-01T09:30:00.000Z");
        assert!(page.body.starts_with("<h1>Deploy</h1>"));

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["spaceKey"], "98765");
    }

    #[test]
    fn markdown_body_runs_the_storage_converter() {
        let stub = StubTransport::replying(200, PAGE_BODY);
        let page = ConfluenceClient::new(&stub, BASE)
            .get_page("12345", PageFormat::Markdown)
            .unwrap();
        assert!(page.body.starts_with("# Deploy"));
        assert!(page.body.contains("> **Info:**"));
        assert!(page.body.contains("Read first"));
    }

    #[test]
    fn missing_storage_body_is_empty() {
        let stub = StubTransport::replying(200, r#"{"id":"1","title":"t","spaceId":"2","version":{"number":1,"createdAt":""},"body":{}}"#);
        let page = ConfluenceClient::new(&stub, BASE)
            .get_page("1", PageFormat::Markdown)
            .unwrap();
        assert_eq!(page.body, "");
    }

    #[test]
    fn confluence_errors_use_the_title() {
        let stub = StubTransport::replying(
            403,
            r#"{"errors":[{"status":403,"code":"PERMISSION_DENIED","title":"Not permitted to view page"}]}"#,
        );
        let err = ConfluenceClient::new(&stub, BASE)
            .get_page("12345", PageFormat::Markdown)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::PermissionError);
        assert_eq!(err.message, "Not permitted to view page");
    }

    #[test]
    fn connectivity_lists_one_space() {
        let stub = StubTransport::replying(200, r#"{"results":[]}"#);
        ConfluenceClient::new(&stub, BASE)
            .check_connectivity()
            .unwrap();
        assert_eq!(
            stub.last_request().url,
            "https://example.atlassian.net/wiki/api/v2/spaces?limit=1"
        );
    }

    #[test]
    fn body_formats_parse() {
        assert_eq!("storage".parse::<PageFormat>().unwrap(), PageFormat::Storage);
        assert!("html".parse::<PageFormat>().is_err());
    }
}
