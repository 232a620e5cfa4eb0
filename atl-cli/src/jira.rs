//! Jira issue adapter
//!
//! Reads issues through `/rest/api/3/issue/{key}?expand=renderedFields`, converting the
//! rendered HTML description on the way out, and creates issues whose description is the
//! ADF tree built from Markdown.

use crate::error::ApiError;
use crate::http::{ApiRequest, Transport};
use crate::template::ParsedTemplate;
use atl_babel::{html_to_markdown, markdown_to_adf, strip_html, AdfDocument};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

static ISSUE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9]*-[0-9]+$").expect("valid issue key regex"));
static PROJECT_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9]*$").expect("valid project key regex"));

pub fn validate_issue_key(key: &str) -> Result<(), ApiError> {
    if key.is_empty() {
        return Err(ApiError::validation("issue key cannot be empty"));
    }
    if !ISSUE_KEY.is_match(key) {
        return Err(ApiError::validation(format!(
            "invalid issue key format: {key:?} (expected format: PROJ-123)"
        )));
    }
    Ok(())
}

pub fn validate_project_key(key: &str) -> Result<(), ApiError> {
    if key.is_empty() {
        return Err(ApiError::validation("project key cannot be empty"));
    }
    if !PROJECT_KEY.is_match(key) {
        return Err(ApiError::validation(format!(
            "invalid project key format: {key:?} (expected format: PROJ)"
        )));
    }
    Ok(())
}

/// How the rendered description is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptionFormat {
    #[default]
    Markdown,
    Text,
    Html,
}

impl DescriptionFormat {
    pub const NAMES: &'static [&'static str] = &["markdown", "text", "html"];

    /// Convert Jira's rendered HTML.
    pub fn render(&self, html: &str) -> Result<String, ApiError> {
        match self {
            DescriptionFormat::Markdown => Ok(html_to_markdown(html)?),
            DescriptionFormat::Text => Ok(strip_html(html)),
            DescriptionFormat::Html => Ok(html.to_string()),
        }
    }
}

impl FromStr for DescriptionFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(DescriptionFormat::Markdown),
            "text" => Ok(DescriptionFormat::Text),
            "html" => Ok(DescriptionFormat::Html),
            other => Err(ApiError::validation(format!(
                "invalid body format {other:?} (valid formats: {})",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// Issue types accepted by `jira issue create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    Story,
    Subtask,
    Task,
    Bug,
}

impl IssueType {
    pub const NAMES: &'static [&'static str] = &["story", "subtask", "task", "bug"];

    /// Name Jira knows the type by.
    pub fn api_name(&self) -> &'static str {
        match self {
            IssueType::Story => "Story",
            IssueType::Subtask => "Sub-task",
            IssueType::Task => "Task",
            IssueType::Bug => "Bug",
        }
    }
}

impl FromStr for IssueType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "story" => Ok(IssueType::Story),
            "subtask" => Ok(IssueType::Subtask),
            "task" => Ok(IssueType::Task),
            "bug" => Ok(IssueType::Bug),
            _ => Err(ApiError::validation(format!(
                "invalid issue type {s:?} (valid types: {})",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// Issue as printed by `jira issue get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub assignee: Option<String>,
    pub priority: Option<String>,
    pub created: String,
    pub updated: String,
    pub description: String,
    pub url: String,
}

#[derive(Deserialize)]
struct IssueResponse {
    key: String,
    #[serde(default)]
    fields: IssueFields,
    #[serde(rename = "renderedFields", default)]
    rendered_fields: RenderedFields,
}

#[derive(Deserialize, Default)]
struct IssueFields {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    status: Option<Named>,
    #[serde(default)]
    assignee: Option<Person>,
    #[serde(default)]
    priority: Option<Named>,
    #[serde(default)]
    created: String,
    #[serde(default)]
    updated: String,
}

#[derive(Deserialize)]
struct Named {
    name: String,
}

#[derive(Deserialize)]
struct Person {
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Deserialize, Default)]
struct RenderedFields {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyRef {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameRef {
    pub name: String,
}

/// Body of `POST /rest/api/3/issue`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateIssueRequest {
    pub fields: CreateIssueFields,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateIssueFields {
    pub project: KeyRef,
    #[serde(rename = "issuetype")]
    pub issue_type: NameRef,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<AdfDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<KeyRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

#[derive(Deserialize)]
struct CreateIssueResponse {
    key: String,
}

/// Output of `jira issue create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedIssue {
    pub key: String,
    pub url: String,
}

/// Everything `jira issue create` collects before the request is built.
///
/// Template values are loaded first; flags then replace whatever they set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueDraft {
    pub project: Option<String>,
    pub issue_type: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parent: Option<String>,
    pub labels: Vec<String>,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Split a `--labels` value on commas, trimming each entry.
pub fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',').map(|label| label.trim().to_string()).collect()
}

impl IssueDraft {
    pub fn from_template(template: ParsedTemplate) -> Self {
        IssueDraft {
            project: non_empty(template.project),
            issue_type: non_empty(template.issue_type),
            summary: non_empty(template.summary),
            description: non_empty(template.description),
            parent: None,
            labels: template.labels,
        }
    }

    /// Overlay flag values; empty flags leave the draft untouched.
    pub fn override_with(mut self, flags: IssueDraft) -> Self {
        fn pick(current: &mut Option<String>, flag: Option<String>) {
            if let Some(value) = flag.and_then(non_empty) {
                *current = Some(value);
            }
        }
        pick(&mut self.project, flags.project);
        pick(&mut self.issue_type, flags.issue_type);
        pick(&mut self.summary, flags.summary);
        pick(&mut self.description, flags.description);
        pick(&mut self.parent, flags.parent);
        if !flags.labels.is_empty() {
            self.labels = flags.labels;
        }
        self
    }

    /// Validate the draft and build the create request.
    ///
    /// Checks run in a fixed order so the first problem reported is stable: required
    /// fields, project key, issue type, then the parent key.
    pub fn into_request(self) -> Result<CreateIssueRequest, ApiError> {
        let project = self
            .project
            .ok_or_else(|| ApiError::validation("--project is required"))?;
        let raw_type = self
            .issue_type
            .ok_or_else(|| ApiError::validation("--type is required"))?;
        let summary = self
            .summary
            .ok_or_else(|| ApiError::validation("--summary is required"))?;

        validate_project_key(&project)?;
        let issue_type: IssueType = raw_type.parse()?;

        if issue_type == IssueType::Subtask && self.parent.is_none() {
            return Err(ApiError::validation("--parent is required for subtask"));
        }
        if let Some(parent) = &self.parent {
            validate_issue_key(parent).map_err(|err| {
                ApiError::validation(format!("invalid parent key: {}", err.message))
            })?;
        }

        let description = self.description.as_deref().and_then(markdown_to_adf);
        let labels = self
            .labels
            .into_iter()
            .filter(|label| !label.is_empty())
            .collect();

        Ok(CreateIssueRequest {
            fields: CreateIssueFields {
                project: KeyRef { key: project },
                issue_type: NameRef {
                    name: issue_type.api_name().to_string(),
                },
                summary,
                description,
                parent: self.parent.map(|key| KeyRef { key }),
                labels,
            },
        })
    }
}

/// Jira REST client bound to one site.
pub struct JiraClient<T> {
    transport: T,
    base_url: String,
    site: String,
}

impl<T: Transport> JiraClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>, site: impl Into<String>) -> Self {
        JiraClient {
            transport,
            base_url: base_url.into(),
            site: site.into(),
        }
    }

    fn browse_url(&self, key: &str) -> String {
        format!("https://{}/browse/{}", self.site, key)
    }

    pub fn get_issue(&self, key: &str, format: DescriptionFormat) -> Result<Issue, ApiError> {
        validate_issue_key(key)?;
        let url = format!(
            "{}/rest/api/3/issue/{}?expand=renderedFields",
            self.base_url, key
        );
        let response = self.transport.send(&ApiRequest::get(url))?.expect_status(200)?;
        let parsed: IssueResponse = response.json()?;

        let description = match parsed.rendered_fields.description.as_deref() {
            Some(html) => format.render(html)?,
            None => String::new(),
        };

        Ok(Issue {
            url: self.browse_url(&parsed.key),
            key: parsed.key,
            summary: parsed.fields.summary,
            status: parsed.fields.status.map(|s| s.name).unwrap_or_default(),
            assignee: parsed.fields.assignee.map(|a| a.display_name),
            priority: parsed.fields.priority.map(|p| p.name),
            created: parsed.fields.created,
            updated: parsed.fields.updated,
            description,
        })
    }

    pub fn create_issue(&self, request: &CreateIssueRequest) -> Result<CreatedIssue, ApiError> {
        validate_project_key(&request.fields.project.key)?;
        if let Some(parent) = &request.fields.parent {
            validate_issue_key(&parent.key).map_err(|err| {
                ApiError::validation(format!("invalid parent key: {}", err.message))
            })?;
        }

        let url = format!("{}/rest/api/3/issue", self.base_url);
        let body = serde_json::to_value(request)?;
        let response = self
            .transport
            .send(&ApiRequest::post(url, body))?
            .expect_status(201)?;
        let created: CreateIssueResponse = response.json()?;

        tracing::info!(key = %created.key, "issue created");
        Ok(CreatedIssue {
            url: self.browse_url(&created.key),
            key: created.key,
        })
    }

    /// `GET /rest/api/3/myself`
    pub fn check_connectivity(&self) -> Result<(), ApiError> {
        let url = format!("{}/rest/api/3/myself", self.base_url);
        self.transport.send(&ApiRequest::get(url))?.expect_status(200)?;
        Ok(())
    }
}
