//! Issue templates
//!
//! A template is a Markdown file with YAML frontmatter:
//!
//!     ---
//!     version: 1
//!     issueType: story
//!     project: PROJ
//!     summary: "{{.feature}}: initial spike"
//!     labels: [spike, "{{.team}}"]
//!     ---
//!     ## Goal
//!     Explore {{.feature}}.
//!
//! The body becomes the issue description. `{{.name}}` placeholders in the summary, labels
//! and body are filled from `--var name=value` flags.

use crate::error::ApiError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
        .expect("valid template placeholder regex")
});

/// Rendered in place of a variable that was not supplied.
pub const MISSING_VALUE: &str = "<no value>";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    pub version: i64,
    #[serde(rename = "issueType", default)]
    pub issue_type: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Template values after variable substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTemplate {
    pub project: String,
    pub issue_type: String,
    pub summary: String,
    pub labels: Vec<String>,
    pub description: String,
}

impl Template {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|err| {
            ApiError::validation(format!("failed to read template file: {err}"))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ApiError> {
        let rest = content
            .strip_prefix("---\n")
            .ok_or_else(|| ApiError::validation("template must start with YAML frontmatter (---)"))?;
        let end = rest.find("\n---").ok_or_else(|| {
            ApiError::validation("template frontmatter not properly closed (missing ---)")
        })?;

        let yaml = &rest[..end];
        let after = &rest[end + "\n---".len()..];
        let body = after.strip_prefix('\n').unwrap_or(after).to_string();

        let frontmatter: Frontmatter = if yaml.trim().is_empty() {
            Frontmatter::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|err| {
                ApiError::validation(format!("failed to parse template frontmatter: {err}"))
            })?
        };

        if frontmatter.version != 1 {
            return Err(ApiError::validation(format!(
                "unsupported template version: {} (expected 1)",
                frontmatter.version
            )));
        }

        Ok(Template { frontmatter, body })
    }

    /// Fill placeholders; labels that render empty are dropped and the description is trimmed.
    pub fn apply(&self, vars: &HashMap<String, String>) -> ParsedTemplate {
        let labels = self
            .frontmatter
            .labels
            .iter()
            .map(|label| substitute(label, vars))
            .filter(|label| !label.is_empty())
            .collect();

        ParsedTemplate {
            project: self.frontmatter.project.clone(),
            issue_type: self.frontmatter.issue_type.clone(),
            summary: substitute(&self.frontmatter.summary, vars),
            labels,
            description: substitute(&self.body, vars).trim().to_string(),
        }
    }
}

fn substitute(text: &str, vars: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            vars.get(&caps[1])
                .cloned()
                .unwrap_or_else(|| MISSING_VALUE.to_string())
        })
        .into_owned()
}

/// Parse repeated `--var key=value` flags. The value may itself contain `=`.
pub fn parse_var_flags<S: AsRef<str>>(flags: &[S]) -> Result<HashMap<String, String>, ApiError> {
    let mut vars = HashMap::new();
    for flag in flags {
        let flag = flag.as_ref();
        let (key, value) = flag.split_once('=').ok_or_else(|| {
            ApiError::validation(format!(
                "invalid variable format {flag:?} (expected key=value)"
            ))
        })?;
        if key.is_empty() {
            return Err(ApiError::validation(format!(
                "variable key cannot be empty in {flag:?}"
            )));
        }
        vars.insert(key.to_string(), value.to_string());
    }
    Ok(vars)
}
