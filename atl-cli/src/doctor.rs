//! `atl doctor`: credential and connectivity checks

use crate::confluence::ConfluenceClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::jira::JiraClient;
use atl_config::AtlConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Missing,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub name: String,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Check {
    fn ok(name: &str) -> Self {
        Check {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: None,
        }
    }

    fn from_result(name: &str, result: Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => Check::ok(name),
            Err(err) => Check {
                name: name.to_string(),
                status: CheckStatus::Error,
                message: Some(err.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    pub status: ReportStatus,
    pub checks: Vec<Check>,
}

impl DoctorReport {
    pub fn is_ok(&self) -> bool {
        self.status == ReportStatus::Ok
    }
}

/// One check per credential variable.
pub fn credential_checks(config: &AtlConfig) -> Vec<Check> {
    config
        .credential_status()
        .into_iter()
        .map(|(variable, set)| {
            if set {
                Check::ok(variable)
            } else {
                Check {
                    name: variable.to_string(),
                    status: CheckStatus::Missing,
                    message: Some("Environment variable not set".to_string()),
                }
            }
        })
        .collect()
}

/// Run every check. Connectivity is only probed once all credentials are present.
///
/// `transport` is only invoked when it is needed, so a missing-credentials run never
/// builds an HTTP client.
pub fn run<T, F>(config: &AtlConfig, transport: F) -> DoctorReport
where
    T: Transport,
    F: FnOnce() -> Result<T, ApiError>,
{
    let mut checks = credential_checks(config);

    if checks.iter().all(|check| check.status == CheckStatus::Ok) {
        match transport() {
            Ok(transport) => {
                let base_url = config.base_url();
                let jira = JiraClient::new(&transport, base_url.clone(), config.site_host());
                checks.push(Check::from_result(
                    "jira_connectivity",
                    jira.check_connectivity(),
                ));
                let confluence = ConfluenceClient::new(&transport, base_url);
                checks.push(Check::from_result(
                    "confluence_connectivity",
                    confluence.check_connectivity(),
                ));
            }
            Err(err) => {
                for name in ["jira_connectivity", "confluence_connectivity"] {
                    checks.push(Check::from_result(name, Err(err.clone())));
                }
            }
        }
    }

    let status = if checks.iter().all(|check| check.status == CheckStatus::Ok) {
        ReportStatus::Ok
    } else {
        ReportStatus::Error
    };
    DoctorReport { status, checks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::StubTransport;
    use crate::http::ApiResponse;
    use atl_config::Loader;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AtlConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Loader::new().with_env_map(vars).build().unwrap()
    }

    fn full_config() -> AtlConfig {
        config(&[
            ("ATL_CLI_SITE", "example.atlassian.net"),
            ("ATL_CLI_EMAIL", "dev@example.com"),
            ("ATL_CLI_TOKEN", "secret"),
        ])
    }

    #[test]
    fn missing_credentials_skip_connectivity() {
        let report = run(
            &config(&[("ATL_CLI_SITE", "example.atlassian.net")]),
            || -> Result<StubTransport, ApiError> { panic!("transport must not be built") },
        );
        assert_eq!(report.status, ReportStatus::Error);
        assert_eq!(report.checks.len(), 3);
        assert_eq!(report.checks[0].status, CheckStatus::Ok);
        assert_eq!(report.checks[1].name, "ATL_CLI_EMAIL");
        assert_eq!(report.checks[1].status, CheckStatus::Missing);
        assert_eq!(
            report.checks[1].message.as_deref(),
            Some("Environment variable not set")
        );
    }

    #[test]
    fn all_checks_pass() {
        let report = run(&full_config(), || {
            Ok(StubTransport::new(vec![
                Ok(ApiResponse::new(200, "{}")),
                Ok(ApiResponse::new(200, "{}")),
            ]))
        });
        assert!(report.is_ok());
        let names: Vec<_> = report.checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "ATL_CLI_SITE",
                "ATL_CLI_EMAIL",
                "ATL_CLI_TOKEN",
                "jira_connectivity",
                "confluence_connectivity"
            ]
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["checks"][0].get("message").is_none());
    }

    #[test]
    fn connectivity_failures_carry_the_error() {
        let report = run(&full_config(), || {
            Ok(StubTransport::new(vec![
                Ok(ApiResponse::new(401, "")),
                Ok(ApiResponse::new(200, "{}")),
            ]))
        });
        assert!(!report.is_ok());
        let jira = &report.checks[3];
        assert_eq!(jira.status, CheckStatus::Error);
        assert_eq!(
            jira.message.as_deref(),
            Some("auth_error: Authentication failed - check your credentials")
        );
        assert_eq!(report.checks[4].status, CheckStatus::Ok);
    }
}
