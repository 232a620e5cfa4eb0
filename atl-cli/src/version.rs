//! `atl version`

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_commit: &'static str,
    pub build_date: &'static str,
}

/// Version of this build. Commit and date come from `ATL_GIT_COMMIT` and
/// `ATL_BUILD_DATE` when they are set at compile time.
pub fn current() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_commit: option_env!("ATL_GIT_COMMIT").unwrap_or("unknown"),
        build_date: option_env!("ATL_BUILD_DATE").unwrap_or("unknown"),
    }
}
