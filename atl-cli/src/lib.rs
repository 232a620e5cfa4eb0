//! Atlassian Cloud client behind the `atl` binary
//!
//!     The binary is thin: it parses arguments (./cli.rs), loads an [`atl_config::AtlConfig`],
//!     and hands off to the adapters here. Everything below talks JSON to the Jira and
//!     Confluence REST APIs and uses atl-babel for every rich-text conversion.
//!
//!     .
//!     ├── cli.rs          # clap command tree (shared with build.rs)
//!     ├── error.rs        # JSON error envelope
//!     ├── http.rs         # Transport trait and the reqwest gateway
//!     ├── jira.rs         # issue get / create
//!     ├── confluence.rs   # page get
//!     ├── template.rs     # issue templates
//!     ├── doctor.rs       # credential and connectivity checks
//!     ├── output.rs       # stdout / stderr writers
//!     └── version.rs
//!
//!     Adapters are generic over [`http::Transport`]; unit tests drive them with a scripted
//!     transport instead of the network.

pub mod cli;
pub mod confluence;
pub mod doctor;
pub mod error;
pub mod http;
pub mod jira;
pub mod output;
pub mod template;
pub mod version;

pub use error::{ApiError, ErrorKind};
