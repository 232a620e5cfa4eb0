//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the ADF tree and various text representations.

pub mod adf;
pub mod html;
pub mod markdown;
pub mod storage;

pub use adf::AdfFormat;
pub use html::HtmlFormat;
pub use markdown::MarkdownFormat;
pub use storage::StorageFormat;
