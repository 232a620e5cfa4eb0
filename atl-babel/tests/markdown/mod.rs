//! Markdown format tests
//!
//! Tests for Markdown → ADF import and ADF → Markdown export.

mod export;
mod import;
