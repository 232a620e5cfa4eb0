//! Confluence storage format tests
//!
//! Tests for storage → Markdown conversion, macros included.

mod entities;
mod export;
mod macros;
