//! HTML import tests
//!
//! Jira returns descriptions as rendered HTML; these cover the shapes it produces.

mod jira;
