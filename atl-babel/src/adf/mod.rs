//! Atlassian Document Format (ADF)
//!
//!     The document tree shared by the Markdown block parser, the Markdown serializer and the
//!     JSON wire format sent to Jira. The tree is a tagged sum type: each block kind carries
//!     exactly the payload it needs, so a text run can never hold children and a list item
//!     always wraps exactly one paragraph of inline content.
//!
//!     [`nodes`] holds the in-memory model, [`wire`] maps it to and from the JSON schema
//!     `{type, attrs?, content?, text?, marks?}`.

pub mod nodes;
pub mod wire;

pub use nodes::{Block, Document, ListItem, Mark, Text};
