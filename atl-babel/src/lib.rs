//! Rich-text conversion for Atlassian documents
//!
//!     This crate converts between the rich-text representations a Jira/Confluence client deals
//!     with: Markdown typed by a person, the Atlassian Document Format (ADF) tree Jira accepts,
//!     and the HTML / Confluence storage markup the services return.
//!
//!     This is a pure lib: it powers the atl binary but is shell agnostic. No code here reads
//!     env vars, prints, or touches the network.
//!
//! Architecture
//!
//!     Markdown → ADF goes through a hand-rolled block parser (./formats/markdown/parser.rs)
//!     that delegates inline spans to a tournament-style formatter (./formats/markdown/inline.rs).
//!     The tree (./adf) is a tagged sum type, and its JSON wire form is produced by serde.
//!
//!     Storage → Markdown runs three passes: macro rewriting (./formats/storage/macros.rs), a
//!     generic html5ever-based HTML → Markdown walk (./formats/html/converter.rs), then
//!     placeholder expansion (./formats/storage/postprocess.rs).
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── adf
//!     │   ├── nodes.rs            # Document tree
//!     │   └── wire.rs             # JSON mapping
//!     ├── formats
//!     │   ├── markdown            # parser, inline, serializer
//!     │   ├── adf                 # JSON format
//!     │   ├── html                # converter, strip
//!     │   └── storage             # macros, postprocess
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <format>
//!         └── <testname>.rs
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs includes them.
//!
//! Failure model
//!
//!     Malformed Markdown or HTML is expected input, not an error: it degrades to the most
//!     literal reading. The only error is [`ConversionError`].

/// Declare a lazily compiled, immutable regex from a literal pattern.
macro_rules! lazy_regex {
    ($pattern:expr, $message:expr $(,)?) => {
        once_cell::sync::Lazy::new(|| regex::Regex::new($pattern).expect($message))
    };
}

pub mod adf;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use adf::Document as AdfDocument;
pub use error::ConversionError;
pub use format::Format;
pub use formats::html::{html_to_markdown, strip_html};
pub use formats::markdown::inline::parse_inline;
pub use formats::markdown::parser::{markdown_to_adf, parse_markdown_to_blocks};
pub use formats::markdown::serializer::serialize_to_markdown;
pub use formats::storage::storage_to_markdown;
pub use registry::FormatRegistry;
