//! Writing results and errors
//!
//! Results go to stdout as JSON (or raw text with `--raw`); errors go to stderr as the
//! pretty JSON envelope. Nothing else is ever printed to stdout.

use crate::error::ApiError;
use serde::Serialize;

pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, ApiError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), ApiError> {
    println!("{}", render_json(value, pretty)?);
    Ok(())
}

/// Print a converted body without the JSON wrapper.
pub fn print_raw(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

pub fn report_error(err: &ApiError) {
    eprintln!("{}", err.to_json());
}
