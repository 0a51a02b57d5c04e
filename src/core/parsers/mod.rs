//! File parsers for locale sources and application code.
//!
//! - `json`: locale JSON parser (one namespace file into a LocaleTree)
//! - `source`: lookup call-site scanner for application source files

pub mod json;
pub mod source;
