//! Generator pipeline and source scanning.
//!
//! Data flows loader → flattener → merger → detector → tracker → emitter.
//! `pipeline` runs the stages in that order for one command invocation;
//! the detector rules themselves live in `crate::rules`.
//!
//! ## Module Structure
//!
//! - `data`: Shared value types (trees, flat keys, locations)
//! - `loader`: Locale directory discovery and parallel parsing
//! - `flatten`: LocaleTree to ordered FlatKey list (and back)
//! - `manifest`: Namespace emission order
//! - `merge`: Concatenation of namespaces in emission order
//! - `deprecation`: Deprecation list loading and annotation
//! - `emit`: Schema rendering, content hash, atomic writes, `--check` comparison
//! - `file_scanner` / `parsers::source`: Application source scanning for key usages
//! - `pipeline`: Configuration-bound orchestration of the stages

pub mod data;
pub mod deprecation;
pub mod emit;
pub mod error;
pub mod file_scanner;
pub mod flatten;
pub mod key_usage;
pub mod loader;
pub mod manifest;
pub mod merge;
pub mod parsers;
pub mod pipeline;
pub mod schema;

pub use data::*;
pub use error::SourceError;
pub use key_usage::{AllKeyUsages, KeyUsage};
pub use pipeline::{LoadedSources, SchemaBuild, SchemaContext, UsageScan};
pub use schema::Schema;
