//! Core data types used across all pipeline stages.
//!
//! ## Module Structure
//!
//! - `flat_key`: FlatKey and LeafType (flattened translation entries)
//! - `message`: Locale file location types (MessageContext, MessageLocation)
//! - `source`: Source code location types (SourceContext, SourceLocation)
//! - `tree`: LocaleTree (nested keys as read from one namespace file)

pub mod flat_key;
pub mod message;
pub mod source;
pub mod tree;

pub use flat_key::{FlatKey, LeafType};
pub use message::{MessageContext, MessageLocation};
pub use source::{SourceContext, SourceLocation};
pub use tree::{Leaf, LocaleNode, LocaleTree, TreePathError};
