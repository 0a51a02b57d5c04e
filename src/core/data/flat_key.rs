use std::fmt;

use super::message::MessageLocation;

/// Type of a translation leaf. Only string leaves are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeafType {
    String,
}

impl fmt::Display for LeafType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafType::String => write!(f, "string"),
        }
    }
}

/// One flattened translation entry.
///
/// `dotted_key` is `namespace` + `.` + the joined `segments`, except for the
/// ungrouped legacy namespace whose keys carry no prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatKey {
    pub dotted_key: String,
    pub namespace: String,
    /// Segments below the namespace, root first.
    pub segments: Vec<String>,
    pub leaf_type: LeafType,
    /// Text in the locale the key was flattened from.
    pub value: String,
    pub deprecated: bool,
    pub deprecation_note: Option<String>,
    /// Where the key is defined.
    pub location: MessageLocation,
}
