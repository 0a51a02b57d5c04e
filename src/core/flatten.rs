//! Key flattener: nested locale trees to ordered dotted keys and back.

use crate::core::{
    FlatKey, Leaf, LeafType, LocaleNode, LocaleTree, MessageLocation, TreePathError,
};

/// How dotted keys of a namespace are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// `namespace.segment.segment`
    Namespace,
    /// `segment.segment` (the ungrouped legacy namespace)
    None,
}

/// Flatten one namespace tree into dotted keys.
///
/// Depth-first, visiting segments in lexicographic order at every level, so
/// the result is independent of the key order in the source file. Branches
/// without leaves contribute nothing.
pub fn flatten(
    namespace: &str,
    prefix: KeyPrefix,
    tree: &LocaleTree,
    file_path: &str,
) -> Vec<FlatKey> {
    let mut keys = Vec::with_capacity(tree.leaf_count());
    let mut segments = Vec::new();
    walk(namespace, prefix, tree, file_path, &mut segments, &mut keys);
    keys
}

fn walk(
    namespace: &str,
    prefix: KeyPrefix,
    tree: &LocaleTree,
    file_path: &str,
    segments: &mut Vec<String>,
    out: &mut Vec<FlatKey>,
) {
    for (segment, node) in tree.children() {
        segments.push(segment.clone());
        match node {
            LocaleNode::Leaf(leaf) => {
                let local = segments.join(".");
                let dotted_key = match prefix {
                    KeyPrefix::Namespace => format!("{}.{}", namespace, local),
                    KeyPrefix::None => local,
                };
                out.push(FlatKey {
                    dotted_key,
                    namespace: namespace.to_string(),
                    segments: segments.clone(),
                    leaf_type: LeafType::String,
                    value: leaf.value.clone(),
                    deprecated: false,
                    deprecation_note: None,
                    location: MessageLocation::with_line(file_path, leaf.line),
                });
            }
            LocaleNode::Branch(subtree) => {
                walk(namespace, prefix, subtree, file_path, segments, out);
            }
        }
        segments.pop();
    }
}

/// Rebuild a tree from flattened keys of a single namespace.
pub fn unflatten(keys: &[FlatKey]) -> Result<LocaleTree, TreePathError> {
    let mut tree = LocaleTree::new();
    for key in keys {
        tree.insert_path(&key.segments, Leaf::new(key.value.clone(), key.location.line))?;
    }
    Ok(tree)
}
