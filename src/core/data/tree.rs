use std::collections::BTreeMap;

use thiserror::Error;

/// A string leaf in a locale tree, with the line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub value: String,
    /// Line number (1-indexed) of the key in its source file.
    pub line: usize,
}

impl Leaf {
    pub fn new(value: impl Into<String>, line: usize) -> Self {
        Self {
            value: value.into(),
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleNode {
    Leaf(Leaf),
    Branch(LocaleTree),
}

/// Nested mapping from key segments to string leaves or sub-trees.
///
/// One tree exists per (namespace, locale) pair. Children are kept in a
/// `BTreeMap`, so iteration is always in lexicographic segment order no matter
/// how the source file ordered its keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleTree {
    children: BTreeMap<String, LocaleNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreePathError {
    #[error("key path is empty")]
    EmptyPath,
    #[error("'{path}' is defined both as a string and as a group")]
    LeafBranchClash { path: String },
    #[error("'{path}' is defined more than once")]
    Duplicate { path: String },
}

impl LocaleTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, segment: impl Into<String>, node: LocaleNode) -> Option<LocaleNode> {
        self.children.insert(segment.into(), node)
    }

    pub fn get(&self, segment: &str) -> Option<&LocaleNode> {
        self.children.get(segment)
    }

    /// Children in lexicographic segment order.
    pub fn children(&self) -> impl Iterator<Item = (&String, &LocaleNode)> {
        self.children.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Insert a leaf at a nested path, creating intermediate branches.
    pub fn insert_path(&mut self, segments: &[String], leaf: Leaf) -> Result<(), TreePathError> {
        let Some((last, parents)) = segments.split_last() else {
            return Err(TreePathError::EmptyPath);
        };

        let mut current = self;
        for (depth, segment) in parents.iter().enumerate() {
            let node = current
                .children
                .entry(segment.clone())
                .or_insert_with(|| LocaleNode::Branch(LocaleTree::new()));
            current = match node {
                LocaleNode::Branch(tree) => tree,
                LocaleNode::Leaf(_) => {
                    return Err(TreePathError::LeafBranchClash {
                        path: segments[..=depth].join("."),
                    });
                }
            };
        }

        match current.children.get(last) {
            Some(LocaleNode::Branch(_)) => Err(TreePathError::LeafBranchClash {
                path: segments.join("."),
            }),
            Some(LocaleNode::Leaf(_)) => Err(TreePathError::Duplicate {
                path: segments.join("."),
            }),
            None => {
                current.children.insert(last.clone(), LocaleNode::Leaf(leaf));
                Ok(())
            }
        }
    }

    /// Copy of this tree with every branch that holds no leaves removed.
    pub fn pruned(&self) -> LocaleTree {
        let children = self
            .children
            .iter()
            .filter_map(|(segment, node)| match node {
                LocaleNode::Leaf(leaf) => Some((segment.clone(), LocaleNode::Leaf(leaf.clone()))),
                LocaleNode::Branch(tree) => {
                    let pruned = tree.pruned();
                    (!pruned.is_empty()).then(|| (segment.clone(), LocaleNode::Branch(pruned)))
                }
            })
            .collect();
        LocaleTree { children }
    }

    /// Number of string leaves in the whole tree.
    pub fn leaf_count(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                LocaleNode::Leaf(_) => 1,
                LocaleNode::Branch(tree) => tree.leaf_count(),
            })
            .sum()
    }
}
