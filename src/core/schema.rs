//! The derived key schema, threaded by value through emitter and validator.

use std::collections::HashMap;

use crate::core::FlatKey;

/// Ordered, annotated, duplicate-free key set produced by one generator run.
///
/// Never cached between runs: every command derives it fresh from the locale
/// sources, so consumers cannot hold a copy that has drifted.
#[derive(Debug, Clone)]
pub struct Schema {
    namespaces: Vec<String>,
    keys: Vec<FlatKey>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from merged keys. Keys must already be unique.
    pub fn new(namespaces: Vec<String>, keys: Vec<FlatKey>) -> Self {
        let index = keys
            .iter()
            .enumerate()
            .map(|(i, key)| (key.dotted_key.clone(), i))
            .collect();
        Self {
            namespaces,
            keys,
            index,
        }
    }

    /// Namespaces in emission order, including ones that produced no keys.
    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// Keys in emission order.
    pub fn keys(&self) -> &[FlatKey] {
        &self.keys
    }

    pub fn get(&self, dotted_key: &str) -> Option<&FlatKey> {
        self.index.get(dotted_key).map(|&i| &self.keys[i])
    }

    pub fn contains(&self, dotted_key: &str) -> bool {
        self.index.contains_key(dotted_key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
