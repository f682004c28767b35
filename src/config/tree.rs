//! The nested rule tree
//!
//! A typed recursive sum type: interior nodes map atom values to subtrees,
//! leaves hold the configured action value (a command string, a numeric
//! multiplier, whatever the user wrote). Built from in-memory JSON values;
//! the file format and loading belong to the app layer.

use crate::config::index::Atom;
use serde_json::Value;
use std::collections::BTreeMap;

/// Nested mapping from atom value to subtree or configured leaf
#[derive(Debug, Clone, PartialEq)]
pub enum RuleTree {
    /// Configured action value
    Leaf(Value),
    /// Nested mapping
    Node(BTreeMap<Atom, RuleTree>),
}

impl RuleTree {
    /// An empty node; resolving anything against it yields not-found
    pub fn empty() -> Self {
        RuleTree::Node(BTreeMap::new())
    }

    /// Convert an in-memory JSON value into a tree. Object keys that look
    /// numeric become integer atoms so finger counts written as `"3"` match
    /// integer path keys.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => {
                let children = map
                    .iter()
                    .map(|(k, v)| (Atom::parse(k), RuleTree::from_value(v)))
                    .collect();
                RuleTree::Node(children)
            }
            other => RuleTree::Leaf(other.clone()),
        }
    }

    /// Child subtree for an atom value, if this is a node holding one
    pub fn child(&self, atom: &Atom) -> Option<&RuleTree> {
        match self {
            RuleTree::Node(children) => children.get(atom),
            RuleTree::Leaf(_) => None,
        }
    }

    /// Leaf payload, if this is a leaf
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            RuleTree::Leaf(v) => Some(v),
            RuleTree::Node(_) => None,
        }
    }

    /// Leaf payload as a string
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    /// Leaf payload as a float (integers widen)
    pub fn as_f64(&self) -> Option<f64> {
        self.as_value().and_then(Value::as_f64)
    }
}

impl Default for RuleTree {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_builds_nested_nodes() {
        let tree = RuleTree::from_value(&json!({
            "swipe": {
                "3": {
                    "left": { "command": "alt+Left" },
                    "right": { "command": "alt+Right" },
                },
            },
        }));

        let node = tree
            .child(&Atom::from("swipe"))
            .and_then(|t| t.child(&Atom::Int(3)))
            .and_then(|t| t.child(&Atom::from("left")))
            .and_then(|t| t.child(&Atom::from("command")))
            .unwrap();
        assert_eq!(node.as_str(), Some("alt+Left"));
    }

    #[test]
    fn test_numeric_keys_become_int_atoms() {
        let tree = RuleTree::from_value(&json!({ "3": "x" }));
        assert!(tree.child(&Atom::Int(3)).is_some());
        assert!(tree.child(&Atom::Str("3".to_string())).is_none());
    }

    #[test]
    fn test_leaf_accessors() {
        let leaf = RuleTree::Leaf(json!(2.5));
        assert_eq!(leaf.as_f64(), Some(2.5));
        assert_eq!(leaf.as_str(), None);
        assert!(leaf.child(&Atom::from("x")).is_none());

        let leaf = RuleTree::Leaf(json!(2));
        assert_eq!(leaf.as_f64(), Some(2.0));
    }

    #[test]
    fn test_empty_tree_has_no_children() {
        assert!(RuleTree::empty().child(&Atom::from("swipe")).is_none());
        assert!(RuleTree::empty().as_value().is_none());
    }
}
