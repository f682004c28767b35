//! Rule paths, the nested rule tree, and the memoized resolver
//!
//! The rule table is held as an immutable [`ConfigSnapshot`] behind an
//! [`ConfigStore`]. Reloads swap the snapshot wholesale; in-flight
//! resolutions keep the `Arc` they started with, so there are no torn
//! reads, and the bumped generation invalidates every memoized lookup
//! lazily on next access.

pub mod index;
pub mod searcher;
pub mod tree;

pub use index::{Atom, RuleKey, RulePath};
pub use searcher::{find_context, resolve, Searcher};
pub use tree::RuleTree;

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Guard predicate of a context layer: key/value pairs that must match the
/// requested context for the layer to apply
pub type ContextMap = BTreeMap<String, String>;

/// One layered rule tree with its guard
#[derive(Debug, Clone, Default)]
pub struct ContextLayer {
    /// Guard; the empty map is the unconditional default layer
    pub context: ContextMap,
    /// Rule tree root for this layer
    pub tree: RuleTree,
}

/// Immutable view of the rule table at one generation
#[derive(Debug, Default)]
pub struct ConfigSnapshot {
    /// Tree-generation identity; memoization is valid within one generation
    pub generation: u64,
    /// Layered trees, in file order
    pub layers: Vec<ContextLayer>,
}

impl ConfigSnapshot {
    /// The default layer's tree: the first layer with an empty guard, or the
    /// first layer at all, or an empty tree
    pub fn primary(&self) -> &RuleTree {
        static EMPTY: RuleTree = RuleTree::Node(BTreeMap::new());
        self.layers
            .iter()
            .find(|l| l.context.is_empty())
            .or_else(|| self.layers.first())
            .map(|l| &l.tree)
            .unwrap_or(&EMPTY)
    }
}

/// Read-mostly, atomically swappable rule table
///
/// Shared across pipeline instances; each read takes a cheap `Arc` clone of
/// the current snapshot and continues against it even if a reload lands
/// mid-resolution.
#[derive(Debug)]
pub struct ConfigStore {
    inner: RwLock<Arc<ConfigSnapshot>>,
}

impl ConfigStore {
    /// Create a store with an initial set of layers (generation 1)
    pub fn new(layers: Vec<ContextLayer>) -> Self {
        Self {
            inner: RwLock::new(Arc::new(ConfigSnapshot {
                generation: 1,
                layers,
            })),
        }
    }

    /// Create a store from a single unguarded tree
    pub fn from_tree(tree: RuleTree) -> Self {
        Self::new(vec![ContextLayer {
            context: ContextMap::new(),
            tree,
        }])
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        Arc::clone(&self.inner.read())
    }

    /// Replace all layers, bumping the generation
    pub fn swap(&self, layers: Vec<ContextLayer>) {
        let mut guard = self.inner.write();
        let generation = guard.generation + 1;
        *guard = Arc::new(ConfigSnapshot { generation, layers });
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_survives_swap() {
        let store = ConfigStore::from_tree(RuleTree::from_value(&json!({
            "pinch": { "in": { "command": "ctrl+plus" } },
        })));

        let before = store.snapshot();
        store.swap(Vec::new());
        let after = store.snapshot();

        // The old snapshot still resolves; the new one does not
        let path: RulePath = ["pinch", "in", "command"].into_iter().collect();
        assert!(resolve(path.keys(), before.primary()).is_some());
        assert!(resolve(path.keys(), after.primary()).is_none());
        assert_eq!(after.generation, before.generation + 1);
    }

    #[test]
    fn test_primary_prefers_unguarded_layer() {
        let guarded: ContextMap = [("application".to_string(), "browser".to_string())]
            .into_iter()
            .collect();
        let store = ConfigStore::new(vec![
            ContextLayer {
                context: guarded,
                tree: RuleTree::from_value(&json!({ "a": "guarded" })),
            },
            ContextLayer {
                context: ContextMap::new(),
                tree: RuleTree::from_value(&json!({ "a": "default" })),
            },
        ]);

        let snapshot = store.snapshot();
        let leaf = snapshot.primary().child(&Atom::from("a")).unwrap();
        assert_eq!(leaf.as_str(), Some("default"));
    }

    #[test]
    fn test_empty_store_primary_is_empty_tree() {
        let store = ConfigStore::default();
        let snapshot = store.snapshot();
        assert!(snapshot.primary().child(&Atom::from("swipe")).is_none());
    }
}
