//! Rule resolution
//!
//! [`resolve`] is a pure recursive search over the rule tree with
//! greedy-with-fallback skip semantics: a skippable atom is dropped only
//! when matching it outright fails, and only once per atom. [`Searcher`]
//! wraps it with memoization keyed by the canonical path key, invalidated
//! wholesale whenever the tree generation changes. [`find_context`] selects
//! which layered tree a lookup runs against.

use crate::config::index::{RuleKey, RulePath};
use crate::config::tree::RuleTree;
use crate::config::{ContextLayer, ContextMap};
use std::collections::HashMap;
use tracing::trace;

/// Resolve a path against a tree.
///
/// An empty path resolves to the current subtree. Otherwise the head atom is
/// matched against the tree's children and the rest recursed; when that
/// fails and the head is skippable, the head is treated as absent and the
/// rest matched against the same subtree. Anything else is not-found.
pub fn resolve<'a>(keys: &[RuleKey], tree: &'a RuleTree) -> Option<&'a RuleTree> {
    let Some((head, rest)) = keys.split_first() else {
        return Some(tree);
    };

    if let Some(child) = tree.child(&head.atom) {
        if let Some(found) = resolve(rest, child) {
            return Some(found);
        }
    }

    if head.skippable {
        resolve(rest, tree)
    } else {
        None
    }
}

/// Memoizing wrapper around [`resolve`]
///
/// The cache maps canonical path keys to resolved subtrees for one tree
/// generation; a generation change clears it without any explicit eviction
/// call from the owner.
#[derive(Debug, Default)]
pub struct Searcher {
    generation: u64,
    cache: HashMap<String, Option<RuleTree>>,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve, memoized per `(generation, cache_key)`
    pub fn search(&mut self, path: &RulePath, generation: u64, tree: &RuleTree) -> Option<RuleTree> {
        if generation != self.generation {
            trace!(
                from = self.generation,
                to = generation,
                "rule tree generation changed, dropping memoized lookups"
            );
            self.cache.clear();
            self.generation = generation;
        }

        self.cache
            .entry(path.cache_key())
            .or_insert_with(|| resolve(path.keys(), tree).cloned())
            .clone()
    }
}

/// Select the first layered tree whose guard matches one of the fallback
/// guards (most specific first), run `lookup` against it, and report which
/// guard matched. With no matching layer (or no layer where the lookup
/// succeeds) the result is not-found.
pub fn find_context<'a, T>(
    layers: &'a [ContextLayer],
    fallbacks: &[ContextMap],
    mut lookup: impl FnMut(&'a ContextLayer) -> Option<T>,
) -> Option<(&'a ContextMap, T)> {
    for guard in fallbacks {
        for layer in layers.iter().filter(|l| &l.context == guard) {
            if let Some(found) = lookup(layer) {
                return Some((&layer.context, found));
            }
        }
    }
    None
}
