//! Rule atoms and paths
//!
//! A rule path is the ordered key sequence a classified event is looked up
//! under, from most general (gesture kind) to most specific (leaf attribute
//! name such as `command`). Atoms may be marked skippable, in which case the
//! resolver may drop them when matching them outright fails.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single typed key in the rule tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Atom {
    /// String key (`"swipe"`, `"right"`, `"command"`)
    Str(String),
    /// Integer key (finger counts)
    Int(i64),
}

impl Atom {
    /// Parse a raw config key: numeric-looking keys become integers so
    /// `swipe.3` written as a string key still matches a 3-finger event
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => Atom::Int(n),
            Err(_) => Atom::Str(raw.to_string()),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Str(s) => f.write_str(s),
            Atom::Int(n) => write!(f, "{}", n),
        }
    }
}

// String conversions go through `parse` so literal-built paths carry the
// same atom values as tree keys.
impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Atom::parse(s)
    }
}

impl From<String> for Atom {
    fn from(s: String) -> Self {
        Atom::parse(&s)
    }
}

impl From<i64> for Atom {
    fn from(n: i64) -> Self {
        Atom::Int(n)
    }
}

impl From<u8> for Atom {
    fn from(n: u8) -> Self {
        Atom::Int(n as i64)
    }
}

/// An atom plus its optional-specificity flag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleKey {
    pub atom: Atom,
    pub skippable: bool,
}

impl RuleKey {
    /// Required key
    pub fn new(atom: impl Into<Atom>) -> Self {
        Self {
            atom: atom.into(),
            skippable: false,
        }
    }

    /// Key the resolver may drop when matching it fails
    pub fn skippable(atom: impl Into<Atom>) -> Self {
        Self {
            atom: atom.into(),
            skippable: true,
        }
    }
}

/// Ordered sequence of rule keys identifying a location in the rule tree
///
/// Two paths are cache-equal iff their atom values are equal in order; the
/// skippable flag does not participate in [`RulePath::cache_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct RulePath(Vec<RuleKey>);

impl RulePath {
    /// Build from keys
    pub fn new(keys: Vec<RuleKey>) -> Self {
        Self(keys)
    }

    /// The keys in order
    pub fn keys(&self) -> &[RuleKey] {
        &self.0
    }

    /// Canonical cache key: atom values joined deterministically
    pub fn cache_key(&self) -> String {
        let parts: Vec<String> = self.0.iter().map(|k| k.atom.to_string()).collect();
        parts.join(",")
    }

    /// Whether any key carries this atom value
    pub fn contains(&self, atom: &Atom) -> bool {
        self.0.iter().any(|k| &k.atom == atom)
    }

    /// A new path with one required key appended
    pub fn extended(&self, atom: impl Into<Atom>) -> Self {
        let mut keys = self.0.clone();
        keys.push(RuleKey::new(atom));
        Self(keys)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}

impl<A: Into<Atom>> FromIterator<A> for RulePath {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        Self(iter.into_iter().map(RuleKey::new).collect())
    }
}
