//! Configuration file management
//!
//! The rule table is written as TOML: top-level tables form the default
//! rule tree, and optional `[[context]]` entries add guarded layers that
//! apply only when their `when` map matches the active context.
//!
//! ```toml
//! [swipe.3.left]
//! command = "xdotool key alt+Left"
//!
//! [threshold]
//! swipe = 1.5
//!
//! [[context]]
//! when = { application = "browser" }
//! [context.rules.swipe.3.left]
//! command = "xdotool key ctrl+shift+Tab"
//! ```
//!
//! Misconfigured numeric attributes (a zero threshold, a negative interval)
//! are rejected at load time rather than surfacing as dead gestures later.

use crate::config::{ContextLayer, ContextMap, RuleTree};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Numeric rule attributes that must hold positive finite values
const NUMERIC_ATTRS: [&str; 3] = ["threshold", "interval", "distance"];

/// Parsed and validated configuration file
#[derive(Debug, Default)]
pub struct ConfigFile {
    /// Rule layers, default layer first
    pub layers: Vec<ContextLayer>,
}

impl ConfigFile {
    /// Load and validate a config file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from the default location; a missing file yields an empty
    /// rule table rather than an error
    pub fn load_default() -> crate::Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            warn!(path = %path.display(), "no config file found, no gestures are bound");
            Ok(Self::default())
        }
    }

    /// Default config path: `$XDG_CONFIG_HOME/gestured/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("gestured").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Parse and validate TOML text into rule layers
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let parsed: toml::Value =
            toml::from_str(content).map_err(|e| crate::Error::Parse(e.to_string()))?;
        let mut root = serde_json::to_value(&parsed)?;

        let Value::Object(ref mut map) = root else {
            return Err(crate::Error::Config(
                "config root must be a table".to_string(),
            ));
        };
        let contexts = map.remove("context");

        let mut layers = vec![ContextLayer {
            context: ContextMap::new(),
            tree: RuleTree::from_value(&root),
        }];

        if let Some(contexts) = contexts {
            let Value::Array(entries) = contexts else {
                return Err(crate::Error::Config(
                    "context must be an array of tables".to_string(),
                ));
            };
            for entry in &entries {
                layers.push(parse_context_entry(entry)?);
            }
        }

        for layer in &layers {
            validate_tree(&layer.tree, &mut Vec::new())?;
        }

        Ok(Self { layers })
    }
}

/// One `[[context]]` entry: a `when` guard map and a `rules` subtree
fn parse_context_entry(entry: &Value) -> crate::Result<ContextLayer> {
    let Value::Object(map) = entry else {
        return Err(crate::Error::Config(
            "each context entry must be a table".to_string(),
        ));
    };

    let mut context = ContextMap::new();
    if let Some(when) = map.get("when") {
        let Value::Object(pairs) = when else {
            return Err(crate::Error::Config(
                "context.when must be a table of strings".to_string(),
            ));
        };
        for (key, value) in pairs {
            let Some(value) = value.as_str() else {
                return Err(crate::Error::Config(format!(
                    "context.when.{key} must be a string"
                )));
            };
            context.insert(key.clone(), value.to_string());
        }
    }

    let tree = map
        .get("rules")
        .map(RuleTree::from_value)
        .unwrap_or_default();
    Ok(ContextLayer { context, tree })
}

/// Reject non-positive or non-finite numeric attributes and empty commands.
/// Numeric attributes appear both as path-specific leaves
/// (`swipe.3.right.threshold = 2`) and as kind-wide tables
/// (`threshold.swipe = 2`); both shapes are checked.
fn validate_tree(tree: &RuleTree, path: &mut Vec<String>) -> crate::Result<()> {
    let RuleTree::Node(children) = tree else {
        return Ok(());
    };
    let parent_is_numeric = path
        .last()
        .is_some_and(|p| NUMERIC_ATTRS.contains(&p.as_str()));

    for (atom, child) in children {
        let name = atom.to_string();
        path.push(name.clone());
        if let Some(value) = child.as_value() {
            if parent_is_numeric || NUMERIC_ATTRS.contains(&name.as_str()) {
                let number = value.as_f64().filter(|n| n.is_finite() && *n > 0.0);
                if number.is_none() {
                    return Err(crate::Error::Config(format!(
                        "{} must be a positive number, got {}",
                        path.join("."),
                        value,
                    )));
                }
            }
            if name == "command" && value.as_str().is_some_and(|s| s.trim().is_empty()) {
                return Err(crate::Error::Config(format!(
                    "{} must not be empty",
                    path.join("."),
                )));
            }
        }
        validate_tree(child, path)?;
        path.pop();
    }
    Ok(())
}
