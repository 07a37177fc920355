//! Read-only registry of callback names.
//!
//! A callback parameter names a function by dotted path (`app.handlers.done`,
//! `app[handlers].done`). Paths are resolved against this registry only,
//! never against live objects.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static BRACKET_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\w+)\]").expect("bracket segment pattern is valid"));

/// Registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The path had no segments.
    #[error("callback path is empty")]
    EmptyPath,
    /// A segment between two dots was empty.
    #[error("callback path `{path}` has an empty segment")]
    EmptySegment { path: String },
}

/// One named value in the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryEntry {
    /// Whether the value can be invoked as a callback.
    pub callable: bool,
    /// Properties reachable from this value.
    pub members: BTreeMap<String, RegistryEntry>,
}

/// Tree of known global names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackRegistry {
    root: BTreeMap<String, RegistryEntry>,
}

impl CallbackRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callable at `path`, creating plain values for its parents.
    pub fn with_callable(mut self, path: &str) -> Result<Self, RegistryError> {
        self.insert(path, true)?;
        Ok(self)
    }

    /// Registers a non-callable value at `path`.
    pub fn with_value(mut self, path: &str) -> Result<Self, RegistryError> {
        self.insert(path, false)?;
        Ok(self)
    }

    /// Registers `path`. An entry that is already callable stays callable.
    pub fn insert(&mut self, path: &str, callable: bool) -> Result<(), RegistryError> {
        let segments = split_path(path);
        if segments.iter().all(|segment| segment.is_empty()) {
            return Err(RegistryError::EmptyPath);
        }
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(RegistryError::EmptySegment {
                path: path.to_string(),
            });
        }
        let Some((last, parents)) = segments.split_last() else {
            return Err(RegistryError::EmptyPath);
        };
        let mut members = &mut self.root;
        for segment in parents {
            members = &mut members.entry(segment.clone()).or_default().members;
        }
        members.entry(last.clone()).or_default().callable |= callable;
        Ok(())
    }

    /// Looks up `path`, or `None` when any segment is unknown.
    pub fn resolve(&self, path: &str) -> Option<&RegistryEntry> {
        let mut segments = split_path(path).into_iter();
        let mut entry = self.root.get(&segments.next()?)?;
        for segment in segments {
            entry = entry.members.get(&segment)?;
        }
        Some(entry)
    }

    /// Returns `true` when `path` resolves to a callable entry.
    pub fn is_callable(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(|entry| entry.callable)
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Rewrites `[name]` to `.name`, drops one leading and one trailing dot, then
/// splits on dots.
fn split_path(path: &str) -> Vec<String> {
    let dotted = BRACKET_SEGMENT.replace_all(path, ".$1");
    let trimmed = dotted.strip_prefix('.').unwrap_or(&dotted);
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    trimmed.split('.').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CallbackRegistry {
        CallbackRegistry::new()
            .with_callable("app.handlers.done")
            .and_then(|registry| registry.with_value("app.config"))
            .expect("paths are valid")
    }

    #[test]
    fn dotted_and_bracket_paths_resolve() {
        let registry = registry();
        assert!(registry.is_callable("app.handlers.done"));
        assert!(registry.is_callable("app[handlers].done"));
        assert!(registry.is_callable(".app.handlers.done."));
    }

    #[test]
    fn parents_and_values_are_not_callable() {
        let registry = registry();
        assert!(registry.resolve("app.handlers").is_some());
        assert!(!registry.is_callable("app.handlers"));
        assert!(!registry.is_callable("app.config"));
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        let registry = registry();
        assert!(registry.resolve("app.handlers.missing").is_none());
        assert!(registry.resolve("app..handlers").is_none());
        assert!(registry.resolve("").is_none());
        assert!(!registry.is_callable("alert"));
    }

    #[test]
    fn malformed_registrations_are_rejected() {
        assert_eq!(
            CallbackRegistry::new().with_callable("").unwrap_err(),
            RegistryError::EmptyPath
        );
        assert!(matches!(
            CallbackRegistry::new().with_callable("a..b"),
            Err(RegistryError::EmptySegment { .. })
        ));
    }

    #[test]
    fn registry_loads_from_json() {
        let registry: CallbackRegistry =
            serde_json::from_str(r#"{"jsonp": {"callable": true}}"#).expect("valid registry");
        assert!(registry.is_callable("jsonp"));
    }
}
