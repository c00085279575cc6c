//! Ordered plugin declaration
//!
//! Plugins are applied in declaration order. The bridging plugin (the
//! Flutter Gradle plugin) reads the configuration of the Android and Kotlin
//! plugins, so it is held apart and always emitted last.

use serde::{Serialize, Serializer};

use super::ident::is_plugin_id;
use crate::error::ResolveError;

/// Plugin id of the Flutter Gradle plugin
pub const FLUTTER_BRIDGE_PLUGIN: &str = "dev.flutter.flutter-gradle-plugin";

/// Ordered plugin ids with the bridging plugin pinned last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDeclaration {
    bridge: String,
    others: Vec<String>,
    bridge_declared: bool,
}

impl PluginDeclaration {
    /// Empty declaration with the given bridging plugin id
    pub fn new(bridge: impl Into<String>) -> Self {
        Self {
            bridge: bridge.into(),
            others: Vec::new(),
            bridge_declared: false,
        }
    }

    /// Build from a declared list. Duplicates collapse to the first occurrence.
    pub fn from_ids<I, S>(ids: I, bridge: impl Into<String>) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut decl = Self::new(bridge);
        if !is_plugin_id(&decl.bridge) {
            return Err(ResolveError::invalid(format!(
                "bridging plugin id must be a valid plugin id (got '{}')",
                decl.bridge
            )));
        }
        for id in ids {
            decl.apply(id)?;
        }
        Ok(decl)
    }

    /// Append a plugin. The bridging plugin stays after it.
    pub fn apply(&mut self, id: impl Into<String>) -> Result<(), ResolveError> {
        let len = self.others.len();
        self.insert(len, id)
    }

    /// Insert a plugin at `index` among the non-bridging plugins (clamped).
    pub fn insert(&mut self, index: usize, id: impl Into<String>) -> Result<(), ResolveError> {
        let id = id.into();
        if !is_plugin_id(&id) {
            return Err(ResolveError::invalid(format!(
                "plugin ids must be dotted identifiers (got '{}')",
                id
            )));
        }
        if id == self.bridge {
            self.bridge_declared = true;
            return Ok(());
        }
        if self.others.contains(&id) {
            return Ok(());
        }
        let index = index.min(self.others.len());
        self.others.insert(index, id);
        Ok(())
    }

    /// Remove a plugin; returns whether it was present
    pub fn remove(&mut self, id: &str) -> bool {
        if id == self.bridge {
            return std::mem::replace(&mut self.bridge_declared, false);
        }
        let before = self.others.len();
        self.others.retain(|p| p != id);
        self.others.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        if id == self.bridge {
            self.bridge_declared
        } else {
            self.others.iter().any(|p| p == id)
        }
    }

    pub fn bridge(&self) -> &str {
        &self.bridge
    }

    pub fn len(&self) -> usize {
        self.others.len() + usize::from(self.bridge_declared)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Final application order
    pub fn ordered(&self) -> Vec<String> {
        let mut out = self.others.clone();
        if self.bridge_declared {
            out.push(self.bridge.clone());
        }
        out
    }
}

impl Serialize for PluginDeclaration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ordered().serialize(serializer)
    }
}
