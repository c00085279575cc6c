//! Build units and blanket transforms
//!
//! Settings that Gradle scripts push into every project through
//! `allprojects { }` / `subprojects { }` are applied here as plain functions
//! mapped over an explicit unit list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::language::LanguageLevel;
use crate::error::ResolveError;

/// Artifact repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Repository {
    Google,
    MavenCentral,
    GradlePluginPortal,
    /// `maven { url = uri("...") }`
    Maven(String),
}

impl FromStr for Repository {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "google" | "google()" => Ok(Repository::Google),
            "mavenCentral" | "mavenCentral()" => Ok(Repository::MavenCentral),
            "gradlePluginPortal" | "gradlePluginPortal()" => Ok(Repository::GradlePluginPortal),
            url if url.starts_with("https://") || url.starts_with("http://") || url.starts_with("file:") => {
                Ok(Repository::Maven(url.to_string()))
            }
            other => Err(ResolveError::invalid(format!(
                "repository must be google, mavenCentral, gradlePluginPortal or a URL (got '{}')",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Repository {
    type Error = ResolveError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Repository> for String {
    fn from(repo: Repository) -> Self {
        repo.to_string()
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repository::Google => f.write_str("google"),
            Repository::MavenCentral => f.write_str("mavenCentral"),
            Repository::GradlePluginPortal => f.write_str("gradlePluginPortal"),
            Repository::Maven(url) => f.write_str(url),
        }
    }
}

/// Default repositories applied to every unit
pub fn default_repositories() -> Vec<Repository> {
    vec![Repository::Google, Repository::MavenCentral]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Application,
    #[default]
    Library,
}

/// One module of the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildUnit {
    /// Gradle project path, e.g. `:app`
    pub path: String,
    pub kind: UnitKind,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_level: Option<LanguageLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kotlin_level: Option<LanguageLevel>,
}

impl BuildUnit {
    pub fn new(path: impl Into<String>, kind: UnitKind) -> Self {
        Self {
            path: path.into(),
            kind,
            repositories: Vec::new(),
            java_level: None,
            kotlin_level: None,
        }
    }

    pub fn with_levels(mut self, java: Option<LanguageLevel>, kotlin: Option<LanguageLevel>) -> Self {
        self.java_level = java;
        self.kotlin_level = kotlin;
        self
    }

    fn validate_path(&self) -> Result<(), ResolveError> {
        let valid = self.path.starts_with(':')
            && self.path[1..]
                .split(':')
                .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        if valid {
            Ok(())
        } else {
            Err(ResolveError::invalid(format!(
                "unit path must look like ':name' or ':parent:name' (got '{}')",
                self.path
            )))
        }
    }
}

/// JVM levels forced on every subproject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JvmPolicy {
    pub java_level: LanguageLevel,
    pub kotlin_level: LanguageLevel,
}

impl JvmPolicy {
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.java_level != self.kotlin_level {
            return Err(ResolveError::invalid(format!(
                "subprojects javaLevel == kotlinLevel (got {} and {})",
                self.java_level, self.kotlin_level
            )));
        }
        Ok(())
    }
}

/// Check that unit paths are well formed and unique
pub fn validate_units(units: &[BuildUnit]) -> Result<(), ResolveError> {
    let mut seen = std::collections::HashSet::new();
    for unit in units {
        unit.validate_path()?;
        if !seen.insert(unit.path.as_str()) {
            return Err(ResolveError::invalid(format!(
                "unit paths must be unique ('{}' declared twice)",
                unit.path
            )));
        }
    }
    Ok(())
}

/// Apply a transform to every unit, stopping at the first error
pub fn apply_to_all<F>(units: &[BuildUnit], transform: F) -> Result<Vec<BuildUnit>, ResolveError>
where
    F: Fn(&BuildUnit) -> Result<BuildUnit, ResolveError>,
{
    units.iter().map(transform).collect()
}

/// Transform adding repositories (after any the unit already lists)
pub fn with_repositories(repos: &[Repository]) -> impl Fn(&BuildUnit) -> Result<BuildUnit, ResolveError> + '_ {
    move |unit| {
        let mut out = unit.clone();
        for repo in repos {
            if !out.repositories.contains(repo) {
                out.repositories.push(repo.clone());
            }
        }
        Ok(out)
    }
}

/// Transform pinning JVM levels. A unit that already pins a different level conflicts.
pub fn with_jvm_policy(policy: JvmPolicy) -> impl Fn(&BuildUnit) -> Result<BuildUnit, ResolveError> {
    move |unit| {
        let mut out = unit.clone();
        out.java_level = Some(pin(&unit.path, "javaLevel", unit.java_level, policy.java_level)?);
        out.kotlin_level = Some(pin(&unit.path, "kotlinLevel", unit.kotlin_level, policy.kotlin_level)?);
        Ok(out)
    }
}

fn pin(
    path: &str,
    field: &str,
    current: Option<LanguageLevel>,
    forced: LanguageLevel,
) -> Result<LanguageLevel, ResolveError> {
    match current {
        Some(level) if level != forced => Err(ResolveError::conflict(
            format!("{}.{}", path, field),
            level.major(),
            forced.major(),
        )),
        _ => Ok(forced),
    }
}
