//! Dependency declarations
//!
//! Coordinates are parsed from Gradle notation (`group:artifact[:version]`)
//! and kept as a sorted set. Competing versions of one artifact are left for
//! Gradle's own conflict resolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::ident::{is_maven_part, is_version_constraint};
use crate::error::ResolveError;

/// Gradle dependency configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Configuration {
    /// Buildscript classpath (root project only)
    Classpath,
    Implementation,
    Api,
    CompileOnly,
    RuntimeOnly,
    TestImplementation,
    AndroidTestImplementation,
}

impl Configuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Configuration::Classpath => "classpath",
            Configuration::Implementation => "implementation",
            Configuration::Api => "api",
            Configuration::CompileOnly => "compileOnly",
            Configuration::RuntimeOnly => "runtimeOnly",
            Configuration::TestImplementation => "testImplementation",
            Configuration::AndroidTestImplementation => "androidTestImplementation",
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dependency tuple
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySpec {
    pub configuration: Configuration,
    pub group_id: String,
    pub artifact_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Imported as a platform (BOM)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub platform: bool,
}

impl DependencySpec {
    /// Parse `group:artifact[:version]` for the given configuration
    pub fn parse(configuration: Configuration, notation: &str) -> Result<Self, ResolveError> {
        let parts: Vec<&str> = notation.trim().split(':').collect();
        let (group, artifact, version) = match parts.as_slice() {
            [g, a] => (*g, *a, None),
            [g, a, v] => (*g, *a, Some(*v)),
            _ => {
                return Err(ResolveError::invalid(format!(
                    "dependency notation must be group:artifact[:version] (got '{}')",
                    notation
                )))
            }
        };

        if !is_maven_part(group) || !is_maven_part(artifact) {
            return Err(ResolveError::invalid(format!(
                "dependency group and artifact must be Maven identifiers (got '{}')",
                notation
            )));
        }
        if let Some(v) = version {
            if !is_version_constraint(v) {
                return Err(ResolveError::invalid(format!(
                    "dependency version must be a Maven version or range (got '{}')",
                    notation
                )));
            }
        }

        Ok(Self {
            configuration,
            group_id: group.to_string(),
            artifact_id: artifact.to_string(),
            version: version.map(str::to_string),
            platform: false,
        })
    }

    pub fn as_platform(mut self) -> Self {
        self.platform = true;
        self
    }

    /// `group:artifact[:version]`
    pub fn notation(&self) -> String {
        match &self.version {
            Some(v) => format!("{}:{}:{}", self.group_id, self.artifact_id, v),
            None => format!("{}:{}", self.group_id, self.artifact_id),
        }
    }

    pub fn is(&self, group_id: &str, artifact_id: &str) -> bool {
        self.group_id == group_id && self.artifact_id == artifact_id
    }
}

/// Deduplicated, deterministically ordered dependency set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencySet {
    specs: BTreeSet<DependencySpec>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dependency; returns false if the identical tuple was present
    pub fn insert(&mut self, spec: DependencySpec) -> bool {
        self.specs.insert(spec)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencySpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn find(&self, group_id: &str, artifact_id: &str) -> impl Iterator<Item = &DependencySpec> {
        let group_id = group_id.to_string();
        let artifact_id = artifact_id.to_string();
        self.specs
            .iter()
            .filter(move |s| s.is(&group_id, &artifact_id))
    }
}

impl FromIterator<DependencySpec> for DependencySet {
    fn from_iter<I: IntoIterator<Item = DependencySpec>>(iter: I) -> Self {
        Self {
            specs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_version() {
        let spec =
            DependencySpec::parse(Configuration::Implementation, "org.jetbrains.kotlin:kotlin-stdlib").unwrap();
        assert_eq!(spec.group_id, "org.jetbrains.kotlin");
        assert_eq!(spec.artifact_id, "kotlin-stdlib");
        assert_eq!(spec.version, None);
        assert_eq!(spec.notation(), "org.jetbrains.kotlin:kotlin-stdlib");
    }

    #[test]
    fn test_parse_with_version() {
        let spec =
            DependencySpec::parse(Configuration::Classpath, "com.android.tools.build:gradle:8.4.1").unwrap();
        assert_eq!(spec.version.as_deref(), Some("8.4.1"));
        assert_eq!(spec.configuration.as_str(), "classpath");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(DependencySpec::parse(Configuration::Api, "justone").is_err());
        assert!(DependencySpec::parse(Configuration::Api, "a:b:c:d").is_err());
        assert!(DependencySpec::parse(Configuration::Api, "a b:c").is_err());
        assert!(DependencySpec::parse(Configuration::Api, "a:b:1 .0").is_err());
    }

    #[test]
    fn test_set_dedupes_identical_tuples() {
        let a = DependencySpec::parse(Configuration::Implementation, "g:a:1.0").unwrap();
        let b = DependencySpec::parse(Configuration::Implementation, "g:a:2.0").unwrap();

        let mut set = DependencySet::new();
        assert!(set.insert(a.clone()));
        assert!(!set.insert(a));
        assert!(set.insert(b));
        assert_eq!(set.len(), 2);
        assert_eq!(set.find("g", "a").count(), 2);
    }

    #[test]
    fn test_platform_serialization() {
        let bom = DependencySpec::parse(Configuration::Implementation, "com.google.firebase:firebase-bom:33.5.1")
            .unwrap()
            .as_platform();
        let json = serde_json::to_value(&bom).unwrap();
        assert_eq!(json["platform"], true);
        assert_eq!(json["configuration"], "implementation");

        let plain = DependencySpec::parse(Configuration::Implementation, "g:a").unwrap();
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("platform").is_none());
        assert!(json.get("version").is_none());
    }
}
