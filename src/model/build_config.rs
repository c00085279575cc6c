//! The resolved Android build configuration.
//!
//! [`PartialBuildConfig`] is what a single source declares (every field
//! optional). [`BuildConfig`] is the merged, validated result consumed by
//! the Gradle build.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::ident::is_package_name;
use super::language::LanguageLevel;
use crate::error::ResolveError;

/// Settings declared by one source; any field may be omitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialBuildConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sdk: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_sdk: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_sdk: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndk_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_code: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_level: Option<LanguageLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kotlin_level: Option<LanguageLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jvm_toolchain: Option<LanguageLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_dex_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_config: Option<String>,
}

impl PartialBuildConfig {
    /// Convert to a JSON object holding only the declared fields
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(v) = value {
                map.insert(key.to_string(), v);
            }
        };
        put("applicationId", self.application_id.clone().map(Value::from));
        put("namespace", self.namespace.clone().map(Value::from));
        put("minSdk", self.min_sdk.map(Value::from));
        put("targetSdk", self.target_sdk.map(Value::from));
        put("compileSdk", self.compile_sdk.map(Value::from));
        put("ndkVersion", self.ndk_version.clone().map(Value::from));
        put("versionCode", self.version_code.map(Value::from));
        put("versionName", self.version_name.clone().map(Value::from));
        put("javaLevel", self.java_level.map(|l| Value::from(l.major())));
        put("kotlinLevel", self.kotlin_level.map(|l| Value::from(l.major())));
        put("jvmToolchain", self.jvm_toolchain.map(|l| Value::from(l.major())));
        put("minifyEnabled", self.minify_enabled.map(Value::from));
        put("multiDexEnabled", self.multi_dex_enabled.map(Value::from));
        put("signingConfig", self.signing_config.clone().map(Value::from));
        Value::Object(map)
    }

    /// True if no field is declared
    pub fn is_empty(&self) -> bool {
        self == &PartialBuildConfig::default()
    }
}

/// Merged and validated build configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub application_id: String,
    pub namespace: String,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub compile_sdk: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ndk_version: Option<String>,
    pub version_code: u32,
    pub version_name: String,
    pub java_level: LanguageLevel,
    pub kotlin_level: LanguageLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jvm_toolchain: Option<LanguageLevel>,
    pub minify_enabled: bool,
    pub multi_dex_enabled: bool,
    pub signing_config: String,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ResolveError> {
    value.ok_or_else(|| ResolveError::invalid(format!("'{}' is required but no source declares it", field)))
}

impl BuildConfig {
    /// Build from a fully merged partial, checking required fields and invariants.
    ///
    /// `namespace` and `applicationId` stand in for each other when only one
    /// is declared.
    pub fn from_partial(partial: PartialBuildConfig) -> Result<Self, ResolveError> {
        let (application_id, namespace) = match (partial.application_id, partial.namespace) {
            (Some(id), Some(ns)) => (id, ns),
            (Some(id), None) => (id.clone(), id),
            (None, Some(ns)) => (ns.clone(), ns),
            (None, None) => {
                return Err(ResolveError::invalid(
                    "'applicationId' or 'namespace' is required but no source declares either",
                ))
            }
        };

        let config = BuildConfig {
            application_id,
            namespace,
            min_sdk: required(partial.min_sdk, "minSdk")?,
            target_sdk: required(partial.target_sdk, "targetSdk")?,
            compile_sdk: required(partial.compile_sdk, "compileSdk")?,
            ndk_version: partial.ndk_version,
            version_code: required(partial.version_code, "versionCode")?,
            version_name: required(partial.version_name, "versionName")?,
            java_level: required(partial.java_level, "javaLevel")?,
            kotlin_level: required(partial.kotlin_level, "kotlinLevel")?,
            jvm_toolchain: partial.jvm_toolchain,
            minify_enabled: required(partial.minify_enabled, "minifyEnabled")?,
            multi_dex_enabled: required(partial.multi_dex_enabled, "multiDexEnabled")?,
            signing_config: required(partial.signing_config, "signingConfig")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant of a resolved configuration
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.min_sdk == 0 {
            return Err(ResolveError::invalid("minSdk must be at least 1"));
        }

        if self.min_sdk > self.target_sdk || self.target_sdk > self.compile_sdk {
            return Err(ResolveError::invalid(format!(
                "minSdk <= targetSdk <= compileSdk (got {}, {}, {})",
                self.min_sdk, self.target_sdk, self.compile_sdk
            )));
        }

        if self.java_level != self.kotlin_level {
            return Err(ResolveError::invalid(format!(
                "javaLevel == kotlinLevel (got {} and {})",
                self.java_level, self.kotlin_level
            )));
        }

        if let Some(toolchain) = self.jvm_toolchain {
            if toolchain != self.java_level {
                return Err(ResolveError::invalid(format!(
                    "jvmToolchain == javaLevel (got {} and {})",
                    toolchain, self.java_level
                )));
            }
        }

        if self.version_code == 0 {
            return Err(ResolveError::invalid("versionCode must be at least 1"));
        }

        if self.version_name.trim().is_empty() {
            return Err(ResolveError::invalid("versionName must not be empty"));
        }

        if !is_package_name(&self.application_id) {
            return Err(ResolveError::invalid(format!(
                "applicationId must be a dotted package name (got '{}')",
                self.application_id
            )));
        }

        if !is_package_name(&self.namespace) {
            return Err(ResolveError::invalid(format!(
                "namespace must be a dotted package name (got '{}')",
                self.namespace
            )));
        }

        if self.signing_config.trim().is_empty() {
            return Err(ResolveError::invalid("signingConfig must not be empty"));
        }

        Ok(())
    }

    /// SHA-256 hex digest of the RFC 8785 canonical JSON form
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        let jcs_bytes = serde_json_canonicalizer::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&jcs_bytes);
        Ok(hex::encode(hasher.finalize()))
    }

    /// Serialize to JSON (pretty printed)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
