//! Resolution plus provenance
//!
//! Wraps a [`Resolution`] with the sources that produced it (path and
//! SHA-256 of raw bytes, in precedence order) and the canonical digest of
//! the resolved `BuildConfig`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use super::declaration::ProjectDeclaration;
use super::error::ConfigError;
use super::provider::{overrides_to_value, parse_local_properties, parse_provider_toml, supplement_from_layers};
use crate::model::PartialBuildConfig;
use crate::resolver::{Resolution, Resolver};

/// Version of the provenance document layout
pub const SCHEMA_VERSION: u32 = 1;

/// Stable identifier written into every provenance document
pub const SCHEMA_ID: &str = "flutter-android-config/effective_config@1";

/// Where a layer of configuration came from
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfigOrigin {
    Builtin,
    Declaration,
    Provider,
    LocalProperties,
    Cli,
}

/// One layer that fed the resolution
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSource {
    /// Layer kind
    pub origin: ConfigOrigin,

    /// Path on disk; absent for builtin defaults and `--set`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Hex SHA-256 of the file as read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ConfigSource {
    fn file(origin: ConfigOrigin, path: &Path, digest: String) -> Self {
        Self {
            origin,
            path: Some(path.to_string_lossy().to_string()),
            digest: Some(digest),
        }
    }

    fn inline(origin: ConfigOrigin) -> Self {
        Self {
            origin,
            path: None,
            digest: None,
        }
    }
}

/// Input locations for one resolution
#[derive(Debug, Clone, Copy)]
pub struct ConfigInputs<'a> {
    /// Static declaration (required)
    pub declaration: &'a Path,
    /// Provider file; skipped when absent on disk
    pub provider: Option<&'a Path>,
    /// Flutter `local.properties`; skipped when absent on disk
    pub local_properties: Option<&'a Path>,
    /// `key=value` overrides, applied last
    pub overrides: &'a [String],
}

/// Resolved configuration together with the layers that produced it
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    /// See [`SCHEMA_VERSION`]
    pub schema_version: u32,

    /// See [`SCHEMA_ID`]
    pub schema_id: String,

    /// Resolution time; excluded from `config_digest`
    pub created_at: DateTime<Utc>,

    /// SHA-256 of the canonical JSON of `resolution.config`
    pub config_digest: String,

    /// The merged dynamic supplement, before fallbacks
    pub supplement: PartialBuildConfig,

    /// The resolved build
    pub resolution: Resolution,

    /// Layers, lowest precedence first
    pub sources: Vec<ConfigSource>,
}

impl EffectiveConfig {
    /// Load every input, resolve, and record provenance
    pub fn build(inputs: ConfigInputs<'_>, resolver: &Resolver) -> Result<Self, ConfigError> {
        let mut sources = vec![ConfigSource::inline(ConfigOrigin::Builtin)];

        let (contents, digest) = Self::load_file(inputs.declaration)?;
        let declaration = ProjectDeclaration::from_toml(&contents)?;
        sources.push(ConfigSource::file(ConfigOrigin::Declaration, inputs.declaration, digest));

        let mut layers = Vec::new();

        if let Some(path) = inputs.provider {
            if path.exists() {
                let (contents, digest) = Self::load_file(path)?;
                layers.push(parse_provider_toml(&contents)?);
                sources.push(ConfigSource::file(ConfigOrigin::Provider, path, digest));
            } else {
                warn!(path = %path.display(), "provider file not found, skipping");
            }
        }

        if let Some(path) = inputs.local_properties {
            if path.exists() {
                let (contents, digest) = Self::load_file(path)?;
                layers.push(parse_local_properties(&contents)?);
                sources.push(ConfigSource::file(ConfigOrigin::LocalProperties, path, digest));
            } else {
                warn!(path = %path.display(), "local.properties not found, skipping");
            }
        }

        if !inputs.overrides.is_empty() {
            layers.push(overrides_to_value(inputs.overrides)?);
            sources.push(ConfigSource::inline(ConfigOrigin::Cli));
        }

        debug!(layers = layers.len(), "merging provider layers");
        let supplement = supplement_from_layers(layers)?;

        let resolution = resolver.resolve(&declaration, &supplement)?;
        let config_digest = resolution
            .config
            .digest()
            .map_err(|e| ConfigError::ParseError(format!("canonical JSON failed: {}", e)))?;

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            config_digest,
            supplement,
            resolution,
            sources,
        })
    }

    /// Read a file as UTF-8, returning contents and SHA-256 of the raw bytes
    fn load_file(path: &Path) -> Result<(String, String), ConfigError> {
        let bytes = fs::read(path).map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8 in {}: {}", path.display(), e)))?;

        Ok((contents, digest))
    }

    /// Pretty JSON of the whole document
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Persist the provenance document next to a build
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}
