//! Dynamic supplement from the Flutter build-version provider
//!
//! The provider values reach the build from three places, stacked last-wins:
//! 1. a provider file (TOML, `compileSdkVersion = 34` style keys)
//! 2. Flutter's `local.properties` (`flutter.versionCode=3`)
//! 3. CLI overrides (`--set minSdk=23`)
//!
//! Keys are normalized to the `BuildConfig` field names before merging.

use serde_json::{Map, Value};
use tracing::debug;

use super::error::ConfigError;
use super::merge::merge_layers;
use crate::model::PartialBuildConfig;

/// Provider-side names and the field they feed
const PROVIDER_ALIASES: &[(&str, &str)] = &[
    ("compileSdkVersion", "compileSdk"),
    ("minSdkVersion", "minSdk"),
    ("targetSdkVersion", "targetSdk"),
];

/// Every field a source may set
pub const KNOWN_FIELDS: &[&str] = &[
    "applicationId",
    "namespace",
    "minSdk",
    "targetSdk",
    "compileSdk",
    "ndkVersion",
    "versionCode",
    "versionName",
    "javaLevel",
    "kotlinLevel",
    "jvmToolchain",
    "minifyEnabled",
    "multiDexEnabled",
    "signingConfig",
];

const INTEGER_FIELDS: &[&str] = &["minSdk", "targetSdk", "compileSdk", "versionCode"];

const BOOLEAN_FIELDS: &[&str] = &["minifyEnabled", "multiDexEnabled"];

/// Map a provider or `local.properties` key to its field name
pub fn canonical_key(key: &str) -> &str {
    let bare = key.strip_prefix("flutter.").unwrap_or(key);
    PROVIDER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == bare)
        .map(|(_, field)| *field)
        .unwrap_or(bare)
}

fn is_known(field: &str) -> bool {
    KNOWN_FIELDS.contains(&field)
}

/// Convert a raw string into the JSON type its field expects
fn coerce(field: &str, raw: &str) -> Result<Value, ConfigError> {
    let raw = raw.trim();
    if INTEGER_FIELDS.contains(&field) {
        return raw
            .parse::<u64>()
            .map(Value::from)
            .map_err(|_| ConfigError::ParseError(format!("'{}' must be a non-negative integer (got '{}')", field, raw)));
    }
    if BOOLEAN_FIELDS.contains(&field) {
        return raw
            .parse::<bool>()
            .map(Value::from)
            .map_err(|_| ConfigError::ParseError(format!("'{}' must be true or false (got '{}')", field, raw)));
    }
    Ok(Value::String(raw.to_string()))
}

/// Convert TOML Value to JSON Value.
///
/// JSON has no `nan` or `inf`, and `null` would read as "unset" further down,
/// so non-finite floats are rejected.
pub fn toml_to_json(toml: toml::Value) -> Result<Value, ConfigError> {
    Ok(match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| ConfigError::ParseError(format!("non-finite number '{}' is not a valid value", f)))?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect::<Result<_, _>>()?),
        toml::Value::Table(table) => {
            let map = table
                .into_iter()
                .map(|(k, v)| Ok((k, toml_to_json(v)?)))
                .collect::<Result<Map<String, Value>, ConfigError>>()?;
            Value::Object(map)
        }
    })
}

/// Parse a provider file, normalizing its keys
pub fn parse_provider_toml(contents: &str) -> Result<Value, ConfigError> {
    let table: toml::Table = toml::from_str(contents)
        .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

    let mut map = Map::new();
    for (key, value) in table {
        let field = canonical_key(&key);
        if !is_known(field) {
            return Err(ConfigError::ParseError(format!("unknown provider key '{}'", key)));
        }
        let value = toml_to_json(value).map_err(|e| match e {
            ConfigError::ParseError(msg) => ConfigError::ParseError(format!("provider key '{}': {}", key, msg)),
            other => other,
        })?;
        map.insert(field.to_string(), value);
    }
    Ok(Value::Object(map))
}

/// Parse Flutter's `local.properties`.
///
/// Only `flutter.*` keys that map to a build field are kept; `sdk.dir`,
/// `flutter.sdk`, `flutter.buildMode` and the like are skipped.
pub fn parse_local_properties(contents: &str) -> Result<Value, ConfigError> {
    let mut map = Map::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let (key, value) = split_property(line);
        let value = unescape(value);

        if !key.starts_with("flutter.") {
            continue;
        }
        let field = canonical_key(key);
        if !is_known(field) {
            debug!(key, "skipping local.properties entry");
            continue;
        }
        map.insert(field.to_string(), coerce(field, &value)?);
    }
    Ok(Value::Object(map))
}

/// Split a `.properties` line into key and raw value.
///
/// The key ends at the first `=`, `:` or whitespace. One `=` or `:` after
/// surrounding whitespace is then dropped, so `k=v`, `k: v` and `k v` agree.
fn split_property(line: &str) -> (&str, &str) {
    let end = line
        .find(|c: char| c == '=' || c == ':' || c.is_whitespace())
        .unwrap_or(line.len());
    let (key, rest) = line.split_at(end);
    let rest = rest.trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    (key, rest.trim())
}

/// Undo `.properties` backslash escapes (`C\:\\src` -> `C:\src`)
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse one `key=value` CLI override
pub fn parse_override(s: &str) -> Result<(String, Value), ConfigError> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| ConfigError::ParseError(format!("override must be key=value (got '{}')", s)))?;
    let field = canonical_key(key.trim());
    if !is_known(field) {
        return Err(ConfigError::ParseError(format!("unknown setting '{}'", key.trim())));
    }
    Ok((field.to_string(), coerce(field, raw)?))
}

/// Build an override layer from `key=value` strings (later entries win)
pub fn overrides_to_value(overrides: &[String]) -> Result<Value, ConfigError> {
    let mut map = Map::new();
    for s in overrides {
        let (field, value) = parse_override(s)?;
        map.insert(field, value);
    }
    Ok(Value::Object(map))
}

/// Stack supplement layers and type-check the result
pub fn supplement_from_layers(layers: Vec<Value>) -> Result<PartialBuildConfig, ConfigError> {
    match merge_layers(layers) {
        Value::Null => Ok(PartialBuildConfig::default()),
        merged => serde_json::from_value(merged)
            .map_err(|e| ConfigError::ParseError(format!("provider values: {}", e))),
    }
}
