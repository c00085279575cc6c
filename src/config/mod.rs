//! Configuration loading and merge
//!
//! Two sources feed the resolver:
//! 1. The static declaration (`flutter-android.toml`)
//! 2. The dynamic supplement from the Flutter provider, itself stacked from
//!    a provider file, `local.properties` and CLI overrides
//!
//! Built-in Flutter defaults fill whatever neither source sets.

mod declaration;
mod defaults;
mod effective;
mod error;
mod merge;
mod provider;

pub use declaration::{
    DependencyDeclaration, FlutterSection, ModuleDeclaration, PluginsSection, ProjectDeclaration, RootDeclaration,
};
pub use defaults::FlutterDefaults;
pub use effective::{ConfigInputs, ConfigOrigin, ConfigSource, EffectiveConfig, SCHEMA_ID, SCHEMA_VERSION};
pub use error::ConfigError;
pub use merge::{deep_merge, merge_layers, strict_merge};
pub use provider::{
    canonical_key, overrides_to_value, parse_local_properties, parse_override, parse_provider_toml,
    supplement_from_layers, toml_to_json, KNOWN_FIELDS,
};
