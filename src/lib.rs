//! Flutter Android Config - build configuration resolver
//!
//! Resolves the Android embedding of a Flutter app: merges what the
//! developer declares with the values the Flutter build-version provider
//! supplies, validates the result, and renders it for Gradle.

pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod resolver;

pub use config::{ConfigError, ConfigInputs, EffectiveConfig, FlutterDefaults, ProjectDeclaration};
pub use error::ResolveError;
pub use model::{BuildConfig, LanguageLevel, PartialBuildConfig, PluginDeclaration};
pub use resolver::{resolve_build_config, Resolution, Resolver};
