//! Build model types
//!
//! Typed forms of everything a Flutter Android build declares: the merged
//! [`BuildConfig`], language levels, plugin order, dependencies, and the
//! list of build units.

mod build_config;
mod dependencies;
pub(crate) mod ident;
mod language;
mod plugins;
mod units;

pub use build_config::{BuildConfig, PartialBuildConfig};
pub use dependencies::{Configuration, DependencySet, DependencySpec};
pub use language::{LanguageLevel, ParseLevelError};
pub use plugins::{PluginDeclaration, FLUTTER_BRIDGE_PLUGIN};
pub use units::{
    apply_to_all, default_repositories, validate_units, with_jvm_policy, with_repositories, BuildUnit,
    JvmPolicy, Repository, UnitKind,
};
