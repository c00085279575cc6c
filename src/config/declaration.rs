//! Static project declaration
//!
//! What the developer literally writes for the Android side of a Flutter
//! app, in TOML:
//!
//! ```toml
//! [android]
//! applicationId = "com.example.rmapp"
//! javaLevel = 17
//! kotlinLevel = 17
//!
//! [plugins]
//! apply = ["com.android.application", "org.jetbrains.kotlin.android",
//!          "dev.flutter.flutter-gradle-plugin"]
//!
//! [[dependencies]]
//! configuration = "implementation"
//! notation = "org.jetbrains.kotlin:kotlin-stdlib"
//!
//! [root]
//! kotlinVersion = "1.9.0"
//! classpath = ["com.android.tools.build:gradle:8.4.1"]
//! subprojects = { javaLevel = 17, kotlinLevel = 17 }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::ConfigError;
use crate::model::{default_repositories, Configuration, JvmPolicy, LanguageLevel, PartialBuildConfig, Repository, UnitKind};

/// Plugin section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsSection {
    /// Plugin ids in application order
    #[serde(default)]
    pub apply: Vec<String>,

    /// Plugin that must be applied last (default: the Flutter Gradle plugin)
    pub bridge: Option<String>,
}

/// One `[[dependencies]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyDeclaration {
    pub configuration: Configuration,

    /// `group:artifact[:version]`
    pub notation: String,

    /// Import as a platform (BOM)
    #[serde(default)]
    pub platform: bool,
}

/// `flutter { }` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlutterSection {
    /// Path from the app module to the Flutter project root
    #[serde(default = "default_flutter_source")]
    pub source: String,
}

fn default_flutter_source() -> String {
    "../..".to_string()
}

impl Default for FlutterSection {
    fn default() -> Self {
        Self {
            source: default_flutter_source(),
        }
    }
}

/// Root project settings (root `build.gradle.kts`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RootDeclaration {
    /// Gradle path of the application module
    #[serde(default = "default_app_path")]
    pub app_path: String,

    /// Kotlin Gradle plugin version; fills an unversioned `kotlin-gradle-plugin` classpath entry
    pub kotlin_version: Option<String>,

    /// Repositories applied to every unit
    #[serde(default = "default_repositories")]
    pub repositories: Vec<Repository>,

    /// Buildscript classpath notations
    #[serde(default)]
    pub classpath: Vec<String>,

    /// JVM levels forced on every unit
    pub subprojects: Option<JvmPolicy>,

    /// Register the conventional `clean` task
    #[serde(default = "default_true")]
    pub clean_task: bool,
}

fn default_app_path() -> String {
    ":app".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for RootDeclaration {
    fn default() -> Self {
        Self {
            app_path: default_app_path(),
            kotlin_version: None,
            repositories: default_repositories(),
            classpath: Vec::new(),
            subprojects: None,
            clean_task: true,
        }
    }
}

/// Additional build unit (`[[module]]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModuleDeclaration {
    pub path: String,
    #[serde(default)]
    pub kind: UnitKind,
    pub java_level: Option<LanguageLevel>,
    pub kotlin_level: Option<LanguageLevel>,
}

/// Full static declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDeclaration {
    /// App module settings (the static half of the merge)
    #[serde(default)]
    pub android: PartialBuildConfig,

    #[serde(default)]
    pub plugins: PluginsSection,

    #[serde(default)]
    pub dependencies: Vec<DependencyDeclaration>,

    #[serde(default)]
    pub flutter: FlutterSection,

    #[serde(default)]
    pub root: RootDeclaration,

    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleDeclaration>,
}

impl ProjectDeclaration {
    /// Load and parse a declaration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Parse a declaration from a TOML string
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))
    }
}
