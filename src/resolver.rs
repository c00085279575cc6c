//! Build configuration resolver
//!
//! Pure, single-pass transform from a static declaration plus the provider's
//! dynamic supplement to a [`Resolution`]. No I/O happens here; file loading
//! and provenance live in [`crate::config::EffectiveConfig`].

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{deep_merge, strict_merge, FlutterDefaults, ProjectDeclaration};
use crate::error::ResolveError;
use crate::model::ident::is_version_constraint;
use crate::model::{
    apply_to_all, validate_units, with_jvm_policy, with_repositories, BuildConfig, BuildUnit, Configuration,
    DependencySet, DependencySpec, JvmPolicy, PartialBuildConfig, PluginDeclaration, Repository, UnitKind,
    FLUTTER_BRIDGE_PLUGIN,
};

const KOTLIN_GROUP: &str = "org.jetbrains.kotlin";
const KOTLIN_GRADLE_PLUGIN: &str = "kotlin-gradle-plugin";

/// Resolved root project settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kotlin_version: Option<String>,
    pub repositories: Vec<Repository>,
    pub classpath: DependencySet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jvm_policy: Option<JvmPolicy>,
    pub clean_task: bool,
}

/// Everything the native build tool consumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub config: BuildConfig,
    pub plugins: PluginDeclaration,
    pub dependencies: DependencySet,
    pub units: Vec<BuildUnit>,
    pub root: RootSettings,
    pub flutter_source: String,
}

impl Resolution {
    /// Serialize to JSON (pretty printed)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The application unit
    pub fn app_unit(&self) -> Option<&BuildUnit> {
        self.units.iter().find(|u| u.kind == UnitKind::Application)
    }
}

/// Resolver settings
#[derive(Debug, Clone)]
pub struct Resolver {
    bridge_plugin: Option<String>,
    defaults: FlutterDefaults,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            bridge_plugin: None,
            defaults: FlutterDefaults::default(),
        }
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugin pinned last. A declaration naming a different one is a conflict.
    pub fn with_bridge_plugin(mut self, id: impl Into<String>) -> Self {
        self.bridge_plugin = Some(id.into());
        self
    }

    pub fn with_defaults(mut self, defaults: FlutterDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &FlutterDefaults {
        &self.defaults
    }

    /// Merge the static declaration with the dynamic supplement and validate.
    ///
    /// Fields set by both sources must agree. Fields set by neither fall back
    /// to the built-in Flutter defaults.
    pub fn resolve_build_config(
        &self,
        static_decl: &PartialBuildConfig,
        dynamic: &PartialBuildConfig,
    ) -> Result<BuildConfig, ResolveError> {
        let merged = strict_merge(static_decl.to_value(), dynamic.to_value())?;

        if let Some(map) = merged.as_object() {
            let defaults = self.defaults.to_value();
            if let Some(fallbacks) = defaults.as_object() {
                for key in fallbacks.keys().filter(|k| !map.contains_key(*k)) {
                    debug!(field = %key, "using built-in default");
                }
            }
        }

        let filled = deep_merge(self.defaults.to_value(), merged);
        let partial: PartialBuildConfig = serde_json::from_value(filled)
            .map_err(|e| ResolveError::invalid(format!("merged settings are not well typed: {}", e)))?;

        BuildConfig::from_partial(partial)
    }

    /// Resolve a whole project declaration
    pub fn resolve(
        &self,
        decl: &ProjectDeclaration,
        dynamic: &PartialBuildConfig,
    ) -> Result<Resolution, ResolveError> {
        let config = self.resolve_build_config(&decl.android, dynamic)?;
        debug!(
            application_id = %config.application_id,
            min_sdk = config.min_sdk,
            target_sdk = config.target_sdk,
            compile_sdk = config.compile_sdk,
            "build config resolved"
        );

        let bridge = match (&decl.plugins.bridge, &self.bridge_plugin) {
            (Some(declared), Some(given)) if declared != given => {
                return Err(ResolveError::conflict("plugins.bridge", declared.as_str(), given.as_str()));
            }
            (Some(id), _) | (None, Some(id)) => id.clone(),
            (None, None) => FLUTTER_BRIDGE_PLUGIN.to_string(),
        };
        let plugins = PluginDeclaration::from_ids(decl.plugins.apply.iter().cloned(), bridge)?;

        let mut dependencies = DependencySet::new();
        for dep in &decl.dependencies {
            if dep.configuration == Configuration::Classpath {
                return Err(ResolveError::invalid(format!(
                    "classpath dependencies belong in [root].classpath (got '{}')",
                    dep.notation
                )));
            }
            let mut spec = DependencySpec::parse(dep.configuration, &dep.notation)?;
            if dep.platform {
                spec = spec.as_platform();
            }
            if !dependencies.insert(spec) {
                debug!(notation = %dep.notation, "duplicate dependency collapsed");
            }
        }

        let root = self.resolve_root(decl)?;
        let units = self.resolve_units(decl, &config, &root)?;

        let resolution = Resolution {
            config,
            plugins,
            dependencies,
            units,
            root,
            flutter_source: decl.flutter.source.clone(),
        };
        info!(
            plugins = resolution.plugins.len(),
            dependencies = resolution.dependencies.len(),
            units = resolution.units.len(),
            "resolution complete"
        );
        Ok(resolution)
    }

    fn resolve_root(&self, decl: &ProjectDeclaration) -> Result<RootSettings, ResolveError> {
        let kotlin_version = decl.root.kotlin_version.clone();
        if let Some(v) = &kotlin_version {
            if !is_version_constraint(v) {
                return Err(ResolveError::invalid(format!(
                    "root kotlinVersion must be a version (got '{}')",
                    v
                )));
            }
        }

        let mut classpath = DependencySet::new();
        for notation in &decl.root.classpath {
            let mut spec = DependencySpec::parse(Configuration::Classpath, notation)?;
            if spec.is(KOTLIN_GROUP, KOTLIN_GRADLE_PLUGIN) {
                if let Some(kv) = &kotlin_version {
                    match &spec.version {
                        None => spec.version = Some(kv.clone()),
                        Some(v) if v != kv => {
                            return Err(ResolveError::conflict("root.kotlinVersion", kv.as_str(), v.as_str()))
                        }
                        Some(_) => {}
                    }
                }
            }
            classpath.insert(spec);
        }

        if let Some(policy) = &decl.root.subprojects {
            policy.validate()?;
        }

        Ok(RootSettings {
            kotlin_version,
            repositories: decl.root.repositories.clone(),
            classpath,
            jvm_policy: decl.root.subprojects,
            clean_task: decl.root.clean_task,
        })
    }

    /// Explicit unit list with the root-level blanket settings mapped over it
    fn resolve_units(
        &self,
        decl: &ProjectDeclaration,
        config: &BuildConfig,
        root: &RootSettings,
    ) -> Result<Vec<BuildUnit>, ResolveError> {
        let mut units = vec![BuildUnit::new(decl.root.app_path.clone(), UnitKind::Application)
            .with_levels(Some(config.java_level), Some(config.kotlin_level))];
        for module in &decl.modules {
            units.push(BuildUnit::new(module.path.clone(), module.kind).with_levels(module.java_level, module.kotlin_level));
        }
        validate_units(&units)?;

        let applications = units.iter().filter(|u| u.kind == UnitKind::Application).count();
        if applications != 1 {
            return Err(ResolveError::invalid(format!(
                "exactly one application unit is allowed (got {})",
                applications
            )));
        }

        let mut units = apply_to_all(&units, with_repositories(&root.repositories))?;
        if let Some(policy) = root.jvm_policy {
            units = apply_to_all(&units, with_jvm_policy(policy))?;
        }
        Ok(units)
    }
}

/// Resolve with the built-in defaults and the Flutter bridging plugin
pub fn resolve_build_config(
    static_decl: &PartialBuildConfig,
    dynamic: &PartialBuildConfig,
) -> Result<BuildConfig, ResolveError> {
    Resolver::default().resolve_build_config(static_decl, dynamic)
}
