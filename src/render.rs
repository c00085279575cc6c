//! Gradle Kotlin DSL output
//!
//! Turns a [`Resolution`] into the two scripts Gradle reads:
//! `app/build.gradle.kts` and the root `build.gradle.kts`.

use gradle_kts::{Block, DslError, Expr, Node, Script};

use crate::model::{DependencySet, DependencySpec, LanguageLevel, Repository};
use crate::resolver::Resolution;

fn dependency_call(spec: &DependencySpec) -> Node {
    let coordinate = Expr::str(spec.notation());
    let arg = if spec.platform {
        Expr::call("platform", vec![coordinate])
    } else {
        coordinate
    };
    Node::Call(Expr::call(spec.configuration.as_str(), vec![arg]))
}

fn repositories_block(repos: &[Repository]) -> Block {
    let mut block = Block::new("repositories");
    for repo in repos {
        match repo {
            Repository::Maven(url) => block.push(Node::Block(
                Block::new("maven").assign("url", Expr::call("uri", vec![Expr::str(url.as_str())])),
            )),
            named => block.push(Node::Call(Expr::call(named.to_string(), vec![]))),
        }
    }
    block
}

fn dependencies_block(deps: &DependencySet) -> Block {
    let mut block = Block::new("dependencies");
    for spec in deps.iter() {
        block.push(dependency_call(spec));
    }
    block
}

const BRIDGE_NOTE: &str = "The Flutter Gradle Plugin must be applied after the Android and Kotlin Gradle plugins.";

/// Render the application module script
pub fn app_build_script(resolution: &Resolution) -> Result<String, DslError> {
    let config = &resolution.config;
    let mut script = Script::new();

    let mut plugins = Block::new("plugins");
    for (i, id) in resolution.plugins.ordered().into_iter().enumerate() {
        if i > 0 && id == resolution.plugins.bridge() {
            plugins = plugins.comment(BRIDGE_NOTE);
        }
        plugins.push(Node::Call(Expr::call("id", vec![Expr::str(id)])));
    }
    script.block(plugins);

    let mut default_config = Block::new("defaultConfig")
        .assign("applicationId", config.application_id.as_str())
        .assign("minSdk", config.min_sdk)
        .assign("targetSdk", config.target_sdk)
        .assign("versionCode", config.version_code)
        .assign("versionName", config.version_name.as_str());
    if config.multi_dex_enabled {
        default_config = default_config.assign("multiDexEnabled", true);
    }

    let release = Block::new("release")
        .assign(
            "signingConfig",
            Expr::call("signingConfigs.getByName", vec![Expr::str(config.signing_config.as_str())]),
        )
        .assign("isMinifyEnabled", config.minify_enabled);

    let level = config.java_level;
    let mut android = Block::new("android")
        .assign("namespace", config.namespace.as_str())
        .assign("compileSdk", config.compile_sdk);
    if let Some(ndk) = &config.ndk_version {
        android = android.assign("ndkVersion", ndk.as_str());
    }
    android.push(Node::Blank);
    android.push(Node::Block(default_config));
    android.push(Node::Blank);
    android.push(Node::Block(Block::new("buildTypes").block(release)));
    android.push(Node::Blank);
    android.push(Node::Block(
        Block::new("compileOptions")
            .assign("sourceCompatibility", Expr::raw(level.java_version_constant()))
            .assign("targetCompatibility", Expr::raw(level.java_version_constant())),
    ));
    android.push(Node::Blank);
    android.push(Node::Block(
        Block::new("kotlinOptions").assign("jvmTarget", config.kotlin_level.jvm_target()),
    ));
    script.block(android);

    if let Some(toolchain) = config.jvm_toolchain {
        script.block(Block::new("kotlin").call("jvmToolchain", vec![Expr::from(toolchain.major())]));
    }

    script.block(Block::new("flutter").assign("source", resolution.flutter_source.as_str()));

    if !resolution.dependencies.is_empty() {
        script.block(dependencies_block(&resolution.dependencies));
    }

    script.render()
}

fn jvm_tasks(level: LanguageLevel, kotlin_level: LanguageLevel) -> Block {
    let java = Block::new("tasks.withType<JavaCompile>().configureEach")
        .call("options.release.set", vec![Expr::from(level.major())])
        .assign(
            "sourceCompatibility",
            Expr::raw(format!("{}.toString()", level.java_version_constant())),
        )
        .assign(
            "targetCompatibility",
            Expr::raw(format!("{}.toString()", level.java_version_constant())),
        );
    let kotlin = Block::new("tasks.withType<KotlinCompile>().configureEach")
        .assign("kotlinOptions.jvmTarget", kotlin_level.jvm_target());
    Block::new("subprojects").block(java).block(kotlin)
}

/// Render the root project script
pub fn root_build_script(resolution: &Resolution) -> Result<String, DslError> {
    let root = &resolution.root;
    let mut script = Script::new();

    if root.jvm_policy.is_some() {
        script.push(Node::Import("org.gradle.api.tasks.compile.JavaCompile".to_string()));
        script.push(Node::Import("org.jetbrains.kotlin.gradle.tasks.KotlinCompile".to_string()));
    }

    if !root.classpath.is_empty() {
        script.block(
            Block::new("buildscript")
                .block(repositories_block(&root.repositories))
                .block(dependencies_block(&root.classpath)),
        );
    }

    script.block(Block::new("allprojects").block(repositories_block(&root.repositories)));

    if let Some(policy) = root.jvm_policy {
        script.block(jvm_tasks(policy.java_level, policy.kotlin_level));
    }

    if root.clean_task {
        script.block(
            Block::with_args("tasks.register<Delete>", vec![Expr::str("clean")])
                .call("delete", vec![Expr::raw("rootProject.layout.buildDirectory")]),
        );
    }

    script.render()
}
