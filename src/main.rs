//! Flutter Android Config CLI
//!
//! Entry point for the `flutter-android-config` command-line tool.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flutter_android_config::config::{ConfigInputs, EffectiveConfig};
use flutter_android_config::render::{app_build_script, root_build_script};
use flutter_android_config::Resolver;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flutter-android-config")]
#[command(about = "Resolve the Android build configuration of a Flutter app", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Static declaration file
    #[arg(long, short = 'd', default_value = "android/flutter-android.toml")]
    declaration: PathBuf,

    /// Flutter provider values file (compileSdkVersion, minSdkVersion, ...)
    #[arg(long, short = 'p')]
    provider: Option<PathBuf>,

    /// Flutter local.properties (flutter.versionCode, flutter.versionName, ...)
    #[arg(long, short = 'l')]
    local_properties: Option<PathBuf>,

    /// Provider override, applied last (repeatable), e.g. --set minSdk=23
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Plugin that must be applied last. Must match `[plugins].bridge` when
    /// the declaration sets one; a different id fails as a conflict.
    #[arg(long)]
    bridge_plugin: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and print the configuration as JSON
    Resolve {
        #[command(flatten)]
        input: InputArgs,

        /// Include sources, digests and the raw supplement
        #[arg(long)]
        provenance: bool,

        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Check the configuration and print a summary
    Verify {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Render Gradle Kotlin DSL
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Render the root build.gradle.kts instead of the app module
        #[arg(long)]
        root: bool,
    },

    /// Print the final plugin application order
    Plugins {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Resolve {
            input,
            provenance,
            output,
        } => run_resolve(&input, provenance, output),
        Commands::Verify { input } => run_verify(&input),
        Commands::Render { input, root } => run_render(&input, root),
        Commands::Plugins { input } => run_plugins(&input),
    }
}

fn load(input: &InputArgs) -> Result<EffectiveConfig> {
    let mut resolver = Resolver::new();
    if let Some(ref bridge) = input.bridge_plugin {
        resolver = resolver.with_bridge_plugin(bridge.clone());
    }

    let inputs = ConfigInputs {
        declaration: &input.declaration,
        provider: input.provider.as_deref(),
        local_properties: input.local_properties.as_deref(),
        overrides: &input.overrides,
    };

    EffectiveConfig::build(inputs, &resolver)
        .with_context(|| format!("resolving {}", input.declaration.display()))
}

fn run_resolve(input: &InputArgs, provenance: bool, output: Option<PathBuf>) -> Result<()> {
    let effective = load(input)?;

    match (output, provenance) {
        (Some(path), true) => effective
            .write_to_file(&path)
            .with_context(|| format!("writing {}", path.display()))?,
        (Some(path), false) => fs::write(&path, effective.resolution.to_json()?)
            .with_context(|| format!("writing {}", path.display()))?,
        (None, true) => println!("{}", effective.to_json()?),
        (None, false) => println!("{}", effective.resolution.to_json()?),
    }
    Ok(())
}

fn run_verify(input: &InputArgs) -> Result<()> {
    let effective = load(input)?;
    let resolution = &effective.resolution;
    let config = &resolution.config;

    println!("Configuration valid: {}", input.declaration.display());
    println!();
    println!("  Application: {}", config.application_id);
    if config.namespace != config.application_id {
        println!("  Namespace: {}", config.namespace);
    }
    println!(
        "  SDK: min {} / target {} / compile {}",
        config.min_sdk, config.target_sdk, config.compile_sdk
    );
    if let Some(ref ndk) = config.ndk_version {
        println!("  NDK: {}", ndk);
    }
    println!("  Version: {} ({})", config.version_name, config.version_code);
    println!("  Java/Kotlin: {}", config.java_level.jvm_target());
    println!("  Plugins: {}", resolution.plugins.ordered().join(", "));
    if !resolution.dependencies.is_empty() {
        println!("  Dependencies: {}", resolution.dependencies.len());
    }
    println!("  Units: {}", resolution.units.len());
    println!("  Digest: {}", effective.config_digest);
    Ok(())
}

fn run_render(input: &InputArgs, root: bool) -> Result<()> {
    let effective = load(input)?;
    let script = if root {
        root_build_script(&effective.resolution)?
    } else {
        app_build_script(&effective.resolution)?
    };
    print!("{}", script);
    Ok(())
}

fn run_plugins(input: &InputArgs) -> Result<()> {
    let effective = load(input)?;
    for id in effective.resolution.plugins.ordered() {
        println!("{}", id);
    }
    Ok(())
}
