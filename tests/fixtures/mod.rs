//! Test fixtures
//!
//! `rmapp/` is a complete Flutter Android embedding: static declaration,
//! provider values and `local.properties`.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub fn rmapp_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/rmapp")
}

pub fn rmapp_declaration() -> PathBuf {
    rmapp_dir().join("flutter-android.toml")
}

pub fn rmapp_provider() -> PathBuf {
    rmapp_dir().join("provider.toml")
}

pub fn rmapp_local_properties() -> PathBuf {
    rmapp_dir().join("local.properties")
}
