//! Gradle Kotlin DSL script model
//!
//! A small tree of blocks, assignments and calls that prints as a
//! `build.gradle.kts` file. Only the subset needed to express an Android
//! application module and its root project is modelled.

pub mod error;
pub mod expr;
pub mod script;

pub use error::DslError;
pub use expr::Expr;
pub use script::{Block, Node, Script};

/// Indentation used for nested blocks.
pub const INDENT: &str = "    ";
