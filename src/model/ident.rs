//! Identifier syntax shared by the model types.

use regex_lite::Regex;
use std::sync::OnceLock;

fn package_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").expect("valid pattern")
    })
}

fn plugin_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*(\.[A-Za-z0-9][A-Za-z0-9_-]*)*$").expect("valid pattern")
    })
}

fn maven_part_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("valid pattern"))
}

fn version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.+\-\[\]\(\),]+$").expect("valid pattern"))
}

/// Dotted Java package name with at least two segments (`com.example.app`)
pub fn is_package_name(s: &str) -> bool {
    package_name_re().is_match(s)
}

/// Gradle plugin id (`com.android.application`, `kotlin-android`)
pub fn is_plugin_id(s: &str) -> bool {
    plugin_id_re().is_match(s)
}

/// Maven group or artifact id
pub fn is_maven_part(s: &str) -> bool {
    maven_part_re().is_match(s)
}

/// Maven version or version range (`1.9.0`, `[1.0,2.0)`, `33.5.1`)
pub fn is_version_constraint(s: &str) -> bool {
    version_re().is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_names() {
        assert!(is_package_name("com.example.rmapp"));
        assert!(is_package_name("a.b"));
        assert!(!is_package_name("rmapp"));
        assert!(!is_package_name("com.1example"));
        assert!(!is_package_name("com..example"));
        assert!(!is_package_name("com.example-app"));
    }

    #[test]
    fn test_plugin_ids() {
        assert!(is_plugin_id("com.android.application"));
        assert!(is_plugin_id("dev.flutter.flutter-gradle-plugin"));
        assert!(is_plugin_id("kotlin-android"));
        assert!(!is_plugin_id(""));
        assert!(!is_plugin_id("id(\"x\")"));
        assert!(!is_plugin_id("com.android application"));
    }

    #[test]
    fn test_maven_parts() {
        assert!(is_maven_part("org.jetbrains.kotlin"));
        assert!(is_maven_part("kotlin-stdlib"));
        assert!(!is_maven_part("a:b"));
        assert!(is_version_constraint("1.9.0"));
        assert!(is_version_constraint("[1.0,2.0)"));
        assert!(!is_version_constraint("1.0 beta"));
    }
}
