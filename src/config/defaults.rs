//! Built-in Flutter defaults (fallback layer)
//!
//! Values the Flutter Gradle plugin reports when nothing overrides them.
//! They only fill fields that neither the static declaration nor the
//! provider supplies, so they never take part in conflict detection.

use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlutterDefaults {
    /// `flutter.compileSdkVersion` (default: 34)
    pub compile_sdk: u32,

    /// `flutter.minSdkVersion` (default: 21)
    pub min_sdk: u32,

    /// `flutter.targetSdkVersion` (default: 34)
    pub target_sdk: u32,

    /// `flutter.ndkVersion` (default: "23.1.7779620")
    pub ndk_version: String,

    /// `flutter.versionCode` when `local.properties` has none (default: 1)
    pub version_code: u32,

    /// `flutter.versionName` when `local.properties` has none (default: "1.0")
    pub version_name: String,

    /// Release build shrinking (default: false)
    pub minify_enabled: bool,

    /// Multidex (default: false)
    pub multi_dex_enabled: bool,

    /// Release signing config (default: "debug", so `flutter run --release` works)
    pub signing_config: String,
}

impl Default for FlutterDefaults {
    fn default() -> Self {
        Self {
            compile_sdk: 34,
            min_sdk: 21,
            target_sdk: 34,
            ndk_version: "23.1.7779620".to_string(),
            version_code: 1,
            version_name: "1.0".to_string(),
            minify_enabled: false,
            multi_dex_enabled: false,
            signing_config: "debug".to_string(),
        }
    }
}

impl FlutterDefaults {
    /// Convert to JSON Value for merging, keyed like `BuildConfig`
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "compileSdk": self.compile_sdk,
            "minSdk": self.min_sdk,
            "targetSdk": self.target_sdk,
            "ndkVersion": self.ndk_version,
            "versionCode": self.version_code,
            "versionName": self.version_name,
            "minifyEnabled": self.minify_enabled,
            "multiDexEnabled": self.multi_dex_enabled,
            "signingConfig": self.signing_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let defaults = FlutterDefaults::default();
        assert_eq!(defaults.compile_sdk, 34);
        assert_eq!(defaults.min_sdk, 21);
        assert_eq!(defaults.target_sdk, 34);
        assert_eq!(defaults.version_code, 1);
        assert_eq!(defaults.signing_config, "debug");
        assert!(!defaults.minify_enabled);
    }

    #[test]
    fn test_to_value() {
        let value = FlutterDefaults::default().to_value();

        assert_eq!(value["compileSdk"], 34);
        assert_eq!(value["versionName"], "1.0");
        assert_eq!(value["signingConfig"], "debug");
        assert!(value.get("javaLevel").is_none());
    }
}
