//! Property-based tests for the resolver.
//!
//! These tests verify that:
//! - Valid SDK/level combinations resolve to exactly the given values
//! - SDK ordering violations are always ConfigInvalid
//! - Differing values for one field in both sources are always ConfigConflict
//! - The bridging plugin ends up last whatever the declared order
//! - Resolution is idempotent

use flutter_android_config::model::FLUTTER_BRIDGE_PLUGIN;
use flutter_android_config::{
    resolve_build_config, LanguageLevel, PartialBuildConfig, PluginDeclaration, ResolveError,
};
use proptest::prelude::*;

fn arb_level() -> impl Strategy<Value = LanguageLevel> {
    prop::sample::select(LanguageLevel::ALL.to_vec())
}

/// Ordered (min, target, compile) triple
fn arb_valid_sdks() -> impl Strategy<Value = (u32, u32, u32)> {
    (1u32..40, 0u32..10, 0u32..10).prop_map(|(min, dt, dc)| (min, min + dt, min + dt + dc))
}

fn arb_plugin_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::string::string_regex(r"[a-z][a-z0-9]{0,6}(\.[a-z][a-z0-9-]{0,6}){1,2}").unwrap(),
        0..8,
    )
}

fn static_decl(level: LanguageLevel) -> PartialBuildConfig {
    PartialBuildConfig {
        application_id: Some("com.example.app".to_string()),
        java_level: Some(level),
        kotlin_level: Some(level),
        ..Default::default()
    }
}

fn dynamic_sdks(min: u32, target: u32, compile: u32) -> PartialBuildConfig {
    PartialBuildConfig {
        min_sdk: Some(min),
        target_sdk: Some(target),
        compile_sdk: Some(compile),
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn valid_inputs_resolve_to_given_values((min, target, compile) in arb_valid_sdks(), level in arb_level()) {
        let config = resolve_build_config(&static_decl(level), &dynamic_sdks(min, target, compile)).unwrap();
        prop_assert_eq!(config.min_sdk, min);
        prop_assert_eq!(config.target_sdk, target);
        prop_assert_eq!(config.compile_sdk, compile);
        prop_assert_eq!(config.java_level, level);
        prop_assert_eq!(config.kotlin_level, level);
    }

    #[test]
    fn min_above_target_is_invalid(target in 1u32..40, extra in 1u32..10, level in arb_level()) {
        let result = resolve_build_config(&static_decl(level), &dynamic_sdks(target + extra, target, target + extra));
        let is_invalid = matches!(result, Err(ResolveError::ConfigInvalid { .. }));
        prop_assert!(is_invalid);
    }

    #[test]
    fn differing_values_conflict(a in 1u32..40, b in 1u32..40, level in arb_level()) {
        prop_assume!(a != b);
        let mut static_part = static_decl(level);
        static_part.min_sdk = Some(a);
        let dynamic = PartialBuildConfig { min_sdk: Some(b), ..Default::default() };

        let err = resolve_build_config(&static_part, &dynamic).unwrap_err();
        prop_assert_eq!(err, ResolveError::conflict("minSdk", a, b));
    }

    #[test]
    fn mismatched_levels_are_invalid(java in arb_level(), kotlin in arb_level()) {
        prop_assume!(java != kotlin);
        let mut static_part = static_decl(java);
        static_part.kotlin_level = Some(kotlin);
        let result = resolve_build_config(&static_part, &PartialBuildConfig::default());
        let is_invalid = matches!(result, Err(ResolveError::ConfigInvalid { .. }));
        prop_assert!(is_invalid);
    }

    #[test]
    fn bridge_plugin_always_last(ids in arb_plugin_ids(), position in 0usize..8) {
        let mut declared = ids.clone();
        let at = position.min(declared.len());
        declared.insert(at, FLUTTER_BRIDGE_PLUGIN.to_string());

        let decl = PluginDeclaration::from_ids(declared, FLUTTER_BRIDGE_PLUGIN).unwrap();
        let ordered = decl.ordered();
        prop_assert_eq!(ordered.last().map(String::as_str), Some(FLUTTER_BRIDGE_PLUGIN));

        // Remaining plugins keep their first-occurrence order
        let mut expected: Vec<String> = Vec::new();
        for id in ids {
            if !expected.contains(&id) {
                expected.push(id);
            }
        }
        prop_assert_eq!(&ordered[..ordered.len() - 1], &expected[..]);
    }

    #[test]
    fn bridge_survives_later_edits(ids in arb_plugin_ids(), extra in arb_plugin_ids()) {
        let mut declared = vec![FLUTTER_BRIDGE_PLUGIN.to_string()];
        declared.extend(ids);
        let mut decl = PluginDeclaration::from_ids(declared, FLUTTER_BRIDGE_PLUGIN).unwrap();
        for (i, id) in extra.into_iter().enumerate() {
            if i % 2 == 0 {
                decl.apply(id).unwrap();
            } else {
                decl.insert(i, id).unwrap();
            }
        }
        let ordered = decl.ordered();
        prop_assert_eq!(ordered.last().map(String::as_str), Some(FLUTTER_BRIDGE_PLUGIN));
    }

    #[test]
    fn resolution_is_idempotent((min, target, compile) in arb_valid_sdks(), level in arb_level()) {
        let a = resolve_build_config(&static_decl(level), &dynamic_sdks(min, target, compile)).unwrap();
        let b = resolve_build_config(&static_decl(level), &dynamic_sdks(min, target, compile)).unwrap();
        prop_assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
        prop_assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    }
}

#[test]
fn example_static_levels_with_provider_sdks() {
    let config = resolve_build_config(&static_decl(LanguageLevel::Java17), &dynamic_sdks(21, 34, 34)).unwrap();
    assert_eq!(
        (config.min_sdk, config.target_sdk, config.compile_sdk),
        (21, 34, 34)
    );
    assert_eq!(config.java_level, LanguageLevel::Java17);
    assert_eq!(config.kotlin_level, LanguageLevel::Java17);
}

#[test]
fn example_conflicting_java_level() {
    let dynamic = PartialBuildConfig {
        java_level: Some(LanguageLevel::Java21),
        ..Default::default()
    };
    let err = resolve_build_config(&static_decl(LanguageLevel::Java17), &dynamic).unwrap_err();
    assert_eq!(err, ResolveError::conflict("javaLevel", 17, 21));
}
