//! Layered and conflict-checked merging of JSON config trees
//!
//! Two merge modes:
//! - [`deep_merge`] / [`merge_layers`]: last wins. Used to stack the layers of
//!   one logical source (provider file, `local.properties`, CLI overrides) and
//!   to fill fallbacks underneath a merged result.
//! - [`strict_merge`]: used between the static declaration and the dynamic
//!   supplement. A key present in both with different values is a conflict.

use serde_json::Value;

use crate::error::ResolveError;

/// Layer `overlay` on top of `base`.
///
/// Maps merge key by key. Any other overlay value, arrays included, replaces
/// what is underneath. A `null` overlay leaves the base untouched, so an unset
/// key in a higher layer never erases a lower one.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (base, Value::Null) => base,
        (Value::Object(mut under), Value::Object(over)) => {
            for (key, value) in over {
                let layered = match under.remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                under.insert(key, layered);
            }
            Value::Object(under)
        }
        (_, replacement) => replacement,
    }
}

/// Stack layers lowest precedence first
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}

/// Merge two sources that must agree.
///
/// Objects merge by key; any other pair of values present on both sides must
/// be equal, otherwise the result is a `ConfigConflict` naming the dotted key
/// path with the first source's value before the second's. `null` counts as
/// absent.
pub fn strict_merge(first: Value, second: Value) -> Result<Value, ResolveError> {
    strict_merge_at(String::new(), first, second)
}

fn strict_merge_at(path: String, first: Value, second: Value) -> Result<Value, ResolveError> {
    match (first, second) {
        (Value::Object(mut first_map), Value::Object(second_map)) => {
            for (key, second_value) in second_map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                let merged = match first_map.remove(&key) {
                    Some(first_value) => strict_merge_at(child_path, first_value, second_value)?,
                    None => second_value,
                };
                first_map.insert(key, merged);
            }
            Ok(Value::Object(first_map))
        }
        (Value::Null, other) | (other, Value::Null) => Ok(other),
        (first, second) if first == second => Ok(first),
        (first, second) => {
            let field = if path.is_empty() { "<root>".to_string() } else { path };
            Err(ResolveError::ConfigConflict {
                field,
                first,
                second,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_later_scalar_wins() {
        let result = deep_merge(json!({"minSdk": 21}), json!({"minSdk": 23}));
        assert_eq!(result["minSdk"], 23);
    }

    #[test]
    fn test_nested_maps_merge() {
        let base = json!({"release": {"minifyEnabled": false, "signingConfig": "debug"}});
        let overlay = json!({"release": {"minifyEnabled": true}});
        let merged = deep_merge(base, overlay);

        assert_eq!(merged["release"]["minifyEnabled"], true);
        assert_eq!(merged["release"]["signingConfig"], "debug");
    }

    #[test]
    fn test_arrays_replace() {
        let result = deep_merge(json!({"abis": ["arm64-v8a", "x86_64"]}), json!({"abis": ["armeabi-v7a"]}));
        assert_eq!(result["abis"], json!(["armeabi-v7a"]));
    }

    #[test]
    fn test_provider_layers_stack() {
        let provider = json!({"compileSdk": 34, "versionCode": 1});
        let local_properties = json!({"versionCode": 7, "versionName": "1.2.0"});
        let cli = json!({"versionName": "1.2.1"});

        let result = merge_layers(vec![provider, local_properties, cli]);

        assert_eq!(result["compileSdk"], 34);
        assert_eq!(result["versionCode"], 7);
        assert_eq!(result["versionName"], "1.2.1");
    }

    #[test]
    fn test_null_overlay_keeps_base() {
        let result = deep_merge(json!({"ndkVersion": "23.1.7779620"}), json!({"ndkVersion": null}));
        assert_eq!(result["ndkVersion"], "23.1.7779620");
    }

    #[test]
    fn test_merge_layers_empty() {
        assert_eq!(merge_layers(vec![]), Value::Null);
    }

    #[test]
    fn test_strict_merge_disjoint() {
        let result = strict_merge(json!({"javaLevel": 17}), json!({"minSdk": 21})).unwrap();
        assert_eq!(result, json!({"javaLevel": 17, "minSdk": 21}));
    }

    #[test]
    fn test_strict_merge_equal_values_agree() {
        let result = strict_merge(json!({"minSdk": 21}), json!({"minSdk": 21})).unwrap();
        assert_eq!(result, json!({"minSdk": 21}));
    }

    #[test]
    fn test_strict_merge_conflict() {
        let err = strict_merge(json!({"javaLevel": 17}), json!({"javaLevel": 21})).unwrap_err();
        assert_eq!(err, ResolveError::conflict("javaLevel", 17, 21));
    }

    #[test]
    fn test_strict_merge_nested_path() {
        let err = strict_merge(
            json!({"release": {"signingConfig": "debug"}}),
            json!({"release": {"signingConfig": "upload"}}),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("release.signingConfig"));
    }

    #[test]
    fn test_strict_merge_null_is_absent() {
        let result = strict_merge(json!({"ndkVersion": null}), json!({"ndkVersion": "23.1.7779620"})).unwrap();
        assert_eq!(result["ndkVersion"], "23.1.7779620");
    }
}
