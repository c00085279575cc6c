//! Java/Kotlin language levels
//!
//! Gradle spells the same level several ways: `JavaVersion.VERSION_17` for
//! `compileOptions`, `"17"` for `kotlinOptions.jvmTarget`, `17` for
//! `jvmToolchain`. All of them parse to one [`LanguageLevel`], which
//! serializes as its integer major version.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// JVM bytecode / language level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "LevelInput")]
pub enum LanguageLevel {
    Java8,
    Java11,
    Java17,
    Java21,
}

impl LanguageLevel {
    pub const ALL: [LanguageLevel; 4] = [
        LanguageLevel::Java8,
        LanguageLevel::Java11,
        LanguageLevel::Java17,
        LanguageLevel::Java21,
    ];

    /// Major version number (8 for Java 1.8)
    pub fn major(self) -> u32 {
        match self {
            LanguageLevel::Java8 => 8,
            LanguageLevel::Java11 => 11,
            LanguageLevel::Java17 => 17,
            LanguageLevel::Java21 => 21,
        }
    }

    pub fn from_major(major: u64) -> Option<Self> {
        match major {
            8 => Some(LanguageLevel::Java8),
            11 => Some(LanguageLevel::Java11),
            17 => Some(LanguageLevel::Java17),
            21 => Some(LanguageLevel::Java21),
            _ => None,
        }
    }

    /// `JavaVersion` constant used in `compileOptions`
    pub fn java_version_constant(self) -> &'static str {
        match self {
            LanguageLevel::Java8 => "JavaVersion.VERSION_1_8",
            LanguageLevel::Java11 => "JavaVersion.VERSION_11",
            LanguageLevel::Java17 => "JavaVersion.VERSION_17",
            LanguageLevel::Java21 => "JavaVersion.VERSION_21",
        }
    }

    /// String form used by `kotlinOptions.jvmTarget`
    pub fn jvm_target(self) -> &'static str {
        match self {
            LanguageLevel::Java8 => "1.8",
            LanguageLevel::Java11 => "11",
            LanguageLevel::Java17 => "17",
            LanguageLevel::Java21 => "21",
        }
    }
}

impl fmt::Display for LanguageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major())
    }
}

/// Error returned when a language level string is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language level '{0}' (expected one of 1.8, 11, 17, 21)")]
pub struct ParseLevelError(pub String);

impl FromStr for LanguageLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed
            .strip_prefix("JavaVersion.")
            .unwrap_or(trimmed);
        let bare = bare
            .strip_prefix("VERSION_")
            .or_else(|| bare.strip_prefix("JVM_"))
            .unwrap_or(bare);

        let major = match bare {
            "1.8" | "1_8" => Some(8),
            other => other.parse::<u64>().ok(),
        };

        major
            .and_then(LanguageLevel::from_major)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl From<LanguageLevel> for u32 {
    fn from(level: LanguageLevel) -> u32 {
        level.major()
    }
}

/// Every form a level can take in TOML or JSON
#[derive(Deserialize)]
#[serde(untagged)]
enum LevelInput {
    Major(u64),
    // TOML reads `1.8` as a float
    Decimal(f64),
    Text(String),
}

impl TryFrom<LevelInput> for LanguageLevel {
    type Error = ParseLevelError;

    fn try_from(input: LevelInput) -> Result<Self, Self::Error> {
        match input {
            LevelInput::Major(major) => {
                LanguageLevel::from_major(major).ok_or_else(|| ParseLevelError(major.to_string()))
            }
            LevelInput::Decimal(v) if (v - 1.8).abs() < f64::EPSILON => Ok(LanguageLevel::Java8),
            LevelInput::Decimal(v) => Err(ParseLevelError(v.to_string())),
            LevelInput::Text(text) => text.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spellings() {
        assert_eq!("17".parse::<LanguageLevel>().unwrap(), LanguageLevel::Java17);
        assert_eq!("VERSION_17".parse::<LanguageLevel>().unwrap(), LanguageLevel::Java17);
        assert_eq!(
            "JavaVersion.VERSION_1_8".parse::<LanguageLevel>().unwrap(),
            LanguageLevel::Java8
        );
        assert_eq!("1.8".parse::<LanguageLevel>().unwrap(), LanguageLevel::Java8);
        assert_eq!("JVM_21".parse::<LanguageLevel>().unwrap(), LanguageLevel::Java21);
        assert!("16".parse::<LanguageLevel>().is_err());
        assert!("seventeen".parse::<LanguageLevel>().is_err());
    }

    #[test]
    fn test_serde_integer_form() {
        let json = serde_json::to_string(&LanguageLevel::Java17).unwrap();
        assert_eq!(json, "17");

        let level: LanguageLevel = serde_json::from_str("\"VERSION_11\"").unwrap();
        assert_eq!(level, LanguageLevel::Java11);

        let level: LanguageLevel = serde_json::from_str("21").unwrap();
        assert_eq!(level, LanguageLevel::Java21);

        assert!(serde_json::from_str::<LanguageLevel>("9").is_err());
    }

    #[test]
    fn test_toml_float_for_java8() {
        #[derive(Deserialize)]
        struct Doc {
            level: LanguageLevel,
        }
        let doc: Doc = toml::from_str("level = 1.8").unwrap();
        assert_eq!(doc.level, LanguageLevel::Java8);
    }

    #[test]
    fn test_gradle_spellings() {
        assert_eq!(LanguageLevel::Java8.java_version_constant(), "JavaVersion.VERSION_1_8");
        assert_eq!(LanguageLevel::Java8.jvm_target(), "1.8");
        assert_eq!(LanguageLevel::Java17.jvm_target(), "17");
    }
}
