use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Versioned key for a pattern catalog (e.g., `patternbook_core_v1`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Unique lookup key for a pattern document, written in kebab-case
/// (`object-pool`, `chain-of-responsibility`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternName(pub String);

impl PatternName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the name is lowercase kebab-case with no empty segments.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self.0.split('-').all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            })
    }
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatternName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Pattern family a document belongs to.
///
/// Known variants keep serialization consistent; `Other` preserves catalogs
/// that declare extra categories (the test-double guide uses `testing`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PatternCategory {
    Structural,
    Behavioral,
    Creational,
    Other(String),
}

impl Serialize for PatternCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PatternCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

impl PatternCategory {
    pub fn as_str(&self) -> &str {
        match self {
            PatternCategory::Structural => "structural",
            PatternCategory::Behavioral => "behavioral",
            PatternCategory::Creational => "creational",
            PatternCategory::Other(value) => value.as_str(),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "structural" => PatternCategory::Structural,
            "behavioral" => PatternCategory::Behavioral,
            "creational" => PatternCategory::Creational,
            other => PatternCategory::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_known_and_unknown() {
        let json = serde_json::to_string(&PatternCategory::Behavioral).unwrap();
        assert_eq!(json, "\"behavioral\"");

        let parsed: PatternCategory = serde_json::from_str("\"testing\"").unwrap();
        assert_eq!(parsed, PatternCategory::Other("testing".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"testing\"");
    }

    #[test]
    fn pattern_name_is_transparent() {
        let name = PatternName::from("private-class-data");
        assert_eq!(
            serde_json::to_string(&name).unwrap(),
            "\"private-class-data\""
        );
        assert_eq!(name.to_string(), "private-class-data");
    }

    #[test]
    fn pattern_name_well_formed_rules() {
        assert!(PatternName::from("adapter").is_well_formed());
        assert!(PatternName::from("chain-of-responsibility").is_well_formed());
        assert!(!PatternName::from("").is_well_formed());
        assert!(!PatternName::from("Adapter").is_well_formed());
        assert!(!PatternName::from("object--pool").is_well_formed());
        assert!(!PatternName::from("-facade").is_well_formed());
        assert!(!PatternName::from("object_pool").is_well_formed());
    }
}
