use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Stable identifier of an achievement.
///
/// The serialized names are what the unlock store records, so they are part of
/// the on-disk format and must not change between releases.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "HelloWorldAchievement")]
    HelloWorld,
    #[serde(rename = "AssignAchievement")]
    Assignment,
    #[serde(rename = "MathOperatorsAchievement")]
    MathOperators,
    #[serde(rename = "BitwiseOperatorsAchievement")]
    BitwiseOperators,
    #[serde(rename = "ConditionalAchievement")]
    Conditional,
    #[serde(rename = "LoopsAchievement")]
    Loops,
    #[serde(rename = "ComprehensionsAchievement")]
    Comprehensions,
    #[serde(rename = "PassAchievement")]
    Pass,
    #[serde(rename = "FunctionAchievement")]
    Function,
    #[serde(rename = "LambdaAchievement")]
    Lambda,
    #[serde(rename = "ListAchievement")]
    List,
    #[serde(rename = "DictAchievement")]
    Dict,
    #[serde(rename = "ClassAchievement")]
    Class,
}

impl AchievementId {
    /// Every known identifier, in declaration order.
    pub const ALL: [AchievementId; 13] = [
        AchievementId::HelloWorld,
        AchievementId::Assignment,
        AchievementId::MathOperators,
        AchievementId::BitwiseOperators,
        AchievementId::Conditional,
        AchievementId::Loops,
        AchievementId::Comprehensions,
        AchievementId::Pass,
        AchievementId::Function,
        AchievementId::Lambda,
        AchievementId::List,
        AchievementId::Dict,
        AchievementId::Class,
    ];

    /// The persisted name of this identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            AchievementId::HelloWorld => "HelloWorldAchievement",
            AchievementId::Assignment => "AssignAchievement",
            AchievementId::MathOperators => "MathOperatorsAchievement",
            AchievementId::BitwiseOperators => "BitwiseOperatorsAchievement",
            AchievementId::Conditional => "ConditionalAchievement",
            AchievementId::Loops => "LoopsAchievement",
            AchievementId::Comprehensions => "ComprehensionsAchievement",
            AchievementId::Pass => "PassAchievement",
            AchievementId::Function => "FunctionAchievement",
            AchievementId::Lambda => "LambdaAchievement",
            AchievementId::List => "ListAchievement",
            AchievementId::Dict => "DictAchievement",
            AchievementId::Class => "ClassAchievement",
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a persisted name does not match any known identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAchievementId(pub String);

impl fmt::Display for UnknownAchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown achievement id '{}'", self.0)
    }
}

impl std::error::Error for UnknownAchievementId {}

impl FromStr for AchievementId {
    type Err = UnknownAchievementId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AchievementId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownAchievementId(s.to_string()))
    }
}

/// On-disk layout of the unlock store.
///
/// Entries are kept as raw strings so that names written by other versions
/// survive a load/save cycle even when this build does not know them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDef {
    #[serde(default)]
    pub unlocked: Vec<String>,
}

impl StoreDef {
    /// Split the recorded names into known identifiers and unrecognized names.
    pub fn partition_ids(&self) -> (BTreeSet<AchievementId>, Vec<&str>) {
        let mut known = BTreeSet::new();
        let mut unknown = Vec::new();
        for raw in &self.unlocked {
            match raw.parse::<AchievementId>() {
                Ok(id) => {
                    known.insert(id);
                },
                Err(_) => unknown.push(raw.as_str()),
            }
        }
        (known, unknown)
    }

    pub fn contains(&self, id: AchievementId) -> bool {
        self.unlocked.iter().any(|raw| raw == id.as_str())
    }

    /// Append `id` unless it is already recorded. Returns true if it was added.
    pub fn push_unlocked(&mut self, id: AchievementId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.unlocked.push(id.as_str().to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_names_parse_back() {
        for id in AchievementId::ALL {
            assert_eq!(id.as_str().parse::<AchievementId>(), Ok(id));
        }
        assert!("ForLoopAchievement".parse::<AchievementId>().is_err());
    }

    #[test]
    fn serde_names_match_as_str() {
        for id in AchievementId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn partition_keeps_unknown_names_aside() {
        let store = StoreDef {
            unlocked: vec![
                "AssignAchievement".into(),
                "ForLoopAchievement".into(),
                "PassAchievement".into(),
            ],
        };
        let (known, unknown) = store.partition_ids();
        assert_eq!(
            known.into_iter().collect::<Vec<_>>(),
            vec![AchievementId::Assignment, AchievementId::Pass]
        );
        assert_eq!(unknown, vec!["ForLoopAchievement"]);
    }

    #[test]
    fn push_unlocked_skips_duplicates() {
        let mut store = StoreDef::default();
        assert!(store.push_unlocked(AchievementId::Loops));
        assert!(!store.push_unlocked(AchievementId::Loops));
        assert_eq!(store.unlocked, vec!["LoopsAchievement".to_string()]);
    }

    #[test]
    fn missing_unlocked_field_defaults_to_empty() {
        let store: StoreDef = serde_json::from_str("{}").unwrap();
        assert!(store.unlocked.is_empty());
    }
}
