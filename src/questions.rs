//! Question dataset: levels, character details and the per-level pool of
//! look-alike groups that rounds are drawn from.
//!
//! The shipped dataset is embedded at compile time from `assets/questions.json`;
//! the page may replace it through `load_questions()` before a game starts.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Embedded default dataset.
pub const DEFAULT_QUESTIONS_JSON: &str = include_str!("../assets/questions.json");

// --- Levels -----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Normal,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Normal, Level::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Normal => "normal",
            Level::Hard => "hard",
        }
    }

    /// Title-cased label shown on buttons and the result screen.
    pub fn label(self) -> String {
        crate::format::to_title_case(self.as_str())
    }
}

// --- Dataset ----------------------------------------------------------------

/// One character with its readings. `on` / `kun` are the Sino-Japanese and
/// native readings as displayed; `category` is the formation type
/// (象形文字, 形声文字, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub character: String,
    pub on: String,
    pub kun: String,
    pub meaning: String,
    pub category: String,
}

/// A set of visually related characters; one round draws its pair from a group.
pub type Group = Vec<QuestionDetail>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPool {
    pub easy: Vec<Group>,
    pub normal: Vec<Group>,
    pub hard: Vec<Group>,
}

impl QuestionPool {
    /// Parse and validate a JSON dataset.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let pool: QuestionPool = serde_json::from_str(json)?;
        pool.validate()?;
        Ok(pool)
    }

    /// The embedded dataset.
    pub fn builtin() -> Result<Self, GameError> {
        Self::from_json(DEFAULT_QUESTIONS_JSON)
    }

    pub fn groups(&self, level: Level) -> &[Group] {
        match level {
            Level::Easy => &self.easy,
            Level::Normal => &self.normal,
            Level::Hard => &self.hard,
        }
    }

    /// Every level needs at least one group and every group at least two
    /// entries, otherwise no major/minor pair can be drawn.
    pub fn validate(&self) -> Result<(), GameError> {
        for level in Level::ALL {
            let groups = self.groups(level);
            if groups.is_empty() {
                return Err(GameError::InvalidDataset(format!(
                    "level '{}' has no groups",
                    level.as_str()
                )));
            }
            for (idx, group) in groups.iter().enumerate() {
                if group.len() < 2 {
                    return Err(GameError::InvalidDataset(format!(
                        "group {idx} of level '{}' has {} entries, need at least 2",
                        level.as_str(),
                        group.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The pair drawn for one round. Fixed at session start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionContent {
    /// Fills every cell but one.
    pub major: QuestionDetail,
    /// The odd one out the player must find.
    pub minor: QuestionDetail,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(c: &str) -> QuestionDetail {
        QuestionDetail {
            character: c.into(),
            on: String::new(),
            kun: String::new(),
            meaning: String::new(),
            category: String::new(),
        }
    }

    #[test]
    fn builtin_dataset_loads() {
        let pool = QuestionPool::builtin().expect("embedded dataset must be valid");
        for level in Level::ALL {
            assert!(pool.groups(level).len() >= crate::config::QUESTIONS);
        }
    }

    #[test]
    fn level_serde_is_lowercase() {
        let lv: Level = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(lv, Level::Normal);
        assert_eq!(serde_json::to_string(&Level::Hard).unwrap(), "\"hard\"");
        assert_eq!(Level::Easy.label(), "Easy");
    }

    #[test]
    fn singleton_group_is_rejected() {
        let pool = QuestionPool {
            easy: vec![vec![detail("木"), detail("林")]],
            normal: vec![vec![detail("未")]],
            hard: vec![vec![detail("崇"), detail("祟")]],
        };
        assert!(matches!(pool.validate(), Err(GameError::InvalidDataset(_))));
    }

    #[test]
    fn missing_level_is_a_parse_error() {
        let err = QuestionPool::from_json(r#"{"easy": [], "normal": []}"#).unwrap_err();
        assert!(matches!(err, GameError::Dataset(_)));
    }
}
