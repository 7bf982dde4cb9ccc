use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Items with at least this many "forgot" marks show up in the `forgot` practice set.
pub const FORGOT_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageRole {
    Teacher,
    Student,
}

impl fmt::Display for LanguageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageRole::Teacher => f.write_str("teacher"),
            LanguageRole::Student => f.write_str("student"),
        }
    }
}

impl FromStr for LanguageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "teacher" => Ok(LanguageRole::Teacher),
            "student" => Ok(LanguageRole::Student),
            other => Err(format!("unknown language role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: Uuid,
    pub name: String,
    pub flag_emoji: Option<String>,
    pub role: Option<LanguageRole>,
    pub teacher_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Language {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            flag_emoji: None,
            role: None,
            teacher_user_id: None,
            created_at: Utc::now(),
        }
    }

    /// Name prefixed with the flag, when there is one.
    pub fn label(&self) -> String {
        match &self.flag_emoji {
            Some(flag) if !flag.is_empty() => format!("{} {}", flag, self.name),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub language_id: Uuid,
    pub name: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(language_id: Uuid, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            language_id,
            name,
            color: None,
            created_at: Utc::now(),
        }
    }
}

/// A single word or phrase with its review progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub id: Uuid,
    pub language_id: Uuid,
    /// Weak reference; may point at a category that has since been deleted.
    pub category_id: Option<Uuid>,
    pub term: String,
    pub definition: String,
    pub example_sentence: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub learned: bool,
    pub forgot_count: u32,
    pub difficulty: Option<Difficulty>,
}

impl VocabularyItem {
    pub fn new(language_id: Uuid, term: String, definition: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            language_id,
            category_id: None,
            term,
            definition,
            example_sentence: None,
            image_url: None,
            created_at: Utc::now(),
            learned: false,
            forgot_count: 0,
            difficulty: None,
        }
    }

    pub fn is_forgotten(&self) -> bool {
        self.forgot_count >= FORGOT_THRESHOLD
    }
}

/// Partial update for a [`VocabularyItem`]. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub learned: Option<bool>,
    /// Added to whatever count the stored record holds.
    pub forgot_increment: Option<u32>,
    pub difficulty: Option<Difficulty>,
}

impl ItemPatch {
    pub fn learned() -> Self {
        Self {
            learned: Some(true),
            ..Self::default()
        }
    }

    /// One more "forgot" mark.
    pub fn forgot() -> Self {
        Self {
            forgot_increment: Some(1),
            ..Self::default()
        }
    }

    pub fn difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty: Some(difficulty),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, item: &mut VocabularyItem) {
        if let Some(learned) = self.learned {
            item.learned = learned;
        }
        if let Some(step) = self.forgot_increment {
            item.forgot_count = item.forgot_count.saturating_add(step);
        }
        if let Some(difficulty) = self.difficulty {
            item.difficulty = Some(difficulty);
        }
    }
}
