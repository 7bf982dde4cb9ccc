//! Row shapes as stored on disk, and their validation into the model.

use crate::error::LexiError;
use crate::model::{Category, Difficulty, Language, LanguageRole, VocabularyItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanguageRow {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub flag_emoji: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub teacher_user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: Uuid,
    pub language_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordRow {
    pub id: Uuid,
    pub language_id: Uuid,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub example_sentence: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub learned: Option<bool>,
    #[serde(default)]
    pub forgot_count: Option<i64>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

fn invalid(id: Uuid, reason: impl Into<String>) -> LexiError {
    LexiError::InvalidRecord {
        id,
        reason: reason.into(),
    }
}

/// The backend stored blank form fields as empty strings.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(id: Uuid, field: &str, value: String) -> Result<String, LexiError> {
    if value.trim().is_empty() {
        return Err(invalid(id, format!("{} is empty", field)));
    }
    Ok(value)
}

impl TryFrom<LanguageRow> for Language {
    type Error = LexiError;

    fn try_from(row: LanguageRow) -> Result<Self, Self::Error> {
        let role = non_blank(row.role)
            .map(|r| r.parse::<LanguageRole>())
            .transpose()
            .map_err(|e| invalid(row.id, e))?;
        Ok(Language {
            id: row.id,
            name: required(row.id, "name", row.name)?,
            flag_emoji: non_blank(row.flag_emoji),
            role,
            teacher_user_id: non_blank(row.teacher_user_id),
            created_at: row.created_at.unwrap_or_default(),
        })
    }
}

impl From<&Language> for LanguageRow {
    fn from(language: &Language) -> Self {
        Self {
            id: language.id,
            name: language.name.clone(),
            flag_emoji: language.flag_emoji.clone(),
            role: language.role.map(|r| r.to_string()),
            teacher_user_id: language.teacher_user_id.clone(),
            created_at: Some(language.created_at),
        }
    }
}

impl TryFrom<CategoryRow> for Category {
    type Error = LexiError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: row.id,
            language_id: row.language_id,
            name: required(row.id, "name", row.name)?,
            color: non_blank(row.color),
            created_at: row.created_at.unwrap_or_default(),
        })
    }
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            language_id: category.language_id,
            name: category.name.clone(),
            color: category.color.clone(),
            created_at: Some(category.created_at),
        }
    }
}

impl TryFrom<WordRow> for VocabularyItem {
    type Error = LexiError;

    fn try_from(row: WordRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let forgot_count = match row.forgot_count {
            None => 0,
            Some(n) => u32::try_from(n)
                .map_err(|_| invalid(id, format!("forgot_count {} out of range", n)))?,
        };
        let difficulty = non_blank(row.difficulty)
            .map(|d| d.parse::<Difficulty>())
            .transpose()
            .map_err(|e| invalid(id, e))?;

        Ok(VocabularyItem {
            id,
            language_id: row.language_id,
            category_id: row.category_id,
            term: required(id, "word", row.word)?,
            definition: required(id, "definition", row.definition)?,
            example_sentence: non_blank(row.example_sentence),
            image_url: non_blank(row.image_url),
            created_at: row.created_at.unwrap_or_default(),
            learned: row.learned.unwrap_or(false),
            forgot_count,
            difficulty,
        })
    }
}

impl From<&VocabularyItem> for WordRow {
    fn from(item: &VocabularyItem) -> Self {
        Self {
            id: item.id,
            language_id: item.language_id,
            category_id: item.category_id,
            word: item.term.clone(),
            definition: item.definition.clone(),
            example_sentence: item.example_sentence.clone(),
            image_url: item.image_url.clone(),
            created_at: Some(item.created_at),
            learned: Some(item.learned),
            forgot_count: Some(i64::from(item.forgot_count)),
            difficulty: item.difficulty.map(|d| d.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn word_row(extra: serde_json::Value) -> WordRow {
        let mut base = json!({
            "id": Uuid::new_v4(),
            "language_id": Uuid::new_v4(),
            "word": "gato",
            "definition": "cat",
        });
        if let (Some(obj), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                obj.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn missing_progress_columns_default() {
        let item = VocabularyItem::try_from(word_row(json!({}))).unwrap();
        assert!(!item.learned);
        assert_eq!(item.forgot_count, 0);
        assert_eq!(item.difficulty, None);
        assert_eq!(item.category_id, None);
    }

    #[test]
    fn null_progress_columns_default() {
        let row = word_row(json!({ "learned": null, "forgot_count": null, "difficulty": null }));
        let item = VocabularyItem::try_from(row).unwrap();
        assert!(!item.learned);
        assert_eq!(item.forgot_count, 0);
    }

    #[test]
    fn blank_optional_text_becomes_none() {
        let row = word_row(json!({ "example_sentence": "", "image_url": "  ", "difficulty": "" }));
        let item = VocabularyItem::try_from(row).unwrap();
        assert_eq!(item.example_sentence, None);
        assert_eq!(item.image_url, None);
        assert_eq!(item.difficulty, None);
    }

    #[test]
    fn negative_forgot_count_is_rejected() {
        let row = word_row(json!({ "forgot_count": -1 }));
        let id = row.id;
        match VocabularyItem::try_from(row) {
            Err(LexiError::InvalidRecord { id: bad, .. }) => assert_eq!(bad, id),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let row = word_row(json!({ "difficulty": "brutal" }));
        assert!(matches!(
            VocabularyItem::try_from(row),
            Err(LexiError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn empty_term_is_rejected() {
        let row = word_row(json!({ "word": " " }));
        assert!(matches!(
            VocabularyItem::try_from(row),
            Err(LexiError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn item_survives_row_conversion() {
        let mut item = VocabularyItem::new(Uuid::new_v4(), "perro".into(), "dog".into());
        item.forgot_count = 4;
        item.difficulty = Some(Difficulty::Easy);
        item.category_id = Some(Uuid::new_v4());

        let back = VocabularyItem::try_from(WordRow::from(&item)).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn language_role_is_validated() {
        let row = LanguageRow {
            id: Uuid::new_v4(),
            name: "French".into(),
            flag_emoji: None,
            role: Some("principal".into()),
            teacher_user_id: None,
            created_at: None,
        };
        assert!(Language::try_from(row).is_err());
    }
}
