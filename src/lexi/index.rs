//! Display indexes.
//!
//! Lists shown to the user are numbered from 1 and commands refer back to
//! entries by that number. The number is only meaningful for the listing it
//! came from: the same ordering must be used to resolve it.

use crate::error::{LexiError, Result};
use crate::model::{Category, VocabularyItem};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Label used for words without a (surviving) category.
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayIndex(pub usize);

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = LexiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(DisplayIndex(n)),
            _ => Err(LexiError::Api(format!("Invalid index format: {}", s))),
        }
    }
}

impl DisplayIndex {
    /// Picks the entry this index points at in `entries`.
    pub fn pick<'a, T>(&self, entries: &'a [T]) -> Result<&'a T> {
        self.0
            .checked_sub(1)
            .and_then(|i| entries.get(i))
            .ok_or_else(|| LexiError::Api(format!("Index {} not found", self)))
    }
}

/// A word as shown in the dictionary listing.
#[derive(Debug, Clone)]
pub struct DisplayWord {
    pub index: DisplayIndex,
    pub word: VocabularyItem,
    /// Resolved category name; `None` when unset or the category was deleted.
    pub category: Option<String>,
}

impl DisplayWord {
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

/// Numbers `words` in the order given and resolves their category names.
pub fn index_words(words: Vec<VocabularyItem>, categories: &[Category]) -> Vec<DisplayWord> {
    let names: HashMap<Uuid, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    words
        .into_iter()
        .enumerate()
        .map(|(n, word)| {
            let category = word
                .category_id
                .and_then(|id| names.get(&id))
                .map(|name| name.to_string());
            DisplayWord {
                index: DisplayIndex(n + 1),
                word,
                category,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_numbers_only() {
        assert_eq!("3".parse::<DisplayIndex>().unwrap(), DisplayIndex(3));
        assert_eq!(" 12 ".parse::<DisplayIndex>().unwrap(), DisplayIndex(12));
        assert!("0".parse::<DisplayIndex>().is_err());
        assert!("p1".parse::<DisplayIndex>().is_err());
        assert!("-1".parse::<DisplayIndex>().is_err());
    }

    #[test]
    fn pick_is_one_based() {
        let entries = ["a", "b"];
        assert_eq!(*DisplayIndex(1).pick(&entries).unwrap(), "a");
        assert_eq!(*DisplayIndex(2).pick(&entries).unwrap(), "b");
        assert!(DisplayIndex(3).pick(&entries).is_err());
    }

    #[test]
    fn dangling_category_is_uncategorized() {
        let lang = Uuid::new_v4();
        let food = Category::new(lang, "Food".into());
        let mut pan = VocabularyItem::new(lang, "pan".into(), "bread".into());
        pan.category_id = Some(food.id);
        let mut orphan = VocabularyItem::new(lang, "x".into(), "y".into());
        orphan.category_id = Some(Uuid::new_v4());
        let plain = VocabularyItem::new(lang, "z".into(), "w".into());

        let listed = index_words(vec![pan, orphan, plain], &[food]);
        assert_eq!(listed[0].category_label(), "Food");
        assert_eq!(listed[1].category_label(), UNCATEGORIZED);
        assert_eq!(listed[2].category_label(), UNCATEGORIZED);
        assert_eq!(listed[2].index, DisplayIndex(3));
    }
}
