use crate::commands::helpers::{optional_text, ordered_categories, require_text};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::model::{Category, Language};
use crate::store::DataStore;
use tracing::info;

pub fn add<S: DataStore>(
    store: &mut S,
    language: &Language,
    name: &str,
    color: Option<String>,
) -> Result<CmdResult> {
    let mut category = Category::new(language.id, require_text("Category name", name)?);
    category.color = optional_text(color);
    store.save_category(&category)?;
    info!(id = %category.id, name = %category.name, "category added");

    let message = CmdMessage::success(format!("Category added: {}", category.name));
    Ok(CmdResult::default()
        .with_categories(vec![category])
        .with_message(message))
}

pub fn list<S: DataStore>(store: &S, language: &Language) -> Result<CmdResult> {
    let categories = ordered_categories(store, &language.id)?;
    let mut result = CmdResult::default().with_categories(categories);
    if result.categories.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No categories yet for {}. Add one to organize your vocabulary.",
            language.label()
        )));
    }
    Ok(result)
}

pub fn resolve<S: DataStore>(store: &S, language: &Language, index: DisplayIndex) -> Result<Category> {
    let categories = ordered_categories(store, &language.id)?;
    index.pick(&categories).cloned()
}

pub fn rename<S: DataStore>(
    store: &mut S,
    language: &Language,
    index: DisplayIndex,
    name: &str,
) -> Result<CmdResult> {
    let name = require_text("Category name", name)?;
    let mut category = resolve(store, language, index)?;
    let old = std::mem::replace(&mut category.name, name);
    store.save_category(&category)?;

    let message = CmdMessage::success(format!("Category renamed: {} → {}", old, category.name));
    Ok(CmdResult::default()
        .with_categories(vec![category])
        .with_message(message))
}

/// Deletes the category. Its words stay and show up as uncategorized.
pub fn delete<S: DataStore>(store: &mut S, language: &Language, index: DisplayIndex) -> Result<CmdResult> {
    let category = resolve(store, language, index)?;
    store.delete_category(&category.id)?;
    info!(id = %category.id, "category deleted");

    let message = CmdMessage::success(format!("Category deleted: {}", category.name));
    Ok(CmdResult::default()
        .with_categories(vec![category])
        .with_message(message))
}
