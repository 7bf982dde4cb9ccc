use crate::commands::helpers::{optional_text, ordered_languages, require_text};
use crate::commands::{CmdMessage, CmdResult, LexiPaths};
use crate::config::LexiConfig;
use crate::error::{LexiError, Result};
use crate::index::DisplayIndex;
use crate::model::{Language, LanguageRole};
use crate::store::DataStore;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct NewLanguage {
    pub name: String,
    pub flag_emoji: Option<String>,
    pub role: Option<LanguageRole>,
    pub teacher_user_id: Option<String>,
}

pub fn add<S: DataStore>(store: &mut S, new: NewLanguage) -> Result<CmdResult> {
    let mut language = Language::new(require_text("Language name", &new.name)?);
    language.flag_emoji = optional_text(new.flag_emoji);
    language.role = new.role;
    language.teacher_user_id = optional_text(new.teacher_user_id);
    store.save_language(&language)?;
    info!(id = %language.id, name = %language.name, "language added");

    let message = CmdMessage::success(format!("Language added: {}", language.label()));
    Ok(CmdResult::default()
        .with_languages(vec![language])
        .with_message(message))
}

pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_languages(ordered_languages(store)?))
}

pub fn resolve<S: DataStore>(store: &S, index: DisplayIndex) -> Result<Language> {
    let languages = ordered_languages(store)?;
    index.pick(&languages).cloned()
}

/// The configured language, or the oldest one when none is configured.
///
/// A configured language that no longer exists falls back the same way.
pub fn current<S: DataStore>(store: &S, config: &LexiConfig) -> Result<Language> {
    if let Some(id) = config.current_language {
        match store.get_language(&id) {
            Ok(language) => return Ok(language),
            Err(LexiError::LanguageNotFound(_)) => {
                warn!(%id, "configured language is gone, using the first one");
            }
            Err(e) => return Err(e),
        }
    }
    ordered_languages(store)?
        .into_iter()
        .next()
        .ok_or(LexiError::NoLanguageSelected)
}

/// Makes the language at `index` the current one.
pub fn select<S: DataStore>(store: &S, paths: &LexiPaths, index: DisplayIndex) -> Result<CmdResult> {
    let language = resolve(store, index)?;
    let mut config = LexiConfig::load(&paths.data_dir)?;
    config.current_language = Some(language.id);
    config.save(&paths.data_dir)?;

    let message = CmdMessage::success(format!("Now studying: {}", language.label()));
    Ok(CmdResult::default()
        .with_languages(vec![language])
        .with_config(config)
        .with_message(message))
}
