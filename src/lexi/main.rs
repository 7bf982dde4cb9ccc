use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use lexi::api::{
    CmdResult, ConfigAction, LexiApi, LexiPaths, NewBook, NewExercise, NewLanguage, NewMovie,
    NewSong, NewWord,
};
use lexi::error::{LexiError, Result};
use lexi::logging::init_tracing;
use lexi::model::Language;
use lexi::notebook::NotebookKind;
use lexi::store::fs::FileStore;
use std::path::PathBuf;
use tracing::debug;

mod args;
mod interactive;
mod print;

use args::{
    BookCommand, CategoryCommand, Cli, Commands, GrammarCommand, LanguageCommand, ModeArg,
    MovieCommand, SongCommand, SpeakingCommand, WordCommand,
};
use print::{print_categories, print_entries, print_languages, print_messages, print_words};

/// Overrides the platform data directory.
const HOME_ENV: &str = "LEXI_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: LexiApi<FileStore>,
    language: Option<String>,
}

impl AppContext {
    fn language(&self) -> Result<Language> {
        self.api.language(self.language.as_deref())
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Language(cmd)) => handle_language(&mut ctx, cmd),
        Some(Commands::Category(cmd)) => handle_category(&mut ctx, cmd),
        Some(Commands::Word(cmd)) => handle_word(&mut ctx, cmd),
        Some(Commands::Movie(cmd)) => handle_movie(&mut ctx, cmd),
        Some(Commands::Book(cmd)) => handle_book(&mut ctx, cmd),
        Some(Commands::Song(cmd)) => handle_song(&mut ctx, cmd),
        Some(Commands::Grammar(cmd)) => handle_grammar(&mut ctx, cmd),
        Some(Commands::Speaking(cmd)) => handle_speaking(&mut ctx, cmd),
        Some(Commands::Practice { mode, category }) => handle_practice(&mut ctx, mode, category),
        Some(Commands::Flashcards) => handle_flashcards(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_word(&mut ctx, WordCommand::List { search: None }),
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "lexi", "lexi")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            LexiError::Api(format!(
                "Could not determine a data directory; set {}",
                HOME_ENV
            ))
        })
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = data_dir()?;
    debug!(data_dir = %data_dir.display(), "using data directory");

    let store = FileStore::new(data_dir.clone());
    let api = LexiApi::new(store, LexiPaths { data_dir });
    Ok(AppContext {
        api,
        language: cli.language.clone(),
    })
}

fn handle_language(ctx: &mut AppContext, cmd: LanguageCommand) -> Result<()> {
    let result = match cmd {
        LanguageCommand::Add {
            name,
            flag,
            role,
            teacher,
        } => ctx.api.add_language(NewLanguage {
            name,
            flag_emoji: flag,
            role: role.map(Into::into),
            teacher_user_id: teacher,
        })?,
        LanguageCommand::List => {
            let result = ctx.api.list_languages()?;
            let current = ctx.language().ok().map(|l| l.id);
            print_languages(&result.languages, current);
            result
        }
        LanguageCommand::Use { index } => ctx.api.use_language(&index)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_category(ctx: &mut AppContext, cmd: CategoryCommand) -> Result<()> {
    let language = ctx.language()?;
    let result = match cmd {
        CategoryCommand::Add { name, color } => ctx.api.add_category(&language, &name, color)?,
        CategoryCommand::List => {
            let result = ctx.api.list_categories(&language)?;
            print_categories(&result.categories);
            result
        }
        CategoryCommand::Rename { index, name } => {
            ctx.api.rename_category(&language, &index, &name)?
        }
        CategoryCommand::Delete { index } => ctx.api.delete_category(&language, &index)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_word(ctx: &mut AppContext, cmd: WordCommand) -> Result<()> {
    let language = ctx.language()?;
    let result = match cmd {
        WordCommand::Add {
            term,
            definition,
            example,
            image,
            category,
        } => {
            let word = NewWord {
                term,
                definition,
                example_sentence: example,
                image_url: image,
                category: None,
            };
            ctx.api.add_word(&language, word, category.as_deref())?
        }
        WordCommand::List { search } => {
            let result = ctx.api.list_words(&language, search.as_deref())?;
            print_words(&result.listed_words);
            result
        }
        WordCommand::Delete { index } => ctx.api.delete_word(&language, &index)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_movie(ctx: &mut AppContext, cmd: MovieCommand) -> Result<()> {
    let language = ctx.language()?;
    let result = match cmd {
        MovieCommand::Add {
            title,
            review,
            summary,
            rating,
        } => ctx.api.add_movie(
            &language,
            NewMovie {
                title,
                review,
                summary,
                rating,
            },
        )?,
        MovieCommand::List => list_notebook(ctx, &language, NotebookKind::Movie)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_book(ctx: &mut AppContext, cmd: BookCommand) -> Result<()> {
    let language = ctx.language()?;
    let result = match cmd {
        BookCommand::Add {
            title,
            author,
            review,
            summary,
            rating,
        } => ctx.api.add_book(
            &language,
            NewBook {
                title,
                author,
                review,
                summary,
                rating,
            },
        )?,
        BookCommand::List => list_notebook(ctx, &language, NotebookKind::Book)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_song(ctx: &mut AppContext, cmd: SongCommand) -> Result<()> {
    let language = ctx.language()?;
    let result = match cmd {
        SongCommand::Add {
            title,
            artist,
            lyrics,
            translation,
        } => ctx.api.add_song(
            &language,
            NewSong {
                title,
                artist,
                lyrics,
                translation,
            },
        )?,
        SongCommand::List => list_notebook(ctx, &language, NotebookKind::Song)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_grammar(ctx: &mut AppContext, cmd: GrammarCommand) -> Result<()> {
    let language = ctx.language()?;
    let result = match cmd {
        GrammarCommand::Add { title, content } => {
            ctx.api.add_grammar_rule(&language, &title, &content)?
        }
        GrammarCommand::Exercise {
            rule,
            question,
            answer,
            explanation,
        } => ctx.api.add_grammar_exercise(
            &language,
            &rule,
            NewExercise {
                question,
                answer,
                explanation,
            },
        )?,
        GrammarCommand::List => list_notebook(ctx, &language, NotebookKind::Grammar)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_speaking(ctx: &mut AppContext, cmd: SpeakingCommand) -> Result<()> {
    let language = ctx.language()?;
    let result = match cmd {
        SpeakingCommand::Add { title } => ctx.api.add_speaking_topic(&language, &title)?,
        SpeakingCommand::Question { topic, question } => {
            ctx.api.add_speaking_question(&language, &topic, &question)?
        }
        SpeakingCommand::List => list_notebook(ctx, &language, NotebookKind::Speaking)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn list_notebook(ctx: &AppContext, language: &Language, kind: NotebookKind) -> Result<CmdResult> {
    let result = ctx.api.list_notebook(language, kind)?;
    print_entries(&result.entries);
    Ok(result)
}

fn handle_practice(
    ctx: &mut AppContext,
    mode: Option<ModeArg>,
    category: Option<String>,
) -> Result<()> {
    let language = ctx.language()?;
    let mode = mode.map(|m| m.as_str());
    let session = match ctx.api.start_practice(&language, mode, category.as_deref()) {
        Ok(session) => session,
        Err(LexiError::EmptySet) => {
            println!("{}", "Nothing to practice in this selection.".yellow());
            println!("{}", "Try `lexi practice --mode all` or add more words.".dimmed());
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    interactive::practice(&mut ctx.api, session, std::io::stdin().lock())
}

fn handle_flashcards(ctx: &mut AppContext) -> Result<()> {
    let language = ctx.language()?;
    let deck = match ctx.api.open_flashcards(&language) {
        Ok(deck) => deck,
        Err(LexiError::EmptySet) => {
            println!("{}", "No words yet. Add one with `lexi word add`.".yellow());
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    interactive::flashcards(&mut ctx.api, &language, deck, std::io::stdin().lock())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = ctx.api.configure(action)?;
    print_messages(&result.messages);
    Ok(())
}
