use clap::{Parser, Subcommand, ValueEnum};
use lexi::model::LanguageRole;

#[derive(Parser, Debug)]
#[command(name = "lexi")]
#[command(about = "Vocabulary notebook with flashcard review", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Act on the language at this index instead of the current one
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage study languages
    #[command(subcommand)]
    Language(LanguageCommand),

    /// Manage categories of the current language
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Manage words of the current language
    #[command(subcommand)]
    Word(WordCommand),

    /// Movies watched in the current language
    #[command(subcommand)]
    Movie(MovieCommand),

    /// Books read in the current language
    #[command(subcommand)]
    Book(BookCommand),

    /// Songs with lyrics and translations
    #[command(subcommand)]
    Song(SongCommand),

    /// Grammar rules and their exercises
    #[command(subcommand)]
    Grammar(GrammarCommand),

    /// Speaking topics and their questions
    #[command(subcommand)]
    Speaking(SpeakingCommand),

    /// Review words one card at a time
    #[command(alias = "p")]
    Practice {
        /// Which words to practice (defaults to the configured mode)
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Category index (implies category mode)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Browse every word and tag its difficulty
    #[command(alias = "fc")]
    Flashcards,

    /// Get or set configuration
    Config {
        /// Configuration key (current-language, default-mode)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LanguageCommand {
    /// Add a language
    Add {
        name: String,

        /// Flag emoji shown next to the name
        #[arg(long)]
        flag: Option<String>,

        #[arg(long, value_enum)]
        role: Option<RoleArg>,

        /// Teacher user reference
        #[arg(long)]
        teacher: Option<String>,
    },

    /// List languages
    #[command(alias = "ls")]
    List,

    /// Make a language the current one
    Use { index: String },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Add a category
    Add {
        name: String,

        #[arg(long)]
        color: Option<String>,
    },

    /// List categories
    #[command(alias = "ls")]
    List,

    /// Rename a category
    Rename { index: String, name: String },

    /// Delete a category (its words become uncategorized)
    #[command(alias = "rm")]
    Delete { index: String },
}

#[derive(Subcommand, Debug)]
pub enum WordCommand {
    /// Add a word
    Add {
        term: String,
        definition: String,

        /// Example sentence
        #[arg(long)]
        example: Option<String>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,

        /// Category index
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List words, newest first
    #[command(alias = "ls")]
    List {
        /// Only show words whose term or definition contains this
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Delete a word
    #[command(alias = "rm")]
    Delete { index: String },
}

#[derive(Subcommand, Debug)]
pub enum MovieCommand {
    /// Add a movie
    Add {
        title: String,

        #[arg(long)]
        review: Option<String>,

        #[arg(long)]
        summary: Option<String>,

        /// Stars, 1 to 5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,
    },

    /// List movies, newest first
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand, Debug)]
pub enum BookCommand {
    /// Add a book
    Add {
        title: String,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        review: Option<String>,

        #[arg(long)]
        summary: Option<String>,

        /// Stars, 1 to 5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,
    },

    /// List books, newest first
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand, Debug)]
pub enum SongCommand {
    /// Add a song
    Add {
        title: String,

        #[arg(long)]
        artist: Option<String>,

        #[arg(long)]
        lyrics: Option<String>,

        #[arg(long)]
        translation: Option<String>,
    },

    /// List songs, newest first
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand, Debug)]
pub enum GrammarCommand {
    /// Add a grammar rule
    Add { title: String, content: String },

    /// Add an exercise to a rule
    Exercise {
        /// Rule index
        rule: String,
        question: String,
        answer: String,

        #[arg(long)]
        explanation: Option<String>,
    },

    /// List rules with their exercises, newest first
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand, Debug)]
pub enum SpeakingCommand {
    /// Add a speaking topic
    Add { title: String },

    /// Add a question to a topic
    Question {
        /// Topic index
        topic: String,
        question: String,
    },

    /// List topics with their questions, newest first
    #[command(alias = "ls")]
    List,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    All,
    Category,
    Forgot,
}

impl ModeArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeArg::All => "all",
            ModeArg::Category => "category",
            ModeArg::Forgot => "forgot",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RoleArg {
    Teacher,
    Student,
}

impl From<RoleArg> for LanguageRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Teacher => LanguageRole::Teacher,
            RoleArg::Student => LanguageRole::Student,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_practice_flags() {
        let cli = Cli::parse_from(["lexi", "-l", "2", "practice", "--mode", "forgot"]);
        assert_eq!(cli.language.as_deref(), Some("2"));
        match cli.command {
            Some(Commands::Practice { mode, category }) => {
                assert!(matches!(mode, Some(ModeArg::Forgot)));
                assert!(category.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_word_add() {
        let cli = Cli::parse_from([
            "lexi", "word", "add", "gato", "cat", "--example", "El gato.", "-c", "1",
        ]);
        match cli.command {
            Some(Commands::Word(WordCommand::Add {
                term,
                definition,
                example,
                category,
                ..
            })) => {
                assert_eq!(term, "gato");
                assert_eq!(definition, "cat");
                assert_eq!(example.as_deref(), Some("El gato."));
                assert_eq!(category.as_deref(), Some("1"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(Cli::try_parse_from(["lexi", "language", "add", "Spanish", "--role", "admin"]).is_err());
    }

    #[test]
    fn parses_notebook_commands() {
        let cli = Cli::parse_from(["lexi", "movie", "add", "Roma", "--rating", "4"]);
        match cli.command {
            Some(Commands::Movie(MovieCommand::Add { title, rating, .. })) => {
                assert_eq!(title, "Roma");
                assert_eq!(rating, Some(4));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::parse_from(["lexi", "grammar", "exercise", "1", "Yo ___.", "soy"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Grammar(GrammarCommand::Exercise { .. }))
        ));
    }

    #[test]
    fn rejects_rating_out_of_range() {
        assert!(Cli::try_parse_from(["lexi", "book", "add", "Ficciones", "--rating", "6"]).is_err());
        assert!(Cli::try_parse_from(["lexi", "movie", "add", "Roma", "--rating", "0"]).is_err());
    }
}
