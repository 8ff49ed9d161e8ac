use std::fmt;

use logos_core::model::QuizMode;
use services::AppConfig;

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidSize { raw: String },
    InvalidMode { raw: String },
    MissingWord,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidSize { raw } => write!(f, "invalid --size value: {raw}"),
            ArgsError::InvalidMode { raw } => write!(f, "invalid --mode value: {raw}"),
            ArgsError::MissingWord => write!(f, "speak requires a word"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quiz,
    Stats,
    Lexicon { search: String },
    Reset { confirmed: bool },
    Speak { word: String, out: Option<String> },
    Help,
}

#[derive(Debug)]
pub struct Args {
    pub command: Command,
    pub config: AppConfig,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  logos quiz    [--db <sqlite_url>] [--size <n>] [--mode <g2e|e2g>]");
    eprintln!("  logos stats   [--db <sqlite_url>]");
    eprintln!("  logos lexicon [--db <sqlite_url>] [--search <term>]");
    eprintln!("  logos reset   [--db <sqlite_url>] [--yes]");
    eprintln!("  logos speak <word> [--out <file>]");
    eprintln!();
    eprintln!("During a quiz, enter {SAY_COMMAND} to hear the Greek word.");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  command quiz, --db sqlite://logos.sqlite3, --size 10, --mode greek-to-english");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LOGOS_DB_URL, LOGOS_SESSION_SIZE, LOGOS_QUIZ_MODE");
    eprintln!("  LOGOS_TTS_API_KEY (or API_KEY), LOGOS_TTS_BASE_URL, LOGOS_TTS_MODEL, LOGOS_TTS_VOICE");
    eprintln!("  RUST_LOG");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    /// Parse `argv` (without the program name) on top of an env-derived config.
    pub fn parse(argv: Vec<String>, mut config: AppConfig) -> Result<Self, ArgsError> {
        let mut iter = argv.into_iter().peekable();

        let name = match iter.peek().map(String::as_str) {
            None => "quiz".to_owned(),
            Some(first) if first.starts_with('-') => "quiz".to_owned(),
            Some(_) => iter.next().unwrap_or_default(),
        };
        let mut command = match name.as_str() {
            "quiz" => Command::Quiz,
            "stats" => Command::Stats,
            "lexicon" => Command::Lexicon {
                search: String::new(),
            },
            "reset" => Command::Reset { confirmed: false },
            "speak" => Command::Speak {
                word: String::new(),
                out: None,
            },
            "help" => Command::Help,
            other => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };

        while let Some(arg) = iter.next() {
            if matches!(arg.as_str(), "--help" | "-h") {
                command = Command::Help;
                break;
            }
            match (arg.as_str(), &mut command) {
                ("--db", _) => {
                    let value = require_value(&mut iter, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    config.db_url = value;
                }
                ("--size", Command::Quiz) => {
                    let value = require_value(&mut iter, "--size")?;
                    config.session_size = match value.trim().parse::<usize>() {
                        Ok(n) if n > 0 => n,
                        _ => return Err(ArgsError::InvalidSize { raw: value }),
                    };
                }
                ("--mode", Command::Quiz) => {
                    let value = require_value(&mut iter, "--mode")?;
                    config.quiz_mode = value
                        .parse::<QuizMode>()
                        .map_err(|_| ArgsError::InvalidMode { raw: value.clone() })?;
                }
                ("--search", Command::Lexicon { search }) => {
                    *search = require_value(&mut iter, "--search")?;
                }
                ("--yes" | "-y", Command::Reset { confirmed }) => *confirmed = true,
                ("--out", Command::Speak { out, .. }) => {
                    *out = Some(require_value(&mut iter, "--out")?);
                }
                (value, Command::Speak { word, .. }) if word.is_empty() && !value.starts_with('-') => {
                    *word = arg.clone();
                }
                _ => return Err(ArgsError::UnknownArg(arg.clone())),
            }
        }

        if let Command::Speak { word, .. } = &command {
            if word.trim().is_empty() {
                return Err(ArgsError::MissingWord);
            }
        }

        config.db_url = normalize_sqlite_url(config.db_url);
        Ok(Self { command, config })
    }
}

/// Quiz input that requests the current word's pronunciation instead of answering.
pub const SAY_COMMAND: &str = ":say";

pub fn is_say_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(SAY_COMMAND)
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(
            args.iter().map(|s| (*s).to_owned()).collect(),
            AppConfig::default(),
        )
    }

    #[test]
    fn no_arguments_runs_a_default_quiz() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.command, Command::Quiz);
        assert_eq!(args.config.session_size, 10);
        assert_eq!(args.config.quiz_mode, QuizMode::GreekToEnglish);
    }

    #[test]
    fn quiz_flags_override_config() {
        let args = parse(&["--size", "5", "--mode", "e2g", "--db", "sqlite::memory:"]).unwrap();
        assert_eq!(args.command, Command::Quiz);
        assert_eq!(args.config.session_size, 5);
        assert_eq!(args.config.quiz_mode, QuizMode::EnglishToGreek);
        assert_eq!(args.config.db_url, "sqlite::memory:");
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            parse(&["quiz", "--size", "0"]).unwrap_err(),
            ArgsError::InvalidSize { raw: "0".into() }
        );
        assert_eq!(
            parse(&["quiz", "--mode", "latin"]).unwrap_err(),
            ArgsError::InvalidMode {
                raw: "latin".into()
            }
        );
        assert_eq!(
            parse(&["stats", "--size", "3"]).unwrap_err(),
            ArgsError::UnknownArg("--size".into())
        );
        assert_eq!(
            parse(&["dance"]).unwrap_err(),
            ArgsError::UnknownCommand("dance".into())
        );
    }

    #[test]
    fn reset_needs_explicit_yes() {
        assert_eq!(
            parse(&["reset"]).unwrap().command,
            Command::Reset { confirmed: false }
        );
        assert_eq!(
            parse(&["reset", "--yes"]).unwrap().command,
            Command::Reset { confirmed: true }
        );
    }

    #[test]
    fn speak_takes_word_and_output() {
        let args = parse(&["speak", "λόγος", "--out", "logos.pcm"]).unwrap();
        assert_eq!(
            args.command,
            Command::Speak {
                word: "λόγος".into(),
                out: Some("logos.pcm".into())
            }
        );
        assert_eq!(parse(&["speak"]).unwrap_err(), ArgsError::MissingWord);
    }

    #[test]
    fn lexicon_search_term() {
        let args = parse(&["lexicon", "--search", "love"]).unwrap();
        assert_eq!(
            args.command,
            Command::Lexicon {
                search: "love".into()
            }
        );
    }

    #[test]
    fn say_command_is_recognised_but_plain_words_are_answers() {
        assert!(is_say_command(":say"));
        assert!(is_say_command("  :SAY \n"));
        assert!(!is_say_command("say"));
        assert!(!is_say_command(""));
    }

    #[test]
    fn relative_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("data/logos.sqlite3".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/logos.sqlite3"));
    }
}
