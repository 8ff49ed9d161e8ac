mod args;

use std::io::{self, BufRead, Write};

use args::{Args, ArgsError, Command, SAY_COMMAND, is_say_command, print_usage};
use logos_core::model::QuizMode;
use services::{AppConfig, AppServices, Clock, SessionStatus, SpeakOutcome};

type BoxError = Box<dyn std::error::Error>;

async fn run() -> Result<(), BoxError> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let parsed = Args::parse(argv, AppConfig::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let Args { command, config } = parsed;
    if command == Command::Help {
        print_usage();
        return Ok(());
    }

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&config.db_url)?;
    let quiz_mode = config.quiz_mode;
    let app = AppServices::new_sqlite(config, Clock::system()).await?;

    match command {
        Command::Quiz => run_quiz(&app, quiz_mode).await,
        Command::Stats => {
            print_stats(&app).await;
            Ok(())
        }
        Command::Lexicon { search } => {
            print_lexicon(&app, &search).await;
            Ok(())
        }
        Command::Reset { confirmed } => reset(&app, confirmed).await,
        Command::Speak { word, out } => speak(&app, &word, out.as_deref()).await,
        Command::Help => Ok(()),
    }
}

async fn run_quiz(app: &AppServices, mode: QuizMode) -> Result<(), BoxError> {
    let loop_svc = app.session_loop();
    let mut session = loop_svc.start_session(mode)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Logos quiz ({mode}): {} words.", session.total());

    loop {
        let progress = session.progress();
        let Some(entry) = session.current_word() else {
            break;
        };
        let prompt = mode.prompt(entry).to_owned();
        let greek = entry.word().to_owned();
        println!();
        println!("[{}/{}] {prompt}", progress.position, progress.total);

        let answer = loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = lines.next().transpose()? else {
                log::info!("input closed; leaving session unfinished");
                println!();
                return Ok(());
            };
            if !is_say_command(&line) {
                break line;
            }
            // Hearing the Greek word would give the answer away before judging.
            if mode == QuizMode::GreekToEnglish {
                spawn_pronunciation(app, greek.clone());
            } else {
                println!("Pronunciation is available once the word is revealed.");
            }
        };

        let outcome = loop_svc.submit_answer(&mut session, &answer).await?;
        if outcome.correct {
            println!("Correct! {}", outcome.reveal);
        } else {
            println!("Incorrect. Expected: {} ({})", outcome.expected, outcome.reveal);
        }
        println!(
            "Mastery: {:.0}% (level {:.1})",
            outcome.record.mastery_percent(),
            outcome.record.level()
        );

        if session.progress().position < session.total() {
            loop {
                print!("Press Enter for the next word ({SAY_COMMAND} to hear it)... ");
                io::stdout().flush()?;
                let Some(line) = lines.next().transpose()? else {
                    return Ok(());
                };
                if !is_say_command(&line) {
                    break;
                }
                spawn_pronunciation(app, greek.clone());
            }
        }
        if loop_svc.advance(&mut session)? == SessionStatus::Complete {
            break;
        }
    }

    if let Some(report) = session.report() {
        println!();
        println!("Session complete: {}/{} correct", report.score, report.total);
    }
    print_stats(app).await;
    Ok(())
}

/// Request pronunciation in the background so the quiz never waits on it.
fn spawn_pronunciation(app: &AppServices, word: String) {
    let pronunciation = app.pronunciation();
    tokio::spawn(async move {
        match pronunciation.speak(&word).await {
            SpeakOutcome::Spoken(audio) => println!(
                "\n(pronounced {word}: {:.1}s of audio)",
                audio.duration().as_secs_f32()
            ),
            SpeakOutcome::Busy => println!("\n(still pronouncing the previous word)"),
            SpeakOutcome::Failed => println!("\n(pronunciation unavailable)"),
        }
    });
}

async fn print_stats(app: &AppServices) {
    let summary = app.progress().summary().await;
    println!();
    println!("Words seen:     {} of {}", summary.words_seen, summary.catalog_size);
    println!("Accuracy:       {}%", summary.accuracy);
    println!("Words mastered: {}", summary.mastered_count);
    println!(
        "Answers:        {} correct, {} incorrect",
        summary.total_correct, summary.total_incorrect
    );
    if let Some(word) = app.catalog().word_of_the_day() {
        println!(
            "Word of the day: {} ({}) {}",
            word.word(),
            word.transliteration(),
            word.definition()
        );
    }
}

async fn print_lexicon(app: &AppServices, search: &str) {
    let entries = app.progress().lexicon(search).await;
    if entries.is_empty() {
        println!("No words match \"{search}\".");
        return;
    }
    for entry in entries {
        let word = &entry.word;
        println!(
            "{:<10} {:<12} {:<32} {:<12} x{:<5} {:>3.0}%",
            word.word(),
            word.transliteration(),
            word.definition(),
            word.part_of_speech(),
            word.frequency(),
            entry.mastery_percent()
        );
    }
}

async fn reset(app: &AppServices, confirmed: bool) -> Result<(), BoxError> {
    let progress = app.progress();
    let request = progress.request_reset().await;
    if !confirmed {
        println!(
            "This erases progress for {} words. Re-run with --yes to confirm.",
            request.words_seen()
        );
        return Ok(());
    }
    progress.confirm_reset(request).await?;
    println!("Progress reset.");
    Ok(())
}

async fn speak(app: &AppServices, word: &str, out: Option<&str>) -> Result<(), BoxError> {
    match app.pronunciation().speak(word).await {
        SpeakOutcome::Spoken(audio) => {
            println!(
                "Synthesized {word}: {:.2}s of 24 kHz mono s16le audio",
                audio.duration().as_secs_f32()
            );
            if let Some(path) = out {
                std::fs::write(path, audio.pcm())?;
                println!("Wrote {path}");
            }
        }
        SpeakOutcome::Busy => println!("Already speaking."),
        SpeakOutcome::Failed => println!("Pronunciation unavailable."),
    }
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), BoxError> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
