use std::fmt;
use std::io::Write;
use std::sync::Arc;

use quiz_core::model::TableSet;
use quiz_core::{Locale, QuizConfig};
use services::{AppServices, MediaError, QuizService, QuizView, SoundKind, SoundPlayer, Speaker};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidTables(quiz_core::Error),
    InvalidLocale(quiz_core::Error),
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidTables(err) => write!(f, "invalid --tables value: {err}"),
            ArgsError::InvalidLocale(err) => write!(f, "invalid --locale value: {err}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

const DEFAULT_DB_URL: &str = "sqlite:quiz.sqlite3";

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play  [--db <sqlite_url>] [--tables 2,3] [--locale tr-TR|en-US]");
    eprintln!("                            [--seed <u64>] [--read-aloud]");
    eprintln!("  cargo run -p app -- reset [--db <sqlite_url>] [--tables 2,3]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --tables 2,3");
    eprintln!("  --locale tr-TR");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_TABLES, QUIZ_LOCALE, QUIZ_SEED, RUST_LOG");
    eprintln!();
    eprintln!("While playing: type an answer, `:read` toggles read-aloud, `:parent` shows");
    eprintln!("the parent panel, `:q` quits.");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    config: QuizConfig,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("QUIZ_DB_URL").unwrap_or_else(|_| DEFAULT_DB_URL.into());
        let mut tables = match std::env::var("QUIZ_TABLES") {
            Ok(raw) => parse_tables(&raw)?,
            Err(_) => TableSet::default(),
        };
        let mut locale = match std::env::var("QUIZ_LOCALE") {
            Ok(raw) => parse_locale(&raw)?,
            Err(_) => Locale::default(),
        };
        let mut seed = match std::env::var("QUIZ_SEED") {
            Ok(raw) => Some(parse_seed(&raw)?),
            Err(_) => None,
        };
        let mut read_aloud = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--tables" => tables = parse_tables(&require_value(args, "--tables")?)?,
                "--locale" => locale = parse_locale(&require_value(args, "--locale")?)?,
                "--seed" => seed = Some(parse_seed(&require_value(args, "--seed")?)?),
                "--read-aloud" => read_aloud = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let config = QuizConfig::new(tables)
            .with_locale(locale)
            .with_read_aloud(read_aloud)
            .with_seed(seed);
        Ok(Self {
            db_url: normalize_sqlite_url(db_url),
            config,
        })
    }
}

fn parse_tables(raw: &str) -> Result<TableSet, ArgsError> {
    TableSet::parse_list(raw).map_err(|err| ArgsError::InvalidTables(err.into()))
}

fn parse_locale(raw: &str) -> Result<Locale, ArgsError> {
    raw.parse::<Locale>()
        .map_err(|err| ArgsError::InvalidLocale(err.into()))
}

fn parse_seed(raw: &str) -> Result<u64, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ArgsError::InvalidSeed {
            raw: raw.to_string(),
        })
}

fn normalize_sqlite_url(raw: String) -> String {
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

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
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

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info,storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

//
// ─── TERMINAL COLLABORATORS ────────────────────────────────────────────────────
//

/// "Plays" feedback sounds with the terminal bell.
struct TerminalBell;

impl SoundPlayer for TerminalBell {
    fn play(&self, kind: SoundKind) -> Result<(), MediaError> {
        debug!(asset = kind.asset(), "feedback sound");
        let mut out = std::io::stdout();
        let bell = if kind == SoundKind::Correct { "\x07" } else { "\x07\x07" };
        out.write_all(bell.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| MediaError::Backend(e.to_string()))
    }
}

/// Prints what a speech engine would say.
struct TerminalSpeaker;

impl Speaker for TerminalSpeaker {
    fn speak(&self, text: &str, locale: Locale) -> Result<(), MediaError> {
        println!("🔊 [{locale}] {text}");
        Ok(())
    }
}

fn render(view: &QuizView) {
    println!();
    if let Some(feedback) = &view.feedback {
        println!("{}  ({})", feedback.message(), feedback.image());
    }
    for row in &view.tables {
        let filled = usize::try_from(row.percent / 10).unwrap_or(0);
        let marker = if row.is_current { '>' } else { ' ' };
        println!(
            "{marker} {:<18} [{}{}]",
            row.label,
            "#".repeat(filled),
            ".".repeat(10 - filled.min(10))
        );
    }
    print!("{}", view.score_label);
    if let Some(badge) = &view.badge {
        print!("  🎖️ {badge}");
    }
    println!();
    println!("{}", view.heading);
    println!("{}", view.prompt);
}

fn render_parent(view: &QuizView) {
    println!();
    println!("👨‍👩‍👧");
    for line in &view.parent.completion {
        println!("  {line}");
    }
    println!("  ⭐ {}", view.parent.total_score);
    println!("  🎖️ {}", view.parent.badge);
}

async fn play(mut quiz: QuizService) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", quiz.view().reminder);
    render(&quiz.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":q" | ":quit" => break,
            ":read" => {
                let enabled = !quiz.read_aloud_enabled();
                quiz.set_read_aloud_enabled(enabled);
            }
            ":parent" => render_parent(&quiz.view()),
            ":help" => print_usage(),
            answer => {
                quiz.submit_answer(answer).await;
            }
        }
        render(&quiz.view());
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let app_services = AppServices::new_sqlite(&parsed.db_url).await?;
    info!(db = %parsed.db_url, "storage ready");

    let quiz = app_services
        .start_quiz(
            parsed.config,
            Arc::new(TerminalBell),
            Arc::new(TerminalSpeaker),
        )
        .await;

    match cmd {
        Command::Play => play(quiz).await,
        Command::Reset => {
            let mut quiz = quiz;
            quiz.reset_progress().await?;
            println!("progress reset");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
