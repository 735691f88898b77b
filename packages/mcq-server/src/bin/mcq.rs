//! Generate multiple-choice questions from an article URL or text.
//!
//! Reads backend settings from the environment (see `mcq_core::config`) and
//! prints questions as JSON or text. When generation fails the fallback
//! questions are still printed, with a warning, and the exit status is
//! non-zero.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use content_extractor::ContentExtractor;
use mcq_core::{
    normalize_article_url, BackendConfig, Difficulty, GenerationSettings, Mcq, McqError,
    McqGenerator, McqSession,
};
use mcq_server::render::render_text;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mcq")]
#[command(about = "Generate multiple-choice questions from an article or text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Mark correct options and show explanations (text format)
    #[arg(long, global = true)]
    answers: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch an article and generate questions from it
    Url { url: String },

    /// Generate questions from text in a file, or stdin
    Text {
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SettingsArgs {
    /// Number of questions
    #[arg(long, default_value_t = 5, global = true)]
    questions: usize,

    /// easy, medium or hard
    #[arg(long, default_value_t = Difficulty::Medium, global = true)]
    difficulty: Difficulty,

    /// Options per question
    #[arg(long, default_value_t = 4, global = true)]
    options: usize,

    /// Sampling temperature between 0 and 1
    #[arg(long, default_value_t = 0.7, global = true)]
    temperature: f32,

    #[arg(long, global = true)]
    no_hints: bool,

    #[arg(long, global = true)]
    no_explanations: bool,

    /// Allow questions with several correct options
    #[arg(long, global = true)]
    multiple_correct: bool,
}

impl SettingsArgs {
    fn to_settings(&self) -> GenerationSettings {
        GenerationSettings::default()
            .with_num_questions(self.questions)
            .with_difficulty(self.difficulty)
            .with_num_answers(self.options)
            .with_temperature(self.temperature)
            .with_hints(!self.no_hints)
            .with_explanations(!self.no_explanations)
            .with_multiple_correct(self.multiple_correct)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn print_mcqs(mcqs: &[Mcq], format: OutputFormat, show_answers: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(mcqs).context("Failed to encode questions")?)
        }
        OutputFormat::Text => print!("{}", render_text(mcqs, show_answers)),
    }
    Ok(())
}

fn read_text(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings.to_settings();
    settings.validate()?;

    let backend = BackendConfig::from_env()
        .context("Failed to load backend configuration")?
        .build_backend();
    let session = McqSession::new(ContentExtractor::new(), McqGenerator::new(backend));

    let result = match cli.command {
        Commands::Url { url } => {
            let url = normalize_article_url(&url)?;
            eprintln!("{} {}", "Fetching".cyan(), url);
            session.generate_from_url(&url, &settings).await
        }
        Commands::Text { file } => {
            let text = read_text(file)?;
            session.generate_from_text(&text, &settings).await
        }
    };

    match result {
        Ok(mcqs) => print_mcqs(&mcqs, cli.format, cli.answers),
        Err(McqError::Generation(failure)) => {
            print_mcqs(&failure.fallback, cli.format, cli.answers)?;
            eprintln!(
                "{} showing sample questions because generation failed",
                "warning:".yellow().bold()
            );
            Err(failure.into())
        }
        Err(e) => Err(e.into()),
    }
}
