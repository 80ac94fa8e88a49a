//! MediaSort command-line tool
//!
//! `mediasort parse` prints what inference makes of release names.
//! `mediasort sort` moves finished downloads into the library.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use mediasort_core::{EngineConfig, InferenceEngine, InferenceRecord};
use mediasort_library::config::{DEFAULT_BOT_USERNAME, DEFAULT_MENTION};
use mediasort_library::{SortConfig, SortReport, Sorter, WebhookConfig};
use serde::Serialize;
use tracing::{Level, info};

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "mediasort")]
#[command(about = "Infer series, season and episode from release names and sort downloads")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Extra literal noise token stripped from names (repeatable)
    #[arg(long = "noise-token", value_name = "TOKEN", global = true)]
    noise_tokens: Vec<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Infer names given as arguments, or one per stdin line
    Parse {
        /// Release file names
        names: Vec<String>,

        /// Print the display form instead of JSON
        #[arg(short, long)]
        display: bool,
    },
    /// Move finished downloads into the library
    Sort(SortArgs),
}

#[derive(Debug, Args)]
struct SortArgs {
    /// Directory holding finished downloads
    #[arg(short, long, env = "MEDIASORT_DOWNLOAD_DIR")]
    from: PathBuf,

    /// Library root (Films/, Series/, Unsorted/)
    #[arg(short, long, env = "MEDIASORT_LIBRARY_ROOT")]
    to: PathBuf,

    /// Log planned moves without touching any file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Discord webhook announcing added files
    #[arg(long, env = "DISCORD_WEBHOOK_URL", hide_env_values = true)]
    webhook_url: Option<String>,

    /// Username shown on webhook messages
    #[arg(long, default_value = DEFAULT_BOT_USERNAME)]
    webhook_username: String,

    /// Mention opening each webhook message (empty to disable)
    #[arg(long, default_value = DEFAULT_MENTION)]
    mention: String,

    /// Seconds above which a file is a movie
    #[arg(long, env = "MEDIASORT_MOVIE_THRESHOLD", default_value_t = 3000)]
    movie_threshold: u64,

    /// Skip ffprobe; only Film/Movie names become movies
    #[arg(long)]
    no_probe: bool,

    /// Worker threads for inference and probing (0 = all cores)
    #[arg(long, env = "MEDIASORT_THREADS", default_value_t = 0)]
    threads: usize,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

impl SortArgs {
    fn into_config(self, engine: EngineConfig) -> SortConfig {
        let webhook = self.webhook_url.filter(|url| !url.is_empty()).map(|url| {
            WebhookConfig::new(url)
                .with_username(self.webhook_username)
                .with_mention(Some(self.mention))
        });

        SortConfig::new(self.from, self.to)
            .with_dry_run(self.dry_run)
            .with_probe(!self.no_probe)
            .with_movie_threshold(Duration::from_secs(self.movie_threshold))
            .with_threads(self.threads)
            .with_webhook(webhook)
            .with_engine(engine)
    }
}

/// One `parse` result as printed on stdout.
#[derive(Debug, Serialize)]
struct ParseOutput<'a> {
    input: &'a str,
    series_name: &'a str,
    season: u32,
    episode: u32,
    extension: &'a str,
    cleaned: &'a str,
    display: String,
}

impl<'a> ParseOutput<'a> {
    fn new(input: &'a str, record: &'a InferenceRecord) -> Self {
        Self {
            input,
            series_name: record.series_name(),
            season: record.season(),
            episode: record.episode(),
            extension: record.extension(),
            cleaned: record.cleaned_text(),
            display: record.to_string(),
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run_parse(engine: &InferenceEngine, names: Vec<String>, display: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut emit = |name: &str| -> Result<()> {
        let record = engine.infer(name);
        if display {
            writeln!(out, "{record}")?;
        } else {
            let line = serde_json::to_string(&ParseOutput::new(name, &record))?;
            writeln!(out, "{line}")?;
        }
        Ok(())
    };

    if names.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            emit(name)?;
        }
    } else {
        for name in &names {
            emit(name)?;
        }
    }

    Ok(())
}

fn print_report(report: &SortReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "scanned {}, moved {}, planned {}, skipped {}, unsorted {}, failed {}",
        report.scanned, report.moved, report.planned, report.skipped, report.unsorted, report.failed
    );
    for label in &report.added {
        println!("  {label}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let engine_config = EngineConfig::new().with_noise_tokens(cli.noise_tokens);

    match cli.command {
        Commands::Parse { names, display } => {
            let engine = InferenceEngine::new(&engine_config)
                .context("failed to build inference engine")?;
            run_parse(&engine, names, display)?;
        }
        Commands::Sort(args) => {
            let json = args.json;
            let config = args.into_config(engine_config);
            info!(
                from = %config.download_dir.display(),
                to = %config.library_root.display(),
                dry_run = config.dry_run,
                "sorting downloads"
            );

            let sorter = Sorter::new(config).context("failed to set up sorter")?;
            let report = sorter.run().context("sort failed")?;
            print_report(&report, json)?;

            if report.failed > 0 {
                anyhow::bail!("{} file(s) could not be moved", report.failed);
            }
        }
    }

    Ok(())
}
