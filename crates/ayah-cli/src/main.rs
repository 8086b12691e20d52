use anyhow::Result;
use ayah_fetch::{ClientConfig, VerseClient, DEFAULT_BASE_URL};
use ayah_model::{OutputMode, TranslationCatalog};
use clap::builder::PossibleValuesParser;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

mod report;
mod shell;
#[cfg(test)]
mod test_upstream;

const EXAMPLES: &str = "\
Examples:
  ayah 2:255                       # Ayat al-Kursi, Arabic and translation
  ayah 1:1 -t pickthall            # Al-Fatiha verse 1 with Pickthall's translation
  ayah 3:10 -f both -o verse.txt   # Save Arabic and translation to a file
  ayah 18:65 -f translation        # Translation only
  ayah -i                          # Interactive mode";

#[derive(Debug, Parser)]
#[command(name = "ayah")]
#[command(about = "Fetch Quranic verses using chapter:verse references")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Verse in "chapter:verse" format (e.g., "2:255", "3:10")
    verse: Option<String>,

    /// Translation to include
    #[arg(
        short,
        long,
        default_value = TranslationCatalog::DEFAULT_KEY,
        value_parser = PossibleValuesParser::new(TranslationCatalog::keys())
    )]
    translation: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Both)]
    format: FormatArg,

    /// Save output to this file instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List available translations and exit
    #[arg(long)]
    list_translations: bool,

    /// Prompt for verses in a loop
    #[arg(short, long, conflicts_with_all = ["verse", "output"])]
    interactive: bool,

    /// API root URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    /// Arabic text only
    Arabic,
    /// Translation only
    Translation,
    /// Arabic text and translation
    Both,
}

impl From<FormatArg> for OutputMode {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Arabic => OutputMode::Arabic,
            FormatArg::Translation => OutputMode::Translation,
            FormatArg::Both => OutputMode::Both,
        }
    }
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    if cli.list_translations {
        return match list_translations(&mut std::io::stdout()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                report::report(&anyhow::Error::from(e));
                ExitCode::FAILURE
            }
        };
    }

    if cli.interactive {
        tracing::info!(base_url = %cli.base_url, "Starting interactive mode");
        let code = match run_interactive(cli.client_config()).await {
            Ok(()) => 0,
            Err(e) => {
                report::report(&e);
                1
            }
        };
        // The blocking stdin reader would otherwise keep the runtime alive
        // until another line arrives.
        std::process::exit(code);
    }

    let Some(verse) = cli.verse.as_deref() else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "the following arguments are required: <VERSE>",
            )
            .exit();
    };

    let mode = OutputMode::from(cli.format);
    let result = tokio::select! {
        result = run_once(verse, &cli.translation, mode, cli.output.as_deref(), cli.client_config()) => result,
        _ = shell::ctrl_c() => {
            eprintln!("\nOperation cancelled by user.");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report::report(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,hyper_util=info,rustls=info",
        LogLevel::Trace => "trace,hyper_util=info,rustls=info",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    // stdout carries the verse itself
    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}

fn list_translations(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Available translations:")?;
    for t in TranslationCatalog::all() {
        writeln!(out, "  - {} ({})", t.key, t.display_name)?;
    }
    Ok(())
}

/// Fetch one verse and print or save it.
async fn run_once(
    input: &str,
    translation: &str,
    mode: OutputMode,
    output: Option<&Path>,
    config: ClientConfig,
) -> Result<()> {
    let reference = ayah_validate::validate(input)?;
    let client = VerseClient::new(config)?;

    let translation = mode.includes_translation().then_some(translation);
    eprintln!("Fetching verse {reference}...");
    let outcome = client.fetch_verse(reference, translation).await?;
    for w in &outcome.warnings {
        eprintln!("Warning: {w}");
    }

    let text = ayah_render::format_verse(&outcome.record, mode);
    match output {
        Some(path) => {
            ayah_render::write_to_file(&text, path)?;
            eprintln!("Verse saved to '{}'", path.display());
        }
        None => println!("{text}"),
    }

    Ok(())
}

async fn run_interactive(config: ClientConfig) -> Result<()> {
    let client = VerseClient::new(config)?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut shell = shell::Shell::new(stdin, std::io::stdout(), client);
    shell.run().await
}
