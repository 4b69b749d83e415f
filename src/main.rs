// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use uzmirror::app_config::{Config, LogLevel};
use uzmirror::app_controller::{Controller, RunOptions};
use uzmirror::providers::yandex::YandexTranslate;

/// Exit status when required credentials are missing
const EXIT_MISSING_CREDENTIALS: i32 = 2;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mirror a source site into its translated copy (default command)
    Mirror(MirrorArgs),

    /// Generate shell completions for uzmirror
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct MirrorArgs {
    /// Root directory of the source-language site
    #[arg(value_name = "SOURCE_ROOT")]
    source_root: PathBuf,

    /// Destination root for the mirror (default: <SOURCE_ROOT>/<target_subdir>)
    #[arg(short, long)]
    dest_root: Option<PathBuf>,

    /// Translation cache file (default: <SOURCE_ROOT>/.cache/<src>_<tgt>.json)
    #[arg(long)]
    cache_path: Option<PathBuf>,

    /// Glossary CSV file (default: <SOURCE_ROOT>/translate_glossary.csv)
    #[arg(short, long)]
    glossary_path: Option<PathBuf>,

    /// Report CSV file (default: <DEST_ROOT>/translation_report.csv)
    #[arg(long)]
    report_path: Option<PathBuf>,

    /// Also rewrite source pages in place with a switcher to the mirror
    #[arg(short, long)]
    modify_source: bool,

    /// Remove the destination root before mirroring
    #[arg(long)]
    clean: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Yandex Cloud API key
    #[arg(long, env = "YANDEX_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Yandex Cloud folder identifier
    #[arg(long, env = "YANDEX_FOLDER_ID")]
    folder_id: Option<String>,
}

/// uzmirror - static site translation mirror
///
/// Mirrors a static Russian-language HTML site into an Uzbek (Latin-script)
/// copy, translating visible text through Yandex Cloud Translate with
/// caching, glossary substitution, and reciprocal language links.
#[derive(Parser, Debug)]
#[command(name = "uzmirror")]
#[command(version = "0.2.0")]
#[command(about = "Static site translation mirror")]
#[command(long_about = "uzmirror walks a static HTML site and produces a translated mirror tree,
inserting reciprocal language-switcher links and hreflang metadata.

EXAMPLES:
    uzmirror ./www.example.ru                   # Mirror into ./www.example.ru/uz
    uzmirror -d ./out ./www.example.ru          # Mirror into ./out
    uzmirror -m ./www.example.ru                # Also add switchers to source pages
    uzmirror --clean ./www.example.ru           # Remove stale mirror output first
    uzmirror completions bash > uzmirror.bash   # Generate bash completions

CREDENTIALS:
    YANDEX_API_KEY and YANDEX_FOLDER_ID must be present in the environment
    (or passed via --api-key / --folder-id). The tool exits with status 2
    when they are missing.

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Root directory of the source-language site
    #[arg(value_name = "SOURCE_ROOT")]
    source_root: Option<PathBuf>,

    /// Destination root for the mirror (default: <SOURCE_ROOT>/<target_subdir>)
    #[arg(short, long)]
    dest_root: Option<PathBuf>,

    /// Translation cache file (default: <SOURCE_ROOT>/.cache/<src>_<tgt>.json)
    #[arg(long)]
    cache_path: Option<PathBuf>,

    /// Glossary CSV file (default: <SOURCE_ROOT>/translate_glossary.csv)
    #[arg(short, long)]
    glossary_path: Option<PathBuf>,

    /// Report CSV file (default: <DEST_ROOT>/translation_report.csv)
    #[arg(long)]
    report_path: Option<PathBuf>,

    /// Also rewrite source pages in place with a switcher to the mirror
    #[arg(short, long)]
    modify_source: bool,

    /// Remove the destination root before mirroring
    #[arg(long)]
    clean: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Yandex Cloud API key
    #[arg(long, env = "YANDEX_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Yandex Cloud folder identifier
    #[arg(long, env = "YANDEX_FOLDER_ID")]
    folder_id: Option<String>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}{}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "uzmirror", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Mirror(args)) => run_mirror(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let source_root = cli.source_root.ok_or_else(|| {
                anyhow::anyhow!("SOURCE_ROOT is required when no subcommand is specified")
            })?;

            let mirror_args = MirrorArgs {
                source_root,
                dest_root: cli.dest_root,
                cache_path: cli.cache_path,
                glossary_path: cli.glossary_path,
                report_path: cli.report_path,
                modify_source: cli.modify_source,
                clean: cli.clean,
                config_path: cli.config_path,
                log_level: cli.log_level,
                api_key: cli.api_key,
                folder_id: cli.folder_id,
            };
            run_mirror(mirror_args).await
        }
    }
}

async fn run_mirror(options: MirrorArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(cmd_log_level.clone().into()));
    }

    // Credentials are checked before any file I/O so a misconfigured run
    // cannot touch the tree
    let (api_key, folder_id) = match (&options.api_key, &options.folder_id) {
        (Some(key), Some(folder)) if !key.trim().is_empty() && !folder.trim().is_empty() => {
            (key.trim().to_string(), folder.trim().to_string())
        }
        _ => {
            error!(
                "YANDEX_API_KEY and YANDEX_FOLDER_ID are required in the environment \
                 (or via --api-key / --folder-id)"
            );
            std::process::exit(EXIT_MISSING_CREDENTIALS);
        }
    };

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config: Config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Update log level in config if specified via command line
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(level_filter(config.log_level));

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    let source_root = options.source_root.clone();
    let dest_root = options
        .dest_root
        .clone()
        .unwrap_or_else(|| source_root.join(&config.target_subdir));

    if dest_root.file_name().map(|n| n.to_string_lossy().to_string())
        != Some(config.target_subdir.clone())
    {
        warn!(
            "Destination directory {:?} differs from configured target_subdir '{}'; \
             source-page links will point at '{}/'",
            dest_root, config.target_subdir, config.target_subdir
        );
    }

    let cache_path = options.cache_path.clone().unwrap_or_else(|| {
        source_root.join(".cache").join(format!(
            "{}_{}.json",
            config.source_language, config.target_language
        ))
    });
    let glossary_path = options
        .glossary_path
        .clone()
        .unwrap_or_else(|| source_root.join("translate_glossary.csv"));
    let report_path = options
        .report_path
        .clone()
        .unwrap_or_else(|| dest_root.join("translation_report.csv"));

    let provider = YandexTranslate::new(
        api_key,
        folder_id,
        config.source_language.clone(),
        config.target_language.clone(),
        config.translation.timeout_secs,
    )
    .with_endpoint(config.translation.endpoint.clone());

    let mut controller = Controller::with_config(config, Arc::new(provider))?;
    let run_options = RunOptions {
        source_root,
        dest_root: dest_root.clone(),
        cache_path,
        glossary_path,
        report_path: report_path.clone(),
        modify_source: options.modify_source,
        clean: options.clean,
    };

    let summary = controller.run(&run_options).await?;

    info!("Translation complete. Output: {:?}", dest_root);
    info!("Report: {:?} ({} row(s))", report_path, summary.html_files + summary.pdf_extracted);

    Ok(())
}
