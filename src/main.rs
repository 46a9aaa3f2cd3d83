// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{error, warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use muilate::app_config::{self, Config, TranslationProvider};
use muilate::app_controller::Controller;
use muilate::errors::PipelineError;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Anthropic,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a .mui label file
    Translate {
        /// Input label file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory for the translated file and report (defaults to the input's directory)
        #[arg(short, long, value_name = "OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Force overwrite of an existing translated file
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// List the texts that would be translated, without translating them
    Extract {
        /// Input label file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Check whether the translation service is configured
    Check,

    /// Generate shell completions for muilate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct GlobalOptions {
    /// Translation provider to use
    #[arg(short, long, value_enum, global = true)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Source language code (e.g., 'en', 'de')
    #[arg(short, long, global = true)]
    source_language: Option<String>,

    /// Target language code (e.g., 'pl', 'fr')
    #[arg(short, long, global = true)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

/// muilate - label file translation with AI
///
/// Translates the user-visible labels of laser/CNC software .mui files
/// while leaving identifiers, numbers and the file structure untouched.
#[derive(Parser, Debug)]
#[command(name = "muilate")]
#[command(version)]
#[command(about = "AI-powered .mui label file translator")]
#[command(long_about = "muilate extracts the human-readable labels of a .mui file, translates them with an AI provider and writes the translated file next to a translation report.

EXAMPLES:
    muilate translate labels.mui                 # Translate using default config
    muilate translate -f labels.mui              # Overwrite an existing translation
    muilate translate -o out/ labels.mui         # Write results to out/
    muilate -s en -t de translate labels.mui     # Translate from English to German
    muilate extract labels.mui                   # Show what would be translated
    muilate check                                # Check the service configuration
    muilate completions bash > muilate.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. The API key may be left empty in the config and
    provided through ANTHROPIC_API_KEY or CLAUDE_API_KEY instead.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOptions,
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

    // @returns: ANSI colour for log level
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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // Level is lowered or raised once the config is loaded
    if CustomLogger::init(LevelFilter::Trace).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<PipelineError>() {
            Some(pipeline_error) => {
                error!("{}", pipeline_error.user_message());
                error!("Details: {}", pipeline_error);
            }
            None => error!("{:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "muilate", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.global.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let config = load_config(&cli.global)?;
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if cli.global.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Translate { input, output_dir, force_overwrite } => {
            controller.run(input, output_dir, force_overwrite).await?;
        }
        Commands::Extract { input } => {
            let nodes = controller.extract(&input)?;
            let mut stdout = std::io::stdout();
            for (index, node) in nodes.iter().enumerate() {
                writeln!(stdout, "{:>4}  {:<40}  {}", index + 1, node.path, node.original_text)?;
            }
        }
        Commands::Check => {
            let status = controller.check();
            info!("Provider: {}", status.provider);
            info!("Model: {}", status.model);
            if !status.endpoint.is_empty() {
                info!("Endpoint: {}", status.endpoint);
            }
            info!("Languages: {} -> {}", status.source_language, status.target_language);
            if status.configured {
                info!("Translation service is configured");
            } else {
                warn!("Translation service is not configured (missing API key)");
            }
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Load the config file, creating a default one when missing, then apply CLI overrides
fn load_config(options: &GlobalOptions) -> Result<Config> {
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
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

    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        config.translation.anthropic.model = model.clone();
    }

    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}
