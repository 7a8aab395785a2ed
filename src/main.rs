// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use cuecodec::app_config::{self, Config};
use cuecodec::file_utils::{FileManager, VTT_EXTENSION};
use cuecodec::language_utils;
use cuecodec::validation::{MetadataValidator, slice_by_seq, sort_by_seq};
use cuecodec::{WebVttReader, WebVttWriter};

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
    /// Parse WebVTT captions and render them again
    Convert(ConvertArgs),

    /// Print the parsed caption model as JSON
    Inspect {
        /// Input WebVTT file
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Check sequenced metadata (Seq, game_id) carried in NOTE comments
    Validate {
        /// Input WebVTT file
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Keep only cues whose Seq lies in START..=END
        #[arg(long, num_args = 2, value_names = ["START", "END"], allow_negative_numbers = true)]
        range: Option<Vec<i64>>,
    },

    /// Generate shell completions for cuecodec
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input WebVTT file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file (single input) or directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Reject inverted cues and start times that go backwards
    #[arg(long)]
    strict: bool,

    /// Drop absolute positioning instead of converting it to percentages
    #[arg(long)]
    no_relativize: bool,

    /// Do not clamp positioning to the visible frame
    #[arg(long)]
    no_fit: bool,

    /// Video width in pixels
    #[arg(long)]
    video_width: Option<u32>,

    /// Video height in pixels
    #[arg(long)]
    video_height: Option<u32>,
}

/// cuecodec - WebVTT caption codec
///
/// Reads WebVTT caption files into a structured caption model and writes them back.
#[derive(Parser, Debug)]
#[command(name = "cuecodec")]
#[command(version)]
#[command(about = "WebVTT caption codec")]
#[command(long_about = "cuecodec parses WebVTT captions into a timing-indexed model and renders them back.

EXAMPLES:
    cuecodec convert talk.vtt                      # Re-render next to the input as talk.en-US.vtt
    cuecodec convert --strict -f talk.vtt          # Reject backwards timings, overwrite output
    cuecodec convert --video-width 1920 --video-height 1080 talk.vtt
    cuecodec convert /captions/ -o /out/           # Process every .vtt file in a directory
    cuecodec inspect talk.vtt                      # Dump the parsed model as JSON
    cuecodec validate --range 2 4 stream.vtt       # Check Seq/game_id metadata
    cuecodec completions bash > cuecodec.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Language tag of the captions (e.g. 'en', 'en-US', 'fr')
    #[arg(long, global = true)]
    language: Option<String>,
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

    // @returns: Tag and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "\x1B[1;31m"),
            Level::Warn => ("WARN ", "\x1B[1;33m"),
            Level::Info => ("INFO ", "\x1B[1;32m"),
            Level::Debug => ("DEBUG", "\x1B[1;36m"),
            Level::Trace => ("TRACE", "\x1B[1;35m"),
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
            let (tag, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Start at trace so the configured level can be applied later
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "cuecodec", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Convert(args) => run_convert(config, args),
        Commands::Inspect { input_path } => run_inspect(&config, &input_path),
        Commands::Validate { input_path, range } => run_validate(&config, &input_path, range.as_deref()),
        Commands::Completions { .. } => Ok(()),
    }
}

// @loads: Configuration file, creating a default one when missing
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = Path::new(&cli.config_path);

    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", cli.config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    // Override config with CLI options if provided
    if let Some(language) = &cli.language {
        config.language = language.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    log::set_max_level(config.log_level.to_level_filter());

    config.validate().context("Configuration validation failed")?;

    debug!(
        "Using language {} ({})",
        config.language,
        language_utils::get_language_name(&config.language).unwrap_or_else(|_| "unknown".to_string())
    );

    Ok(config)
}

fn run_convert(mut config: Config, args: ConvertArgs) -> Result<()> {
    if args.strict {
        config.reader.strict_timing = true;
    }
    if args.no_relativize {
        config.writer.relativize = false;
    }
    if args.no_fit {
        config.writer.fit_to_screen = false;
    }
    if args.video_width.is_some() {
        config.writer.video_width = args.video_width;
    }
    if args.video_height.is_some() {
        config.writer.video_height = args.video_height;
    }
    config.validate().context("Configuration validation failed")?;

    if args.input_path.is_file() {
        let output_file = match &args.output {
            Some(output) if output.is_dir() => {
                FileManager::generate_output_path(&args.input_path, output, &config.language, VTT_EXTENSION)
            }
            Some(output) => output.clone(),
            None => FileManager::generate_output_path(
                &args.input_path,
                args.input_path.parent().unwrap_or(Path::new(".")),
                &config.language,
                VTT_EXTENSION,
            ),
        };
        convert_file(&config, &args.input_path, &output_file, args.force_overwrite)?;
    } else if args.input_path.is_dir() {
        convert_folder(&config, &args)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}

// @converts: One WebVTT file into its re-rendered output
fn convert_file(config: &Config, input_file: &Path, output_file: &Path, force_overwrite: bool) -> Result<()> {
    if output_file.exists() && !force_overwrite {
        warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_file);
        return Ok(());
    }

    let reader = WebVttReader::with_config(config.reader.clone());
    let writer = WebVttWriter::with_config(config.writer.clone());

    let bytes = FileManager::read_bytes(input_file)?;
    let caption_set = reader
        .read_bytes(&bytes, &config.language)
        .with_context(|| format!("Failed to read captions from {:?}", input_file))?;
    let rendered = writer
        .write(&caption_set)
        .with_context(|| format!("Failed to render captions from {:?}", input_file))?;

    FileManager::write_to_file(output_file, &rendered)?;
    info!("Success: {:?}", output_file);

    Ok(())
}

// @converts: Every WebVTT file under a directory
fn convert_folder(config: &Config, args: &ConvertArgs) -> Result<()> {
    info!("Converting caption files in directory: {:?}", args.input_path);

    let files = FileManager::find_files(&args.input_path, VTT_EXTENSION)?;
    let mut processed_count = 0;

    for input_file in files {
        // Skip outputs of earlier runs
        if FileManager::is_generated_output(&input_file, &config.language) {
            debug!("Skipping previously generated file: {:?}", input_file);
            continue;
        }

        let output_dir = match &args.output {
            Some(output) => output.clone(),
            None => input_file.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };
        let output_file =
            FileManager::generate_output_path(&input_file, &output_dir, &config.language, VTT_EXTENSION);

        if let Err(e) = convert_file(config, &input_file, &output_file, args.force_overwrite) {
            error!("Error processing file {:?}: {:#}", input_file, e);
        } else {
            processed_count += 1;
        }
    }

    info!("Finished processing {} files", processed_count);
    Ok(())
}

fn run_inspect(config: &Config, input_path: &Path) -> Result<()> {
    let content = FileManager::read_to_string(input_path)?;
    let reader = WebVttReader::with_config(config.reader.clone());
    let caption_set = reader.read(&content, &config.language)?;

    let json = serde_json::to_string_pretty(&caption_set).context("Failed to serialize captions to JSON")?;
    println!("{}", json);
    Ok(())
}

fn run_validate(config: &Config, input_path: &Path, range: Option<&[i64]>) -> Result<()> {
    let content = FileManager::read_to_string(input_path)?;
    let validator = MetadataValidator::with_reader(WebVttReader::with_config(config.reader.clone()));
    let sequenced = validator.read(&content, &config.language)?;

    let selected = match range {
        Some([start, end]) => slice_by_seq(&sequenced, *start, *end),
        _ => sort_by_seq(&sequenced),
    };

    for entry in &selected {
        println!(
            "Seq {}\tgame_id {}\t{} --> {}\t{}",
            entry.seq,
            entry.game_id,
            entry.caption.format_start(),
            entry.caption.format_end(),
            entry.caption.text().replace('\n', " / ")
        );
    }
    info!("{} of {} cues valid and selected", selected.len(), sequenced.len());

    Ok(())
}
