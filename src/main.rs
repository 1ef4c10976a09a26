// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use cinema_family::app_config::{self, Config};
use cinema_family::file_utils::{ElementKind, FileManager, FileSystemElement};
use cinema_family::path_id;
use cinema_family::{ConversionPipeline, Controller};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Convert an SRT subtitle file to WebVTT
    Convert {
        /// SRT file to convert
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (defaults to INPUT with a .vtt extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write to stdout instead of a file
        #[arg(long)]
        stdout: bool,

        /// Force overwrite of an existing output file
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// List a folder the way the library shows it
    List {
        /// Folder to list (defaults to the configured root directory)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Show the subtitle files that belong to a video
    Subtitles {
        /// Identifier of the video
        #[arg(value_name = "VIDEO_ID")]
        video_id: String,
    },

    /// Print an opaque identifier for a path
    EncodeId {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Print the path behind an identifier
    DecodeId {
        #[arg(value_name = "TOKEN")]
        token: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// cinema-family - browse a media folder and serve subtitles as WebVTT
#[derive(Parser, Debug)]
#[command(name = "cinema-family")]
#[command(version)]
#[command(about = "Media library tools: SRT to WebVTT, natural listings, path identifiers")]
#[command(long_about = "Command line front end of the cinema-family media library.

EXAMPLES:
    cinema-family convert movie.srt                 # Writes movie.vtt
    cinema-family convert movie.srt --stdout        # Print WebVTT
    cinema-family list /media/films                 # Folders first, natural order
    cinema-family subtitles <VIDEO_ID>              # Subtitles next to a video
    cinema-family encode-id /media/films/a.mkv      # Mint an identifier
    cinema-family decode-id <TOKEN>                 # Resolve an identifier

CONFIGURATION:
    Configuration is read from conf.json by default. A missing file means
    built-in defaults.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
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
        log::set_boxed_logger(Box::new(CustomLogger::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
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
            let (colour, tag) = Self::style_for_level(record.level());

            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                colour,
                now,
                tag,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Install the logger with the most verbose filter; the effective level
    // is applied through set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "cinema-family", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_default(&cli.config_path)?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Convert {
            input,
            output,
            stdout,
            force_overwrite,
        } => run_convert(&config, &input, output, stdout, force_overwrite),
        Commands::List { dir } => run_list(config, dir),
        Commands::Subtitles { video_id } => run_subtitles(config, &video_id),
        Commands::EncodeId { path } => {
            let controller = Controller::with_config(config)?;
            println!("{}", controller.codec().encode(&path));
            Ok(())
        }
        Commands::DecodeId { token } => {
            let path = path_id::decode(&token)?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Completions { .. } => unreachable!("handled before config loading"),
    }
}

fn run_convert(
    config: &Config,
    input: &Path,
    output: Option<PathBuf>,
    to_stdout: bool,
    force_overwrite: bool,
) -> Result<()> {
    let raw = FileManager::read_bytes(input)?;
    let pipeline = ConversionPipeline::new(config.subtitles.detector(), config.subtitles.vtt_options());
    let vtt = pipeline
        .convert(&raw)
        .with_context(|| format!("Failed to convert {:?}", input))?;

    if to_stdout {
        std::io::stdout().write_all(&vtt)?;
        return Ok(());
    }

    let output = output.unwrap_or_else(|| input.with_extension("vtt"));
    if output.exists() && !force_overwrite {
        warn!("Output file already exists: {:?}. Use -f to force overwrite.", output);
        return Err(anyhow!("Refusing to overwrite {:?}", output));
    }

    std::fs::write(&output, &vtt).with_context(|| format!("Failed to write {:?}", output))?;
    info!("Success: {:?}", output);
    Ok(())
}

fn run_list(config: Config, dir: Option<PathBuf>) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let elements = match dir {
        Some(dir) => controller.list_directory(&dir)?,
        None => controller.root_listing()?,
    };

    if elements.is_empty() {
        info!("Folder is empty");
    }
    for element in &elements {
        print_element(element);
    }
    Ok(())
}

fn run_subtitles(config: Config, video_id: &str) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let subtitles = controller.video_subtitles(video_id)?;

    if subtitles.is_empty() {
        info!("No subtitles found for {}", controller.display_name(video_id)?);
    }
    for subtitle in &subtitles {
        print_element(subtitle);
    }
    Ok(())
}

fn print_element(element: &FileSystemElement) {
    let detail = match &element.kind {
        ElementKind::Folder => String::new(),
        ElementKind::VideoFile { poster } => match poster {
            Some(bytes) => format!(" (poster, {} bytes)", bytes.len()),
            None => String::new(),
        },
        ElementKind::SubtitleFile {
            language_id,
            language_name,
        } => format!(" [{}: {}]", language_id, language_name),
    };

    println!("{:<8} {}{}\t{}", element.kind_label(), element.name, detail, element.id);
}
