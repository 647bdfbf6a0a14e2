/// System font listing binary entry point
///
/// Lists the installed fonts with their monospace classification, or bridges the
/// `com.example.f/fonts` method channel over stdin/stdout.
///
/// # Examples
///
/// ```sh
/// sysfonts
/// sysfonts --format json --monospace-only
/// sysfonts --check "Courier New" --check Georgia
/// echo getSystemFonts | sysfonts --stdio
/// ```
use clap::Parser;
use log::{debug, error, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use sysfonts::channel::FontChannel;
use sysfonts::classify::{Classifier, MetricProvider, NoMetrics};
use sysfonts::config::{self, Config, ConfigSource};
use sysfonts::source::{common_font_names, ChainedSource, StaticFontSource, SystemFonts};
use sysfonts::{FontInfo, FontQuery, FontsError};

mod args;
mod logging;

use args::{OutputFormat, SysfontsArgs};
use logging::init_logging;

#[derive(Debug)]
enum AppError {
    OutputError(io::Error),
    ConfigError(FontsError),
    SourceUnavailable(FontsError),
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::OutputError(e)
    }
}

fn main() {
    let args = SysfontsArgs::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    debug!("Parsed arguments: {:?}", args);

    if args.get_default_configuration {
        print!("{}", config::default_config_toml());
        process::exit(0);
    }

    if let Err(e) = run(&args) {
        match e {
            AppError::OutputError(e) => error!("[X] Output error: {}", e),
            AppError::ConfigError(e) => error!("[X] {}", e),
            AppError::SourceUnavailable(e) => error!("[X] {}", e),
        }
        process::exit(1);
    }
}

/// Picks the configuration file.
///
/// Priority order:
/// 1. `--config FILE`
/// 2. `sysfontsrc.toml` in the current directory
/// 3. `sysfonts/config.toml` in the user configuration directory
fn get_config_path(args: &SysfontsArgs) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(path.clone());
    }

    let local = Path::new(config::LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local.to_path_buf());
    }

    config::user_config_path().filter(|p| p.exists())
}

fn load_config(args: &SysfontsArgs) -> Result<Config, AppError> {
    let path = get_config_path(args);
    let source = match &path {
        Some(p) => {
            info!("Using configuration {:?}", p);
            ConfigSource::File(p)
        }
        None => ConfigSource::Default,
    };

    let mut config = config::load_config_from_source(source);
    apply_overrides(&mut config, args)?;
    Ok(config)
}

/// CLI flags win over the configuration file.
fn apply_overrides(config: &mut Config, args: &SysfontsArgs) -> Result<(), AppError> {
    if let Some(naming) = &args.naming {
        config.source.naming = naming.parse().map_err(AppError::ConfigError)?;
    }
    if args.no_system {
        config.source.include_system = false;
    }
    if args.include_common {
        config.source.include_common = true;
    }
    config
        .source
        .font_paths
        .extend(args.font_paths.iter().cloned());
    if args.no_measure {
        config.classifier.measure = false;
    }
    Ok(())
}

/// Runs one query against freshly loaded sources, so every call sees the fonts installed
/// at that moment.
fn query_fonts(args: &SysfontsArgs, config: &Config, classifier: &Classifier) -> FontQuery {
    let uses_database = config.source.include_system || !config.source.font_paths.is_empty();
    // Loads nothing when the system scan is off and no extra paths are given
    let system = SystemFonts::load(&config.source);
    let provider: &dyn MetricProvider = if config.classifier.measure && uses_database {
        &system
    } else {
        &NoMetrics
    };

    let checked = StaticFontSource::new(args.check.iter().cloned());
    let extras = StaticFontSource::new(config.source.extra_names.iter().cloned());
    let common = StaticFontSource::new(if config.source.include_common {
        common_font_names()
    } else {
        Vec::new()
    });

    // Empty static lists stay out of the chain so an unreadable font registry still
    // surfaces as a failure
    let mut source = ChainedSource::new();
    if !args.check.is_empty() {
        source = source.with(&checked);
    } else {
        if uses_database {
            source = source.with(&system);
        }
        if !config.source.extra_names.is_empty() {
            source = source.with(&extras);
        }
        if config.source.include_common {
            source = source.with(&common);
        }
    }

    sysfonts::list_system_fonts(&source, classifier, provider)
}

fn run(args: &SysfontsArgs) -> Result<(), AppError> {
    let config = load_config(args)?;
    let classifier = Classifier::new(config.classifier.clone());

    if args.stdio {
        let channel = FontChannel::from_fn(|| query_fonts(args, &config, &classifier));
        info!("Serving {} on stdin/stdout", channel.name());
        let answered = channel.serve(io::stdin().lock(), io::stdout().lock())?;
        info!("Answered {} calls", answered);
        return Ok(());
    }

    let query = query_fonts(args, &config, &classifier);
    let fonts: Vec<&FontInfo> = query
        .fonts
        .iter()
        .filter(|f| !args.monospace_only || f.is_monospace())
        .collect();

    let stdout = io::stdout();
    write_fonts(&mut stdout.lock(), &fonts, args.format)?;

    match query.error {
        Some(e) => Err(AppError::SourceUnavailable(e)),
        None => Ok(()),
    }
}

fn write_fonts<W: Write>(out: &mut W, fonts: &[&FontInfo], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for font in fonts {
                let kind = if font.is_monospace() {
                    "monospace"
                } else {
                    "proportional"
                };
                writeln!(out, "{}\t{}", font.name(), kind)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, fonts)?;
            writeln!(out)?;
        }
    }
    out.flush()
}
