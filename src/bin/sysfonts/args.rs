/// Command-line argument parsing module
///
/// This module defines the CLI structure using clap with derive macros.
/// It supports:
/// - Standard verbosity flags: -v, -vv, -vvv
/// - Quiet flag: -q
/// - Verbose level flag: --verbose-level=LEVEL
/// - Environment variable RUST_LOG integration
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the font list is printed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `name<TAB>monospace|proportional` line per font
    #[default]
    Text,
    /// A JSON array of `{"name", "isMonospace"}` objects
    Json,
}

/// List installed system fonts and tell which ones are monospace
///
/// Without options the installed fonts are listed once, sorted by name. With --stdio the
/// tool answers `getSystemFonts` calls of the com.example.f/fonts channel, one method name
/// per input line and one JSON reply per output line.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct SysfontsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only print monospace fonts
    #[arg(long)]
    pub monospace_only: bool,

    /// Classify only the given font names (can be specified multiple times)
    #[arg(long = "check", value_name = "NAME")]
    pub check: Vec<String>,

    /// Report family names or PostScript face names
    #[arg(long, value_name = "MODE", value_parser = ["family", "postscript"])]
    pub naming: Option<String>,

    /// Extra font directory or font file to load (can be specified multiple times)
    #[arg(long = "font-path", value_name = "PATH")]
    pub font_paths: Vec<PathBuf>,

    /// Do not scan the platform font directories
    #[arg(long)]
    pub no_system: bool,

    /// Append the well-known font names of this platform
    #[arg(long)]
    pub include_common: bool,

    /// Classify by name only, without measuring glyphs
    #[arg(long)]
    pub no_measure: bool,

    /// Answer method-channel calls read from stdin
    #[arg(long, conflicts_with_all = ["check", "monospace_only"])]
    pub stdio: bool,

    /// Path to configuration file (TOML format). Auto-detects sysfontsrc.toml if not specified
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Print a default sysfontsrc.toml to stdout and exit
    #[arg(long)]
    pub get_default_configuration: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity level (suppress most output except errors)
    #[arg(short)]
    pub quiet: bool,

    /// Set explicit verbosity level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub verbose_level: Option<String>,
}

impl SysfontsArgs {
    /// Determine the effective log level based on CLI flags and environment variables
    ///
    /// Priority:
    /// 1. RUST_LOG environment variable (highest priority)
    /// 2. --verbose-level flag
    /// 3. Count of -v flags or -q flag (lowest priority)
    pub fn effective_log_level(&self) -> String {
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            return rust_log;
        }

        if let Some(level) = &self.verbose_level {
            return level.clone();
        }

        if self.quiet {
            return "error".to_string();
        }

        // Results go to stdout; keep stderr quiet unless asked
        match self.verbose {
            0 => "warn".to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }
}
