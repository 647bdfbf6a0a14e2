/// Logging initialization module
///
/// Handles initialization of env_logger based on CLI arguments and environment variables.
/// The RUST_LOG environment variable takes precedence over CLI flags.
use crate::args::SysfontsArgs;
use env_logger::Builder;
use log::LevelFilter;

/// Initialize logging based on CLI arguments and environment variables
///
/// # Log Level Selection Priority
///
/// 1. RUST_LOG environment variable (highest priority)
/// 2. --verbose-level flag
/// 3. Count of -v flags (-v = info, -vv = debug, -vvv = trace)
/// 4. -q flag (quiet, only show errors)
/// 5. Default (warn level)
pub fn init_logging(args: &SysfontsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::new();

    let level_str = args.effective_log_level();
    match parse_level(&level_str) {
        Some(level) => {
            builder.filter_level(level);
        }
        None => {
            // RUST_LOG format with module names
            builder.parse_filters(&level_str);
        }
    }

    // Logs share the terminal with the font list; keep them short and on stderr
    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(buf, "[{}] {}", record.level(), record.args())
    });

    builder
        .try_init()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)?;

    Ok(())
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "trace" => Some(LevelFilter::Trace),
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" => Some(LevelFilter::Off),
        _ => None,
    }
}
