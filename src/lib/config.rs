//! Configuration module for the font sources and the classifier.
//!
//! Configuration is read from TOML. Every key is optional; missing or invalid values keep
//! their defaults.
//!
//! ```toml
//! [source]
//! naming = "family"        # "family" or "postscript"
//! include_system = true    # scan the platform font directories
//! include_common = false   # append well-known platform names
//! font_paths = ["~/fonts"] # extra font files or directories
//! extra_names = []         # names reported as-is
//!
//! [classifier]
//! measure = true           # measure glyph advances when a font resolves
//! tolerance = 0.1          # allowed width difference between probe glyphs
//! size = 12.0              # nominal measurement size
//! probe = "imW0"           # glyphs compared
//! extra_keywords = []      # more name keywords for the name inference tier
//! ```
//!
//! The binary looks for `--config FILE`, then `sysfontsrc.toml` in the current directory,
//! then `sysfonts/config.toml` in the user configuration directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use toml::Value;

use crate::classify::ClassifierConfig;
use crate::source::{NamingMode, SourceConfig};
use crate::FontsError;

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "sysfontsrc.toml";

/// Configuration source.
#[derive(Debug, Clone)]
pub enum ConfigSource<'a> {
    /// Use the built-in defaults
    Default,
    /// Load configuration from a file path
    File(&'a Path),
    /// Use a TOML string directly
    Embedded(&'a str),
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub source: SourceConfig,
    pub classifier: ClassifierConfig,
}

/// Path of the per-user configuration file, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sysfonts").join("config.toml"))
}

fn parse_string_list(value: Option<&Value>) -> Option<Vec<String>> {
    value.and_then(|v| v.as_array()).map(|items| {
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()
    })
}

/// Accepts both TOML floats and integers.
fn parse_number(value: Option<&Value>) -> Option<f32> {
    let value = value?;
    value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
        .map(|f| f as f32)
}

fn parse_source(value: Option<&Value>, default: SourceConfig) -> Result<SourceConfig, FontsError> {
    let mut config = default;
    let Some(section) = value else {
        return Ok(config);
    };

    if let Some(naming) = section.get("naming").and_then(|v| v.as_str()) {
        config.naming = naming.parse::<NamingMode>()?;
    }
    if let Some(flag) = section.get("include_system").and_then(|v| v.as_bool()) {
        config.include_system = flag;
    }
    if let Some(flag) = section.get("include_common").and_then(|v| v.as_bool()) {
        config.include_common = flag;
    }
    if let Some(paths) = parse_string_list(section.get("font_paths")) {
        config.font_paths = paths.iter().map(|p| expand_home(p)).collect();
    }
    if let Some(names) = parse_string_list(section.get("extra_names")) {
        config.extra_names = names;
    }
    Ok(config)
}

fn parse_classifier(value: Option<&Value>, default: ClassifierConfig) -> ClassifierConfig {
    let mut config = default;
    let Some(section) = value else {
        return config;
    };

    if let Some(flag) = section.get("measure").and_then(|v| v.as_bool()) {
        config.measure = flag;
    }
    if let Some(tolerance) = parse_number(section.get("tolerance")).filter(|t| *t >= 0.0) {
        config.tolerance = tolerance;
    }
    if let Some(size) = parse_number(section.get("size")).filter(|s| *s > 0.0) {
        config.size = size;
    }
    if let Some(probe) = section.get("probe").and_then(|v| v.as_str()) {
        if probe.chars().count() >= 2 {
            config.probe = probe.chars().collect();
        } else {
            warn!("Ignoring probe '{}': at least two glyphs are needed", probe);
        }
    }
    if let Some(keywords) = parse_string_list(section.get("extra_keywords")) {
        config.extra_keywords = keywords;
    }
    config
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Parses a TOML configuration string, failing on syntax errors and unknown naming modes.
pub fn try_parse_config_string(config_str: &str) -> Result<Config, FontsError> {
    let value: Value = toml::from_str(config_str).map_err(|e| FontsError::ConfigError {
        message: e.to_string(),
        suggestion: "Check the TOML syntax of the configuration file".to_string(),
    })?;

    let default = Config::default();
    Ok(Config {
        source: parse_source(value.get("source"), default.source)?,
        classifier: parse_classifier(value.get("classifier"), default.classifier),
    })
}

/// Parses a TOML configuration string, returning defaults when it is invalid.
///
/// # Example
/// ```rust
/// use sysfonts::config::parse_config_string;
/// use sysfonts::source::NamingMode;
///
/// let config = parse_config_string(r#"
/// [source]
/// naming = "postscript"
///
/// [classifier]
/// tolerance = 0.25
/// "#);
/// assert_eq!(config.source.naming, NamingMode::PostScript);
/// assert_eq!(config.classifier.tolerance, 0.25);
/// ```
pub fn parse_config_string(config_str: &str) -> Config {
    match try_parse_config_string(config_str) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}", e);
            Config::default()
        }
    }
}

/// Loads the configuration from `source`, falling back to defaults when a file is missing
/// or invalid.
pub fn load_config_from_source(source: ConfigSource) -> Config {
    match source {
        ConfigSource::Default => Config::default(),
        ConfigSource::File(path) => match fs::read_to_string(path) {
            Ok(s) => {
                debug!("Loaded configuration from {:?}", path);
                parse_config_string(&s)
            }
            Err(e) => {
                warn!("Could not read configuration {:?}: {}", path, e);
                Config::default()
            }
        },
        ConfigSource::Embedded(content) => parse_config_string(content),
    }
}

/// Renders the default configuration as TOML.
pub fn default_config_toml() -> String {
    let config = Config::default();
    let strings = |items: &[String]| {
        Value::Array(items.iter().cloned().map(Value::String).collect()).to_string()
    };
    let paths: Vec<String> = config
        .source
        .font_paths
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    let probe: String = config.classifier.probe.iter().collect();

    format!(
        "[source]\n\
         naming = \"{}\"\n\
         include_system = {}\n\
         include_common = {}\n\
         font_paths = {}\n\
         extra_names = {}\n\
         \n\
         [classifier]\n\
         measure = {}\n\
         tolerance = {:?}\n\
         size = {:?}\n\
         probe = {}\n\
         extra_keywords = {}\n",
        config.source.naming.as_str(),
        config.source.include_system,
        config.source.include_common,
        strings(&paths),
        strings(&config.source.extra_names),
        config.classifier.measure,
        config.classifier.tolerance,
        config.classifier.size,
        Value::String(probe),
        strings(&config.classifier.extra_keywords),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_round_trips() {
        let text = default_config_toml();
        assert!(text.contains("naming = \"family\""));
        assert!(text.contains("tolerance = 0.1"));
        assert!(text.contains("size = 12.0"));
        assert_eq!(try_parse_config_string(&text).unwrap(), Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = try_parse_config_string(
            r#"
            [source]
            naming = "postscript"
            include_system = false
            include_common = true
            font_paths = ["/opt/fonts", "/tmp/extra.ttf"]
            extra_names = ["System"]

            [classifier]
            measure = false
            tolerance = 0.5
            size = 16
            probe = "iW"
            extra_keywords = ["iosevka"]
            "#,
        )
        .unwrap();

        assert_eq!(config.source.naming, NamingMode::PostScript);
        assert!(!config.source.include_system);
        assert!(config.source.include_common);
        assert_eq!(
            config.source.font_paths,
            vec![PathBuf::from("/opt/fonts"), PathBuf::from("/tmp/extra.ttf")]
        );
        assert_eq!(config.source.extra_names, vec!["System"]);
        assert!(!config.classifier.measure);
        assert_eq!(config.classifier.tolerance, 0.5);
        assert_eq!(config.classifier.size, 16.0);
        assert_eq!(config.classifier.probe, vec!['i', 'W']);
        assert_eq!(config.classifier.extra_keywords, vec!["iosevka"]);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = try_parse_config_string("[classifier]\ntolerance = 0.2\n").unwrap();
        assert_eq!(config.classifier.tolerance, 0.2);
        assert_eq!(config.classifier.size, 12.0);
        assert_eq!(config.source, SourceConfig::default());
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = try_parse_config_string(
            r#"
            [classifier]
            tolerance = -1.0
            size = 0
            probe = "i"
            measure = "yes"
            "#,
        )
        .unwrap();
        assert_eq!(config.classifier, ClassifierConfig::default());
    }

    #[test]
    fn test_unknown_naming_mode_is_an_error() {
        let err = try_parse_config_string("[source]\nnaming = \"full\"\n").unwrap_err();
        assert!(matches!(err, FontsError::ConfigError { .. }));
        assert_eq!(
            parse_config_string("[source]\nnaming = \"full\"\n"),
            Config::default()
        );
    }

    #[test]
    fn test_invalid_toml_falls_back_to_defaults() {
        assert!(try_parse_config_string("[source\nnaming =").is_err());
        assert_eq!(parse_config_string("[source\nnaming ="), Config::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[source]\ninclude_common = true").unwrap();
        let config = load_config_from_source(ConfigSource::File(file.path()));
        assert!(config.source.include_common);
    }

    #[test]
    fn test_load_config_nonexistent_file() {
        let config = load_config_from_source(ConfigSource::File(Path::new("nonexistent.toml")));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_embedded() {
        let config = load_config_from_source(ConfigSource::Embedded(
            "[classifier]\nextra_keywords = [\"hack\"]\n",
        ));
        assert_eq!(config.classifier.extra_keywords, vec!["hack"]);
        assert_eq!(load_config_from_source(ConfigSource::Default), Config::default());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/fonts"), home.join("fonts"));
        }
    }

    #[test]
    fn test_user_config_path_ends_with_crate_dir() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("sysfonts/config.toml"));
        }
    }
}
