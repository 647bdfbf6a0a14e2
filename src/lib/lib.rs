//! The sysfonts library lists the fonts installed on the host and tells which of them are
//! fixed-pitch (monospace). It answers the `getSystemFonts` request of the
//! `com.example.f/fonts` method channel with a sorted, deduplicated list of
//! `{name, isMonospace}` records.
//!
//! Basic usage queries the system font database with the default classifier:
//! ```rust,no_run
//! use sysfonts::classify::Classifier;
//! use sysfonts::source::SystemFonts;
//!
//! let fonts = SystemFonts::load(&Default::default());
//! let query = sysfonts::list_system_fonts(&fonts, &Classifier::default(), &fonts);
//! for font in &query.fonts {
//!     println!("{} {}", font.name(), font.is_monospace());
//! }
//! ```
//!
//! The three stages can also be used on their own. The assembler accepts any list of names
//! and never fails:
//! ```rust
//! use sysfonts::classify::{Classifier, NoMetrics};
//!
//! let names = ["Arial", "Courier New", "Menlo", "Arial"].map(String::from);
//! let fonts = sysfonts::assemble(names, &Classifier::default(), &NoMetrics);
//! let names: Vec<_> = fonts.iter().map(|f| f.name()).collect();
//! assert_eq!(names, ["Arial", "Courier New", "Menlo"]);
//! assert!(!fonts[0].is_monospace());
//! assert!(fonts[1].is_monospace());
//! ```
//!
//! ## Query Flow
//! ```text
//! +---------------+     +--------------------+     +----------------+
//! | Font Source   |     | Classifier         |     | Assembler      |
//! | - fontdb      | --> | 1. name shortcut   | --> | - dedupe       |
//! | - static list |     | 2. glyph advances  |     | - sort by name |
//! | - common set  |     | 3. declared flag   |     | - FontInfo     |
//! +---------------+     | 4. name inference  |     +----------------+
//!                       +--------------------+
//! ```

pub mod assemble;
pub mod channel;
pub mod classify;
pub mod config;
pub mod source;

pub use assemble::{assemble, list_system_fonts, FontQuery};

use serde::Serialize;
use std::error::Error;
use std::fmt;

/// One installed font as reported to callers.
///
/// Serializes as `{"name": "...", "isMonospace": bool}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontInfo {
    name: String,
    is_monospace: bool,
}

impl FontInfo {
    pub fn new(name: impl Into<String>, is_monospace: bool) -> Self {
        FontInfo {
            name: name.into(),
            is_monospace,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_monospace(&self) -> bool {
        self.is_monospace
    }
}

/// Errors surfaced by the font listing pipeline.
///
/// The classifier and assembler never produce errors; only the font source and the
/// configuration loader can.
#[derive(Debug, Clone, PartialEq)]
pub enum FontsError {
    /// The host font registry could not be enumerated at all
    SourceUnavailable { detail: String },
    /// Indicates an invalid configuration
    ConfigError { message: String, suggestion: String },
}

impl Error for FontsError {}
impl fmt::Display for FontsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FontsError::SourceUnavailable { detail } => {
                write!(f, "failed to get system fonts: {}", detail)
            }
            FontsError::ConfigError {
                message,
                suggestion,
            } => {
                write!(f, "Configuration Error: {}", message)?;
                write!(f, "\nSuggestion: {}", suggestion)?;
                Ok(())
            }
        }
    }
}

impl FontsError {
    /// Creates a source error with just a detail message
    pub fn source_unavailable(detail: impl Into<String>) -> Self {
        FontsError::SourceUnavailable {
            detail: detail.into(),
        }
    }
}
