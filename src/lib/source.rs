//! Font sources: where candidate font names come from.
//!
//! The system source is backed by [`fontdb`], which scans the platform font directories
//! (fontconfig directories on Linux, `/System/Library/Fonts` and friends on macOS,
//! `%WINDIR%\Fonts` on Windows). The same database resolves names back to faces so the
//! classifier can measure glyph advances through [`skrifa`].

use std::path::PathBuf;
use std::str::FromStr;

use fontdb::{Database, Family, Query, ID};
use log::{debug, info, warn};
use skrifa::instance::{LocationRef, Size};
use skrifa::{FontRef, MetadataProvider};

use crate::classify::{MetricHandle, MetricProvider};
use crate::FontsError;

/// Produces candidate font names. No ordering or uniqueness is guaranteed.
pub trait FontSource {
    fn enumerate(&self) -> Result<Vec<String>, FontsError>;
}

/// Which name of each face is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingMode {
    /// Family name of each face ("DejaVu Sans Mono")
    #[default]
    Family,
    /// PostScript name of each face ("DejaVuSansMono-Bold")
    PostScript,
}

impl FromStr for NamingMode {
    type Err = FontsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "family" => Ok(NamingMode::Family),
            "postscript" | "post-script" | "face" => Ok(NamingMode::PostScript),
            other => Err(FontsError::ConfigError {
                message: format!("unknown naming mode '{}'", other),
                suggestion: "Use \"family\" or \"postscript\"".to_string(),
            }),
        }
    }
}

impl NamingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingMode::Family => "family",
            NamingMode::PostScript => "postscript",
        }
    }
}

/// Configuration for building font sources.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub naming: NamingMode,
    /// Scan the platform font directories
    pub include_system: bool,
    /// Append the well-known names of the current platform
    pub include_common: bool,
    /// Extra font files or directories to load
    pub font_paths: Vec<PathBuf>,
    /// Extra names reported as-is
    pub extra_names: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            naming: NamingMode::Family,
            include_system: true,
            include_common: false,
            font_paths: Vec::new(),
            extra_names: Vec::new(),
        }
    }
}

/// Installed fonts, as seen through a `fontdb` database.
pub struct SystemFonts {
    db: Database,
    naming: NamingMode,
}

impl SystemFonts {
    /// Loads the platform fonts (unless disabled) and every configured extra path.
    pub fn load(config: &SourceConfig) -> Self {
        let mut db = Database::new();
        if config.include_system {
            db.load_system_fonts();
            debug!("Loaded {} system font faces", db.len());
        }

        for path in &config.font_paths {
            if path.is_dir() {
                db.load_fonts_dir(path);
            } else if let Err(e) = db.load_font_file(path) {
                warn!("Failed to load font file {:?}: {}", path, e);
            }
        }

        info!("Font database holds {} faces", db.len());
        SystemFonts {
            db,
            naming: config.naming,
        }
    }

    /// Wraps an existing database, e.g. one filled from memory.
    pub fn from_database(db: Database, naming: NamingMode) -> Self {
        SystemFonts { db, naming }
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    fn resolve(&self, name: &str) -> Option<ID> {
        let families = [Family::Name(name)];
        let query = Query {
            families: &families,
            ..Query::default()
        };
        self.db.query(&query).or_else(|| {
            self.db
                .faces()
                .find(|face| face.post_script_name == name)
                .map(|face| face.id)
        })
    }
}

impl FontSource for SystemFonts {
    fn enumerate(&self) -> Result<Vec<String>, FontsError> {
        if self.db.is_empty() {
            return Err(FontsError::source_unavailable(
                "no fonts found in the system font directories",
            ));
        }

        let names = self
            .db
            .faces()
            .filter_map(|face| match self.naming {
                NamingMode::Family => face.families.first().map(|(name, _)| name.clone()),
                NamingMode::PostScript => Some(face.post_script_name.clone()),
            })
            .collect::<Vec<_>>();
        debug!(
            "Enumerated {} {} names",
            names.len(),
            self.naming.as_str()
        );
        Ok(names)
    }
}

impl MetricProvider for SystemFonts {
    fn open(&self, name: &str) -> Option<Box<dyn MetricHandle + '_>> {
        let id = self.resolve(name)?;
        let declared = self.db.face(id)?.monospaced;
        Some(Box::new(FaceMetrics {
            db: &self.db,
            id,
            declared,
        }))
    }
}

/// A resolved face, measured straight from the database's face data.
pub struct FaceMetrics<'a> {
    db: &'a Database,
    id: ID,
    declared: bool,
}

impl FaceMetrics<'_> {
    /// Parses the face once and runs `f` on it, without copying the font bytes.
    fn with_font<T>(&self, f: impl FnOnce(&FontRef<'_>) -> Option<T>) -> Option<T> {
        self.db.with_face_data(self.id, |data, index| match FontRef::from_index(data, index) {
            Ok(font) => f(&font),
            Err(e) => {
                debug!("Unreadable face data (index {}): {:?}", index, e);
                None
            }
        })?
    }
}

impl MetricHandle for FaceMetrics<'_> {
    fn advance_width(&self, ch: char, size: f32) -> Option<f32> {
        self.advance_widths(&[ch], size)?.first().copied()
    }

    fn advance_widths(&self, chars: &[char], size: f32) -> Option<Vec<f32>> {
        self.with_font(|font| {
            let charmap = font.charmap();
            let metrics = font.glyph_metrics(Size::new(size), LocationRef::default());
            chars
                .iter()
                .map(|&ch| metrics.advance_width(charmap.map(ch)?))
                .collect()
        })
    }

    fn declared_fixed_pitch(&self) -> Option<bool> {
        Some(self.declared)
    }
}

/// A fixed list of names.
#[derive(Debug, Clone, Default)]
pub struct StaticFontSource {
    names: Vec<String>,
}

impl StaticFontSource {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StaticFontSource {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl FontSource for StaticFontSource {
    fn enumerate(&self) -> Result<Vec<String>, FontsError> {
        Ok(self.names.clone())
    }
}

/// Concatenates several sources. Fails only when every member fails.
#[derive(Default)]
pub struct ChainedSource<'a> {
    sources: Vec<&'a dyn FontSource>,
}

impl<'a> ChainedSource<'a> {
    pub fn new() -> Self {
        ChainedSource {
            sources: Vec::new(),
        }
    }

    pub fn with(mut self, source: &'a dyn FontSource) -> Self {
        self.sources.push(source);
        self
    }
}

impl FontSource for ChainedSource<'_> {
    fn enumerate(&self) -> Result<Vec<String>, FontsError> {
        let mut names = Vec::new();
        let mut first_error = None;
        let mut any_ok = false;

        for source in &self.sources {
            match source.enumerate() {
                Ok(found) => {
                    any_ok = true;
                    names.extend(found);
                }
                Err(e) => {
                    warn!("Font source failed: {}", e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) if !any_ok => Err(e),
            _ => Ok(names),
        }
    }
}

/// Well-known names of the current platform, reported whether or not they resolve.
pub fn common_font_names() -> Vec<&'static str> {
    if cfg!(target_os = "android") {
        vec![
            "Roboto", "sans-serif", "serif", "monospace", "Arial", "Helvetica",
            "Times New Roman", "Courier New", "Verdana", "Georgia", "Palatino", "Garamond",
            "Bookman", "Comic Sans MS", "Trebuchet MS", "Arial Black", "Impact",
            "Lucida Console", "Tahoma", "Courier", "sans-serif-light", "sans-serif-thin",
            "sans-serif-condensed", "sans-serif-medium", "sans-serif-black", "serif-monospace",
            "casual", "cursive", "fantasy",
        ]
    } else if cfg!(target_os = "macos") {
        vec![
            "System", "San Francisco", ".AppleSystemUIFont", "Helvetica", "Helvetica Neue",
            "Times", "Times New Roman", "Courier", "Courier New", "Arial", "Avenir", "Menlo",
            "Monaco", "Lucida Grande", "Geneva", "Verdana", "Georgia",
        ]
    } else if cfg!(target_os = "ios") {
        vec!["System", "San Francisco"]
    } else {
        vec!["sans-serif", "serif", "monospace"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unavailable;

    impl FontSource for Unavailable {
        fn enumerate(&self) -> Result<Vec<String>, FontsError> {
            Err(FontsError::source_unavailable("registry offline"))
        }
    }

    #[test]
    fn test_naming_mode_from_str() {
        assert_eq!("family".parse::<NamingMode>().unwrap(), NamingMode::Family);
        assert_eq!(
            "PostScript".parse::<NamingMode>().unwrap(),
            NamingMode::PostScript
        );
        assert!(matches!(
            "full".parse::<NamingMode>(),
            Err(FontsError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_static_source_keeps_duplicates_and_order() {
        let source = StaticFontSource::new(["b", "a", "b"]);
        assert_eq!(source.enumerate().unwrap(), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_empty_database_is_unavailable() {
        let fonts = SystemFonts::from_database(Database::new(), NamingMode::Family);
        assert_eq!(fonts.face_count(), 0);
        let err = fonts.enumerate().unwrap_err();
        assert!(matches!(err, FontsError::SourceUnavailable { .. }));
        assert!(fonts.open("Arial").is_none());
    }

    #[test]
    fn test_chained_source_tolerates_partial_failure() {
        let extra = StaticFontSource::new(["Menlo"]);
        let chain = ChainedSource::new().with(&Unavailable).with(&extra);
        assert_eq!(chain.enumerate().unwrap(), vec!["Menlo"]);
    }

    #[test]
    fn test_chained_source_fails_when_all_fail() {
        let chain = ChainedSource::new().with(&Unavailable).with(&Unavailable);
        assert_eq!(
            chain.enumerate().unwrap_err(),
            FontsError::source_unavailable("registry offline")
        );
    }

    #[test]
    fn test_empty_chain_is_empty() {
        assert!(ChainedSource::new().enumerate().unwrap().is_empty());
    }

    #[test]
    fn test_common_names_include_a_monospace_entry() {
        let names = common_font_names();
        assert!(!names.is_empty());
        assert!(names
            .iter()
            .any(|n| crate::classify::name_short_circuit(n) || *n == "Menlo"));
    }

    #[test]
    fn test_garbage_font_data_is_never_opened() {
        let mut db = Database::new();
        db.load_font_data(b"definitely not a font".to_vec());
        let fonts = SystemFonts::from_database(db, NamingMode::Family);
        assert_eq!(fonts.face_count(), 0);
        assert!(fonts.open("definitely").is_none());
    }

    #[test]
    fn test_missing_font_path_is_skipped() {
        let config = SourceConfig {
            include_system: false,
            font_paths: vec![PathBuf::from("/nonexistent/font.ttf")],
            ..Default::default()
        };
        let fonts = SystemFonts::load(&config);
        assert_eq!(fonts.face_count(), 0);
    }
}
