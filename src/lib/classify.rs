//! Monospace classification.
//!
//! A font is classified by the strongest evidence available, falling back to weaker
//! evidence only when the stronger kind cannot be obtained:
//!
//! 1. Name short-circuit: names containing "mono" or "courier" (any case), or exactly
//!    "monospace", are monospace without any measurement.
//! 2. Glyph measurement: the advance widths of the probe glyphs (`i`, `m`, `W`, `0` by
//!    default) are measured at a nominal size; the font is monospace when every width is
//!    within the tolerance of the first one.
//! 3. Declared flag: a fixed-pitch flag set in the font itself marks it monospace. An
//!    unset flag proves nothing (many monospace fonts never set it) and falls through.
//! 4. Name inference: a wider keyword list ("console", "terminal", "code", ...).
//!
//! A measurement that shows differing widths is conclusive; a measurement that cannot be
//! taken (no live handle, unmapped probe glyph) moves on to the next tier.

use log::debug;

/// Keywords that mark a monospace font by name alone, before any measurement.
const SHORT_CIRCUIT_KEYWORDS: &[&str] = &["mono", "courier"];

/// Keywords used when no measurement is possible.
const INFERENCE_KEYWORDS: &[&str] = &[
    "mono", "courier", "console", "terminal", "code", "menlo", "consolas", "sarasa",
];

/// Generic family name that is monospace by definition.
const MONOSPACE_GENERIC: &str = "monospace";

pub const DEFAULT_TOLERANCE: f32 = 0.1;
pub const DEFAULT_SIZE: f32 = 12.0;
pub const DEFAULT_PROBE: &str = "imW0";

/// A live handle on a resolved font, able to report glyph metrics.
pub trait MetricHandle {
    /// Advance width of `ch` at `size` units, or `None` when the glyph is not mapped.
    fn advance_width(&self, ch: char, size: f32) -> Option<f32>;

    /// Advance widths of every char in `chars`, or `None` if any glyph is not mapped.
    ///
    /// Backends that pay a setup cost per lookup override this to measure in one pass.
    fn advance_widths(&self, chars: &[char], size: f32) -> Option<Vec<f32>> {
        chars.iter().map(|&ch| self.advance_width(ch, size)).collect()
    }

    /// The fixed-pitch flag declared by the font, when the backend exposes one.
    fn declared_fixed_pitch(&self) -> Option<bool> {
        None
    }
}

/// Resolves font names to live handles.
pub trait MetricProvider {
    fn open(&self, name: &str) -> Option<Box<dyn MetricHandle + '_>>;
}

/// Provider for headless contexts where no font can be measured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetrics;

impl MetricProvider for NoMetrics {
    fn open(&self, _name: &str) -> Option<Box<dyn MetricHandle + '_>> {
        None
    }
}

/// Which tier decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evidence {
    NameShortCircuit,
    Measured,
    Declared,
    NameInference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub is_monospace: bool,
    pub evidence: Evidence,
}

/// Tunables for the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Use live handles at all (glyph measurement and declared flag)
    pub measure: bool,
    /// Maximum allowed difference between probe glyph widths
    pub tolerance: f32,
    /// Nominal size the probe glyphs are measured at
    pub size: f32,
    /// Characters whose advance widths are compared
    pub probe: Vec<char>,
    /// Additional lowercase keywords for the name inference tier
    pub extra_keywords: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            measure: true,
            tolerance: DEFAULT_TOLERANCE,
            size: DEFAULT_SIZE,
            probe: DEFAULT_PROBE.chars().collect(),
            extra_keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        let mut config = config;
        config.extra_keywords = config
            .extra_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Classifier { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies `name`, using `handle` for the metric tiers when one is available.
    pub fn classify(&self, name: &str, handle: Option<&dyn MetricHandle>) -> Classification {
        if name_short_circuit(name) {
            return self.decided(name, true, Evidence::NameShortCircuit);
        }

        if let Some(handle) = handle.filter(|_| self.config.measure) {
            if let Some(fixed) = self.measure(handle) {
                return self.decided(name, fixed, Evidence::Measured);
            }
            if handle.declared_fixed_pitch() == Some(true) {
                return self.decided(name, true, Evidence::Declared);
            }
        }

        let inferred = self.infer_from_name(name);
        self.decided(name, inferred, Evidence::NameInference)
    }

    /// Compares the probe glyph widths. `None` when any of them cannot be measured.
    pub fn measure(&self, handle: &dyn MetricHandle) -> Option<bool> {
        let widths = handle.advance_widths(&self.config.probe, self.config.size)?;
        let first = *widths.first()?;
        Some(
            widths
                .iter()
                .all(|w| (w - first).abs() <= self.config.tolerance),
        )
    }

    /// The weakest tier: keyword matching on the lowercased name.
    pub fn infer_from_name(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        lower == MONOSPACE_GENERIC
            || INFERENCE_KEYWORDS.iter().any(|k| lower.contains(k))
            || self
                .config
                .extra_keywords
                .iter()
                .any(|k| lower.contains(k.as_str()))
    }

    fn decided(&self, name: &str, is_monospace: bool, evidence: Evidence) -> Classification {
        debug!("'{}' monospace={} ({:?})", name, is_monospace, evidence);
        Classification {
            is_monospace,
            evidence,
        }
    }
}

/// True for names that are monospace without measurement.
pub fn name_short_circuit(name: &str) -> bool {
    let lower = name.to_lowercase();
    name == MONOSPACE_GENERIC || SHORT_CIRCUIT_KEYWORDS.iter().any(|k| lower.contains(k))
}
