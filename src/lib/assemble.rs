//! Result assembly: dedupe, classify and sort candidate names.

use std::collections::HashSet;

use log::{info, warn};

use crate::classify::{Classifier, MetricProvider};
use crate::source::FontSource;
use crate::{FontInfo, FontsError};

/// Outcome of a full query.
///
/// A failing font source still yields a valid (empty) font list; the failure is carried
/// alongside so callers can report it.
#[derive(Debug, Clone, PartialEq)]
pub struct FontQuery {
    pub fonts: Vec<FontInfo>,
    pub error: Option<FontsError>,
}

impl FontQuery {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Vec<FontInfo>, FontsError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.fonts),
        }
    }
}

/// Turns candidate names into a sorted, deduplicated list of classified fonts.
///
/// Blank names are dropped and the first occurrence of each name wins. Never fails: any
/// font that cannot be measured is classified by name.
pub fn assemble<I>(names: I, classifier: &Classifier, provider: &dyn MetricProvider) -> Vec<FontInfo>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut fonts = Vec::new();

    for name in names {
        if name.trim().is_empty() || seen.contains(&name) {
            continue;
        }

        let handle = provider.open(&name);
        let classification = classifier.classify(&name, handle.as_deref());
        seen.insert(name.clone());
        fonts.push(FontInfo::new(name, classification.is_monospace));
    }

    fonts.sort_by(|a, b| a.name().cmp(b.name()));
    fonts
}

/// Enumerates `source` and assembles the result.
pub fn list_system_fonts(
    source: &dyn FontSource,
    classifier: &Classifier,
    provider: &dyn MetricProvider,
) -> FontQuery {
    match source.enumerate() {
        Ok(names) => {
            let fonts = assemble(names, classifier, provider);
            info!(
                "Listed {} fonts ({} monospace)",
                fonts.len(),
                fonts.iter().filter(|f| f.is_monospace()).count()
            );
            FontQuery { fonts, error: None }
        }
        Err(e) => {
            warn!("{}", e);
            FontQuery {
                fonts: Vec::new(),
                error: Some(e),
            }
        }
    }
}
