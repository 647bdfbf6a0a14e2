use std::path::PathBuf;

use fontdb::{Database, Source};

const MONOSPACE_FONT_FILES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "C:\\Windows\\Fonts\\consola.ttf",
];

/// A monospace font file installed on this host, if there is one.
pub fn monospace_font_file() -> Option<PathBuf> {
    if let Some(path) = MONOSPACE_FONT_FILES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
    {
        return Some(path);
    }

    let mut db = Database::new();
    db.load_system_fonts();
    let found = db.faces().find_map(|face| match &face.source {
        Source::File(path)
            if face.monospaced && face.families.iter().any(|(name, _)| name.contains("Mono")) =>
        {
            Some(path.clone())
        }
        _ => None,
    });
    found
}
