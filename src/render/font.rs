use std::path::PathBuf;
use std::sync::Arc;

use crate::foundation::error::{AuditError, AuditResult};

/// Environment variable naming an extra font file tried before the defaults.
pub const FONT_ENV_VAR: &str = "VISAUDIT_FONT";

/// Default outline fonts probed after [`FONT_ENV_VAR`].
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

/// One place a legend font may come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontCandidate {
    /// A font file on disk.
    File(PathBuf),
    /// A font file named by an environment variable, read at probe time.
    EnvPath(String),
    /// The platform's default sans-serif family.
    SystemSansSerif,
    /// The embedded bitmap face. Always available.
    BuiltIn,
}

/// Parsed outline font bytes plus face index.
#[derive(Clone, Debug)]
pub struct OutlineFace {
    pub(crate) bytes: Arc<Vec<u8>>,
    pub(crate) index: u32,
    /// Where the face came from, for logs.
    pub origin: String,
}

/// The face the legend will be drawn with.
#[derive(Clone, Debug)]
pub enum LegendFace {
    /// Shaped with Parley, rasterized as glyph outlines.
    Outline(OutlineFace),
    /// Embedded 5x7 bitmap glyphs.
    BuiltIn,
}

impl LegendFace {
    /// Short description for logs and diagnostics.
    pub fn describe(&self) -> &str {
        match self {
            LegendFace::Outline(f) => &f.origin,
            LegendFace::BuiltIn => "built-in bitmap",
        }
    }
}

impl FontCandidate {
    /// Return the face this candidate provides, or `None` if it is unavailable or unparsable.
    pub fn probe(&self) -> Option<LegendFace> {
        match self {
            FontCandidate::File(path) => {
                let bytes = std::fs::read(path).ok()?;
                outline_from_bytes(bytes, path.display().to_string())
            }
            FontCandidate::EnvPath(var) => {
                let path = std::env::var_os(var).filter(|v| !v.is_empty())?;
                FontCandidate::File(PathBuf::from(path)).probe()
            }
            FontCandidate::SystemSansSerif => system_sans_serif(),
            FontCandidate::BuiltIn => Some(LegendFace::BuiltIn),
        }
    }
}

/// Ordered font lookup that always ends in [`FontCandidate::BuiltIn`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontChain {
    candidates: Vec<FontCandidate>,
}

impl Default for FontChain {
    fn default() -> Self {
        let mut candidates = vec![FontCandidate::EnvPath(FONT_ENV_VAR.to_owned())];
        candidates.extend(
            DEFAULT_FONT_PATHS
                .iter()
                .map(|p| FontCandidate::File(PathBuf::from(p))),
        );
        candidates.push(FontCandidate::SystemSansSerif);
        Self::new(candidates)
    }
}

impl FontChain {
    /// Build a chain from `candidates`, appending the built-in face if it is missing.
    pub fn new(candidates: Vec<FontCandidate>) -> Self {
        let mut candidates = candidates;
        candidates.retain(|c| *c != FontCandidate::BuiltIn);
        candidates.push(FontCandidate::BuiltIn);
        Self { candidates }
    }

    /// Chain that skips every outline font.
    pub fn builtin_only() -> Self {
        Self::new(Vec::new())
    }

    /// Try `path` before everything else in the chain.
    pub fn with_front(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidates.insert(0, FontCandidate::File(path.into()));
        self
    }

    /// Candidates in probe order.
    pub fn candidates(&self) -> &[FontCandidate] {
        &self.candidates
    }

    /// First candidate that probes successfully. Never fails.
    pub fn resolve(&self) -> LegendFace {
        for candidate in &self.candidates {
            if let Some(face) = candidate.probe() {
                tracing::debug!(face = face.describe(), "resolved legend font");
                return face;
            }
            tracing::debug!(?candidate, "legend font candidate unavailable");
        }
        LegendFace::BuiltIn
    }
}

fn outline_from_bytes(bytes: Vec<u8>, origin: String) -> Option<LegendFace> {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(bytes.clone());
    let index = db.faces().next()?.index;
    Some(LegendFace::Outline(OutlineFace {
        bytes: Arc::new(bytes),
        index,
        origin,
    }))
}

fn system_sans_serif() -> Option<LegendFace> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let query = usvg::fontdb::Query {
        families: &[usvg::fontdb::Family::SansSerif],
        ..Default::default()
    };
    let id = db.query(&query)?;
    let origin = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| format!("system:{name}")))
        .unwrap_or_else(|| "system:sans-serif".to_owned());
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    Some(LegendFace::Outline(OutlineFace {
        bytes: Arc::new(bytes),
        index,
        origin,
    }))
}

/// Parley shaping state bound to one outline face.
pub(crate) struct OutlineText {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl OutlineText {
    /// Register `face` with a fresh Parley font context.
    pub(crate) fn new(face: &OutlineFace) -> AuditResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            AuditError::render(format!("no font families registered from '{}'", face.origin))
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AuditError::render("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes.to_vec()),
            face.index,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font,
        })
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape a single unwrapped line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> AuditResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(AuditError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/font.rs"]
mod tests;
