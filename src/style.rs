//! Fixed visual style for every guide layer and the legend.
//!
//! The built-in table is a `const`; an alternative table can be loaded from JSON once at startup
//! and is then passed by reference into the renderer. Nothing mutates a table after it is built.

pub mod color;

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{AuditError, AuditResult};

pub use color::Rgba8;

/// One kind of composition guide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideKind {
    /// Two φ-splits per axis.
    GoldenRatio,
    /// Two third-splits per axis.
    Thirds,
    /// Center cross.
    Center,
    /// Quarter-arc golden spiral approximation.
    Spiral,
}

impl GuideKind {
    /// All kinds in full-overlay z-order.
    pub const ALL: [GuideKind; 4] = [
        GuideKind::GoldenRatio,
        GuideKind::Thirds,
        GuideKind::Center,
        GuideKind::Spiral,
    ];

    /// Human-readable legend label.
    pub fn label(self) -> &'static str {
        match self {
            GuideKind::GoldenRatio => "Golden Ratio",
            GuideKind::Thirds => "Rule of Thirds",
            GuideKind::Center => "Center",
            GuideKind::Spiral => "Golden Spiral",
        }
    }
}

/// Color and stroke width for one guide kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuideSpec {
    /// Guide this spec styles.
    pub kind: GuideKind,
    /// Stroke color, straight alpha.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

/// Legend box styling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendStyle {
    /// Box fill.
    pub background: Rgba8,
    /// Label color.
    pub text: Rgba8,
    /// Label font size in pixels.
    pub font_size_px: f32,
    /// Swatch line width in pixels.
    pub swatch_width: f64,
}

/// Complete style table, one [`GuideSpec`] per [`GuideKind`] in [`GuideKind::ALL`] order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleTable {
    /// Guide specs indexed by z-order.
    pub guides: [GuideSpec; 4],
    /// Legend styling.
    pub legend: LegendStyle,
}

/// Built-in style: gold / blue / red / orange guides over a dark legend.
pub const BUILTIN_STYLE: StyleTable = StyleTable {
    guides: [
        GuideSpec {
            kind: GuideKind::GoldenRatio,
            color: Rgba8::new(255, 215, 0, 180),
            stroke_width: 2.0,
        },
        GuideSpec {
            kind: GuideKind::Thirds,
            color: Rgba8::new(0, 120, 255, 180),
            stroke_width: 2.0,
        },
        GuideSpec {
            kind: GuideKind::Center,
            color: Rgba8::new(255, 0, 0, 100),
            stroke_width: 1.0,
        },
        GuideSpec {
            kind: GuideKind::Spiral,
            color: Rgba8::new(255, 140, 0, 150),
            stroke_width: 3.0,
        },
    ],
    legend: LegendStyle {
        background: Rgba8::new(0, 0, 0, 180),
        text: Rgba8::new(255, 255, 255, 255),
        font_size_px: 12.0,
        swatch_width: 2.0,
    },
};

impl Default for StyleTable {
    fn default() -> Self {
        BUILTIN_STYLE
    }
}

impl StyleTable {
    /// Spec for `kind`.
    pub fn spec(&self, kind: GuideKind) -> &GuideSpec {
        // Discriminants follow `GuideKind::ALL`; `validate` checks slots agree.
        &self.guides[kind as usize]
    }

    /// Check slot order and that widths/sizes are usable.
    pub fn validate(&self) -> AuditResult<()> {
        for (slot, (spec, expected)) in self.guides.iter().zip(GuideKind::ALL).enumerate() {
            if spec.kind != expected {
                return Err(AuditError::validation(format!(
                    "style guides[{slot}] must be {expected:?}, found {:?}",
                    spec.kind
                )));
            }
            if !spec.stroke_width.is_finite() || spec.stroke_width <= 0.0 {
                return Err(AuditError::validation(format!(
                    "style for {expected:?} needs a finite stroke_width > 0"
                )));
            }
        }
        if !self.legend.font_size_px.is_finite() || self.legend.font_size_px <= 0.0 {
            return Err(AuditError::validation(
                "legend font_size_px must be finite and > 0",
            ));
        }
        if !self.legend.swatch_width.is_finite() || self.legend.swatch_width <= 0.0 {
            return Err(AuditError::validation(
                "legend swatch_width must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON style table.
    pub fn from_json_str(s: &str) -> AuditResult<Self> {
        let table: StyleTable =
            serde_json::from_str(s).map_err(|e| AuditError::serde(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    /// Read, parse and validate a JSON style table from disk.
    pub fn from_path(path: &Path) -> AuditResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read style table '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../tests/unit/style.rs"]
mod tests;
