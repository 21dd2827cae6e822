#![forbid(unsafe_code)]
//! Composition audit overlays for page screenshots.
//!
//! A captured bitmap is copied once per output variant and overlaid with golden-ratio, rule of
//! thirds, center and golden-spiral guides plus a color legend. See [`Compositor`] for the
//! output set and [`PlaywrightCapture`] for obtaining the source bitmap.

pub mod capture;
pub mod compose;
pub mod foundation;
pub mod geometry;
pub mod render;
pub mod style;

pub use capture::{CaptureRequest, PlaywrightCapture};
pub use compose::{
    Compositor, ORIGINAL_NAME, OutputArtifact, OutputSet, OutputVariant, OverlayOpts,
};
pub use foundation::core::{ImageSize, Line, Point, Rect};
pub use foundation::error::{AuditError, AuditResult};
pub use geometry::{
    ArcSegment, AxisSplits, CenterLines, GoldenLines, GuideGeometry, LegendMetrics, LegendRow,
    PHI, center_lines, golden_ratio_lines, legend_box, legend_rows, spiral_arcs, thirds_lines,
};
pub use render::{FontCandidate, FontChain, Layer, LegendFace, OverlaySurface};
pub use style::{BUILTIN_STYLE, GuideKind, GuideSpec, LegendStyle, Rgba8, StyleTable};
