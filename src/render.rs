//! CPU rasterization of guide layers.
//!
//! Layers are vector-rasterized with `vello_cpu` into a transparent premultiplied pixmap and then
//! composited source-over onto an [`OverlaySurface`] copy of the source image. Nothing here reads
//! source pixels while drawing.

pub(crate) mod builtin_font;
pub mod font;
pub mod layers;
pub mod surface;

pub use font::{FontCandidate, FontChain, LegendFace, OutlineFace};
pub use layers::{Layer, LayerRenderer, LegendEntry, legend_entries};
pub use surface::OverlaySurface;
