//! Output-set orchestration: one geometry pass, then one independent copy per output variant.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::ImageSize;
use crate::foundation::error::{AuditError, AuditResult};
use crate::geometry::{GuideGeometry, LegendMetrics};
use crate::render::{FontChain, Layer, LayerRenderer, OverlaySurface};
use crate::style::{GuideKind, StyleTable};

/// Name of the unmodified source in the output set.
pub const ORIGINAL_NAME: &str = "original";

/// One overlay output: a file stem and the layers painted onto its copy, bottom to top.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutputVariant {
    /// File stem, e.g. `golden-ratio`.
    pub name: String,
    /// Layers in z-order.
    pub layers: Vec<Layer>,
}

impl OutputVariant {
    /// Build a variant.
    pub fn new(name: impl Into<String>, layers: Vec<Layer>) -> Self {
        Self {
            name: name.into(),
            layers,
        }
    }

    /// Golden-ratio lines only.
    pub fn golden_ratio() -> Self {
        Self::new("golden-ratio", vec![Layer::Guide(GuideKind::GoldenRatio)])
    }

    /// Every guide in z-order, legend on top.
    pub fn full_overlay() -> Self {
        let mut layers: Vec<Layer> = GuideKind::ALL.into_iter().map(Layer::Guide).collect();
        layers.push(Layer::Legend);
        Self::new("full-overlay", layers)
    }

    /// `golden-ratio` then `full-overlay`.
    pub fn default_plan() -> Vec<Self> {
        vec![Self::golden_ratio(), Self::full_overlay()]
    }
}

/// Compositor configuration.
#[derive(Clone, Debug)]
pub struct OverlayOpts {
    pub(crate) style: StyleTable,
    pub(crate) fonts: FontChain,
    pub(crate) format: image::ImageFormat,
    pub(crate) variants: Vec<OutputVariant>,
    pub(crate) legend_metrics: LegendMetrics,
}

impl Default for OverlayOpts {
    fn default() -> Self {
        Self {
            style: StyleTable::default(),
            fonts: FontChain::default(),
            format: image::ImageFormat::Png,
            variants: OutputVariant::default_plan(),
            legend_metrics: LegendMetrics::DEFAULT,
        }
    }
}

impl OverlayOpts {
    /// Replace the style table.
    pub fn with_style(mut self, style: StyleTable) -> Self {
        self.style = style;
        self
    }

    /// Replace the legend font chain.
    pub fn with_fonts(mut self, fonts: FontChain) -> Self {
        self.fonts = fonts;
        self
    }

    /// Output raster format. Must be able to store RGBA8.
    pub fn with_format(mut self, format: image::ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Replace the overlay variants written after `original`.
    pub fn with_variants(mut self, variants: Vec<OutputVariant>) -> Self {
        self.variants = variants;
        self
    }

    /// Replace legend box sizing and placement.
    pub fn with_legend_metrics(mut self, metrics: LegendMetrics) -> Self {
        self.legend_metrics = metrics;
        self
    }
}

/// One written file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputArtifact {
    /// Variant name (`original`, `golden-ratio`, ...).
    pub name: String,
    /// Path written.
    pub path: PathBuf,
}

/// Files written by one run, in creation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputSet {
    /// Artifacts in creation order.
    pub artifacts: Vec<OutputArtifact>,
}

impl OutputSet {
    /// Paths in creation order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.artifacts.iter().map(|a| a.path.clone()).collect()
    }

    /// Path of the artifact called `name`.
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.artifacts
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.path.as_path())
    }
}

/// Renders and persists the output set for a source image.
#[derive(Clone, Debug)]
pub struct Compositor {
    opts: OverlayOpts,
}

impl Compositor {
    /// Validate `opts` and build a compositor.
    pub fn new(opts: OverlayOpts) -> AuditResult<Self> {
        opts.style.validate()?;
        if !matches!(
            opts.format,
            image::ImageFormat::Png
                | image::ImageFormat::Tiff
                | image::ImageFormat::Bmp
                | image::ImageFormat::Qoi
                | image::ImageFormat::WebP
        ) {
            return Err(AuditError::validation(format!(
                "output format {:?} cannot store RGBA8",
                opts.format
            )));
        }

        let mut names: Vec<&str> = vec![ORIGINAL_NAME];
        for v in &opts.variants {
            if v.name.is_empty() || v.name.contains(['/', '\\']) {
                return Err(AuditError::validation(format!(
                    "invalid output name '{}'",
                    v.name
                )));
            }
            if names.contains(&v.name.as_str()) {
                return Err(AuditError::validation(format!(
                    "duplicate output name '{}'",
                    v.name
                )));
            }
            names.push(&v.name);
        }

        Ok(Self { opts })
    }

    /// Options in effect.
    pub fn opts(&self) -> &OverlayOpts {
        &self.opts
    }

    /// File extension for the configured format.
    pub fn extension(&self) -> &'static str {
        self.opts
            .format
            .extensions_str()
            .first()
            .copied()
            .unwrap_or("png")
    }

    /// Render every variant in memory, in plan order.
    ///
    /// Each variant starts from its own copy of `source`; `source` itself is never modified.
    #[tracing::instrument(skip(self, source), fields(width = source.width(), height = source.height()))]
    pub fn render_variants(
        &self,
        source: &image::RgbaImage,
    ) -> AuditResult<Vec<(String, image::RgbaImage)>> {
        let size = ImageSize::new(source.width(), source.height())?;
        let geom = GuideGeometry::compute(size);
        let face = self.opts.fonts.resolve();
        if matches!(face, crate::render::LegendFace::BuiltIn) {
            tracing::warn!("no outline font found, legend uses the built-in bitmap face");
        }
        let mut renderer =
            LayerRenderer::new(&self.opts.style, &face).with_metrics(self.opts.legend_metrics);

        let mut out = Vec::with_capacity(self.opts.variants.len());
        for variant in &self.opts.variants {
            let mut surface = OverlaySurface::from_image(source)?;
            let layer = renderer.render(&geom, &variant.layers)?;
            surface.composite(&layer)?;
            out.push((variant.name.clone(), surface.into_image()?));
            tracing::debug!(variant = %variant.name, layers = variant.layers.len(), "rendered variant");
        }
        Ok(out)
    }

    /// Write `original` followed by every rendered variant into `out_dir`.
    ///
    /// All variants are rendered before the first file is written. `out_dir` must exist.
    #[tracing::instrument(skip(self, source, out_dir), fields(out_dir = %out_dir.display()))]
    pub fn run(&self, source: &image::RgbaImage, out_dir: &Path) -> AuditResult<OutputSet> {
        let rendered = self.render_variants(source)?;

        let mut set = OutputSet::default();
        set.artifacts
            .push(self.write(ORIGINAL_NAME, source, out_dir)?);
        for (name, image) in &rendered {
            set.artifacts.push(self.write(name, image, out_dir)?);
        }
        Ok(set)
    }

    fn write(
        &self,
        name: &str,
        image: &image::RgbaImage,
        out_dir: &Path,
    ) -> AuditResult<OutputArtifact> {
        let path = out_dir.join(format!("{name}.{}", self.extension()));
        image::save_buffer_with_format(
            &path,
            image.as_raw(),
            image.width(),
            image.height(),
            image::ColorType::Rgba8,
            self.opts.format,
        )
        .with_context(|| format!("write {} '{}'", name, path.display()))?;
        tracing::info!(path = %path.display(), "wrote {name}");
        Ok(OutputArtifact {
            name: name.to_owned(),
            path,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/compose.rs"]
mod tests;
