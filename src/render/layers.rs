use kurbo::Shape as _;

use crate::foundation::core::{Line, Point, Rect};
use crate::foundation::error::AuditResult;
use crate::geometry::{GuideGeometry, LegendMetrics};
use crate::render::builtin_font;
use crate::render::font::{LegendFace, OutlineText, TextBrushRgba8};
use crate::render::surface::{layer_pixmap, pixmap_dims};
use crate::style::{GuideKind, Rgba8, StyleTable};

/// Flattening tolerance for arcs, in pixels.
const ARC_TOLERANCE: f64 = 0.1;

/// One drawable overlay layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// A single guide kind.
    Guide(GuideKind),
    /// Color key for every guide layer drawn before it.
    Legend,
}

/// One legend row: swatch color and label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegendEntry {
    /// Guide color (drawn opaque in the swatch).
    pub color: Rgba8,
    /// Label text.
    pub label: &'static str,
}

/// Legend entries for the guide layers in `layers`, in draw order, one per distinct kind.
pub fn legend_entries(style: &StyleTable, layers: &[Layer]) -> Vec<LegendEntry> {
    let mut out: Vec<LegendEntry> = Vec::new();
    let mut seen: Vec<GuideKind> = Vec::new();
    for layer in layers {
        let Layer::Guide(kind) = *layer else {
            continue;
        };
        if seen.contains(&kind) {
            continue;
        }
        seen.push(kind);
        out.push(LegendEntry {
            color: style.spec(kind).color,
            label: kind.label(),
        });
    }
    out
}

/// Paints guide layers for one image using a fixed style table and legend face.
pub struct LayerRenderer<'a> {
    style: &'a StyleTable,
    metrics: LegendMetrics,
    outline: Option<OutlineText>,
}

impl<'a> LayerRenderer<'a> {
    /// Renderer bound to `style` and `face`.
    ///
    /// An outline face that Parley cannot register degrades to the built-in bitmap face.
    pub fn new(style: &'a StyleTable, face: &LegendFace) -> Self {
        let outline = match face {
            LegendFace::Outline(f) => match OutlineText::new(f) {
                Ok(t) => Some(t),
                Err(e) => {
                    tracing::warn!(font = %f.origin, error = %e, "legend font unusable, using built-in face");
                    None
                }
            },
            LegendFace::BuiltIn => None,
        };
        Self {
            style,
            metrics: LegendMetrics::DEFAULT,
            outline,
        }
    }

    /// Override legend sizing.
    pub fn with_metrics(mut self, metrics: LegendMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Rasterize `layers`, in order, into a transparent premultiplied pixmap.
    #[tracing::instrument(skip(self, geom), fields(width = geom.size.width, height = geom.size.height))]
    pub fn render(
        &mut self,
        geom: &GuideGeometry,
        layers: &[Layer],
    ) -> AuditResult<vello_cpu::Pixmap> {
        let (w, h) = pixmap_dims(geom.size)?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        for (i, layer) in layers.iter().enumerate() {
            match *layer {
                Layer::Guide(kind) => self.draw_guide(&mut ctx, geom, kind),
                Layer::Legend => {
                    let entries = legend_entries(self.style, &layers[..i]);
                    self.draw_legend(&mut ctx, geom, &entries);
                }
            }
        }
        ctx.flush();
        let mut out = layer_pixmap(geom.size)?;
        ctx.render_to_pixmap(&mut out);
        Ok(out)
    }

    fn draw_guide(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        geom: &GuideGeometry,
        kind: GuideKind,
    ) {
        let spec = self.style.spec(kind);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(spec.color.to_cpu_color());

        if kind == GuideKind::Spiral {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(spec.stroke_width));
            for arc in &geom.spiral {
                ctx.stroke_path(&bezpath_to_cpu(&arc.to_arc().to_path(ARC_TOLERANCE)));
            }
            tracing::debug!(?kind, arcs = geom.spiral.len(), "drew guide");
            return;
        }

        let lines = geom.guide_lines(kind);
        ctx.set_stroke(butt_stroke(spec.stroke_width));
        for line in &lines {
            ctx.stroke_path(&line_to_cpu(*line));
        }
        tracing::debug!(?kind, lines = lines.len(), "drew guide");
    }

    fn draw_legend(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        geom: &GuideGeometry,
        entries: &[LegendEntry],
    ) {
        if entries.is_empty() {
            return;
        }
        let legend = self.style.legend;
        let bbox = self
            .metrics
            .place(geom.size.w(), geom.size.h(), entries.len());

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(legend.background.to_cpu_color());
        ctx.fill_rect(&rect_to_cpu(bbox));

        ctx.set_stroke(butt_stroke(legend.swatch_width));
        for (entry, row) in entries.iter().zip(self.metrics.rows(bbox, entries.len())) {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(entry.color.opaque().to_cpu_color());
            ctx.stroke_path(&line_to_cpu(row.swatch));
            self.draw_label(ctx, entry.label, row.label_origin, legend.text, legend.font_size_px);
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn draw_label(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: Point,
        color: Rgba8,
        size_px: f32,
    ) {
        if let Some(outline) = self.outline.as_mut() {
            let brush = TextBrushRgba8 {
                r: color.r,
                g: color.g,
                b: color.b,
                a: color.a,
            };
            match outline.layout_line(text, size_px, brush) {
                Ok(layout) => {
                    ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
                    for line in layout.lines() {
                        for item in line.items() {
                            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                                continue;
                            };
                            let brush = run.style().brush;
                            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                                brush.r, brush.g, brush.b, brush.a,
                            ));
                            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                                id: g.id,
                                x: g.x,
                                y: g.y,
                            });
                            ctx.glyph_run(outline.font())
                                .font_size(run.run().font_size())
                                .fill_glyphs(glyphs);
                        }
                    }
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, label = text, "legend label layout failed, using built-in face");
                }
            }
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color.to_cpu_color());
        for r in builtin_font::glyph_rects(text, origin, size_px) {
            ctx.fill_rect(&rect_to_cpu(r));
        }
    }
}

fn butt_stroke(width: f64) -> vello_cpu::kurbo::Stroke {
    vello_cpu::kurbo::Stroke::new(width).with_caps(vello_cpu::kurbo::Cap::Butt)
}

fn line_to_cpu(line: Line) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    out.move_to(vello_cpu::kurbo::Point::new(line.p0.x, line.p0.y));
    out.line_to(vello_cpu::kurbo::Point::new(line.p1.x, line.p1.y));
    out
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/layers.rs"]
mod tests;
