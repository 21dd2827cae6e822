//! Pure guide geometry derived from image dimensions.
//!
//! Everything here is a function of `(w, h)` only: no pixel data, no I/O. Coordinates are
//! real-valued and are not snapped to the pixel grid until the rasterizer strokes them.

use crate::foundation::core::{ImageSize, Line, Point, Rect};
use crate::style::GuideKind;

/// Golden ratio used for the φ-split guides.
pub const PHI: f64 = 1.6180339887;

/// Upper bound on quarter arcs emitted by [`spiral_arcs`].
pub const MAX_SPIRAL_ARCS: usize = 12;

/// φ-split positions, ascending on each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GoldenLines {
    /// Left vertical split (`w − w/φ`).
    pub vx1: f64,
    /// Right vertical split (`w/φ`).
    pub vx2: f64,
    /// Upper horizontal split (`h − h/φ`).
    pub hy1: f64,
    /// Lower horizontal split (`h/φ`).
    pub hy2: f64,
}

/// Two split positions per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisSplits {
    /// Vertical line x positions, ascending.
    pub xs: [f64; 2],
    /// Horizontal line y positions, ascending.
    pub ys: [f64; 2],
}

/// Center cross position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterLines {
    /// Vertical line x.
    pub x: f64,
    /// Horizontal line y.
    pub y: f64,
}

/// One quarter turn of the spiral.
///
/// Angles are in degrees, measured clockwise from the positive x axis in image space (y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
    /// Square the full circle of this arc is inscribed in.
    pub bounding_box: Rect,
    /// Start angle in degrees.
    pub start_angle: f64,
    /// End angle in degrees.
    pub end_angle: f64,
}

impl ArcSegment {
    /// The arc as a `kurbo` elliptical arc (circular, since the box is square).
    pub fn to_arc(&self) -> kurbo::Arc {
        let b = self.bounding_box;
        kurbo::Arc::new(
            b.center(),
            kurbo::Vec2::new(b.width() / 2.0, b.height() / 2.0),
            self.start_angle.to_radians(),
            (self.end_angle - self.start_angle).to_radians(),
            0.0,
        )
    }
}

/// `w/φ` and `w − w/φ` on each axis, ordered so `vx1 < vx2` and `hy1 < hy2`.
pub fn golden_ratio_lines(w: f64, h: f64) -> GoldenLines {
    let (vx1, vx2) = ordered(w - w / PHI, w / PHI);
    let (hy1, hy2) = ordered(h - h / PHI, h / PHI);
    GoldenLines { vx1, vx2, hy1, hy2 }
}

/// `{w/3, 2w/3}` and `{h/3, 2h/3}`.
pub fn thirds_lines(w: f64, h: f64) -> AxisSplits {
    AxisSplits {
        xs: [w / 3.0, 2.0 * w / 3.0],
        ys: [h / 3.0, 2.0 * h / 3.0],
    }
}

/// `x = w/2`, `y = h/2`.
pub fn center_lines(w: f64, h: f64) -> CenterLines {
    CenterLines {
        x: w / 2.0,
        y: h / 2.0,
    }
}

/// Nested quarter arcs approximating a golden spiral.
///
/// A working rectangle starts as the full image. Each step consumes a square of side
/// `min(rw, rh)` from it, emitting one arc of radius `side` whose corner sits in the phase's
/// corner (top-left, top-right, bottom-right, bottom-left). Only phases 0 and 1 move the
/// rectangle origin; phases 2 and 3 shrink the size alone. Stops early once `side < 1`.
pub fn spiral_arcs(w: f64, h: f64) -> Vec<ArcSegment> {
    let (mut x, mut y) = (0.0_f64, 0.0_f64);
    let (mut rw, mut rh) = (w, h);
    let mut out = Vec::with_capacity(MAX_SPIRAL_ARCS);

    for i in 0..MAX_SPIRAL_ARCS {
        let side = rw.min(rh);
        // NaN compares false everywhere, so reject it explicitly.
        if side.is_nan() || side < 1.0 {
            break;
        }
        let d = side * 2.0;

        let (bounding_box, start_angle, end_angle) = match i % 4 {
            0 => {
                let bbox = Rect::new(x, y, x + d, y + d);
                x += side;
                rw -= side;
                (bbox, 180.0, 270.0)
            }
            1 => {
                let bbox = Rect::new(x + rw - d, y, x + rw, y + d);
                y += side;
                rh -= side;
                (bbox, 270.0, 360.0)
            }
            2 => {
                let bbox = Rect::new(x + rw - d, y + rh - d, x + rw, y + rh);
                rw -= side;
                (bbox, 0.0, 90.0)
            }
            _ => {
                let bbox = Rect::new(x, y + rh - d, x + d, y + rh);
                rh -= side;
                (bbox, 90.0, 180.0)
            }
        };

        out.push(ArcSegment {
            bounding_box,
            start_angle,
            end_angle,
        });
    }

    out
}

/// Fixed legend sizing, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendMetrics {
    /// Vertical distance between entries.
    pub row_height: f64,
    /// Swatch line length.
    pub swatch_len: f64,
    /// Inner padding on every side.
    pub padding: f64,
    /// Space reserved for the label text.
    pub label_width: f64,
    /// Gap between the box and the image's bottom-right corner.
    pub margin: f64,
    /// Gap between swatch end and label start.
    pub label_gap: f64,
    /// Swatch line y offset from the row top.
    pub swatch_dy: f64,
    /// Label top y offset from the row top.
    pub label_dy: f64,
}

impl LegendMetrics {
    /// Default legend sizing.
    pub const DEFAULT: LegendMetrics = LegendMetrics {
        row_height: 18.0,
        swatch_len: 20.0,
        padding: 8.0,
        label_width: 120.0,
        margin: 10.0,
        label_gap: 6.0,
        swatch_dy: 7.0,
        label_dy: -1.0,
    };

    /// Box `(width, height)` for `entry_count` rows.
    pub fn box_size(&self, entry_count: usize) -> (f64, f64) {
        let w = self.swatch_len + self.padding + self.label_width;
        let h = entry_count as f64 * self.row_height + self.padding * 2.0;
        (w, h)
    }

    /// Box anchored `margin` px inside the bottom-right corner.
    ///
    /// For images too small to hold the box the origin is clamped to `(0, 0)` and the box
    /// overhangs the right/bottom edges; the rasterizer clips it.
    pub fn place(&self, w: f64, h: f64, entry_count: usize) -> Rect {
        let (bw, bh) = self.box_size(entry_count);
        let bx = (w - bw - self.margin).max(0.0);
        let by = (h - bh - self.margin).max(0.0);
        Rect::new(bx, by, bx + bw, by + bh)
    }

    /// Swatch segment and label origin of each row inside `legend`.
    pub fn rows(&self, legend: Rect, entry_count: usize) -> Vec<LegendRow> {
        let lx = legend.x0 + self.padding;
        (0..entry_count)
            .map(|i| {
                let ly = legend.y0 + self.padding + i as f64 * self.row_height;
                LegendRow {
                    swatch: Line::new(
                        (lx, ly + self.swatch_dy),
                        (lx + self.swatch_len, ly + self.swatch_dy),
                    ),
                    label_origin: Point::new(
                        lx + self.swatch_len + self.label_gap,
                        ly + self.label_dy,
                    ),
                }
            })
            .collect()
    }
}

impl Default for LegendMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Placement of one legend entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendRow {
    /// Color swatch segment.
    pub swatch: Line,
    /// Top-left of the label text.
    pub label_origin: Point,
}

/// Legend box for `entry_count` rows at default sizing.
pub fn legend_box(w: f64, h: f64, entry_count: usize) -> Rect {
    LegendMetrics::DEFAULT.place(w, h, entry_count)
}

/// Row layout inside a box from [`legend_box`] at default sizing.
pub fn legend_rows(legend: Rect, entry_count: usize) -> Vec<LegendRow> {
    LegendMetrics::DEFAULT.rows(legend, entry_count)
}

/// Every guide position for one image, computed once and shared by all output variants.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideGeometry {
    /// Dimensions the guides were derived from.
    pub size: ImageSize,
    /// φ splits.
    pub golden: GoldenLines,
    /// Third splits.
    pub thirds: AxisSplits,
    /// Center cross.
    pub center: CenterLines,
    /// Spiral quarter arcs.
    pub spiral: Vec<ArcSegment>,
}

impl GuideGeometry {
    /// Derive all guides from `size`.
    pub fn compute(size: ImageSize) -> Self {
        let (w, h) = (size.w(), size.h());
        let out = Self {
            size,
            golden: golden_ratio_lines(w, h),
            thirds: thirds_lines(w, h),
            center: center_lines(w, h),
            spiral: spiral_arcs(w, h),
        };
        tracing::debug!(
            width = size.width,
            height = size.height,
            arcs = out.spiral.len(),
            "computed guide geometry"
        );
        out
    }

    /// Full-span segments for a line-based guide.
    ///
    /// Verticals come first, then horizontals. An axis with extent `<= 1` px has no room for a
    /// split and contributes no lines. [`GuideKind::Spiral`] is arc-based and yields nothing.
    pub fn guide_lines(&self, kind: GuideKind) -> Vec<Line> {
        let (w, h) = (self.size.w(), self.size.h());
        let (xs, ys): (Vec<f64>, Vec<f64>) = match kind {
            GuideKind::GoldenRatio => (
                vec![self.golden.vx1, self.golden.vx2],
                vec![self.golden.hy1, self.golden.hy2],
            ),
            GuideKind::Thirds => (self.thirds.xs.to_vec(), self.thirds.ys.to_vec()),
            GuideKind::Center => (vec![self.center.x], vec![self.center.y]),
            GuideKind::Spiral => return Vec::new(),
        };

        let mut out = Vec::with_capacity(xs.len() + ys.len());
        if w > 1.0 {
            out.extend(xs.iter().map(|&x| Line::new((x, 0.0), (x, h))));
        }
        if h > 1.0 {
            out.extend(ys.iter().map(|&y| Line::new((0.0, y), (w, y))));
        }
        out
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
#[path = "../tests/unit/geometry.rs"]
mod tests;
