use crate::foundation::core::ImageSize;
use crate::foundation::error::{AuditError, AuditResult};
use crate::foundation::math::{mul_div255_u8, unpremul_u8};

/// Straight-alpha RGBA8 copy of a source image that guide layers are composited onto.
///
/// Only pixels a layer covers are converted to premultiplied form, blended and converted back;
/// every other pixel keeps the source bytes exactly. Every surface owns its pixels, so two
/// surfaces made from the same source never alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlaySurface {
    size: ImageSize,
    image: image::RgbaImage,
}

impl OverlaySurface {
    /// Copy `image`.
    pub fn from_image(image: &image::RgbaImage) -> AuditResult<Self> {
        let (w, h) = image.dimensions();
        let size = ImageSize::new(w, h)?;
        Ok(Self {
            size,
            image: image.clone(),
        })
    }

    /// Surface dimensions.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Source-over a rendered premultiplied layer onto this surface.
    pub fn composite(&mut self, layer: &vello_cpu::Pixmap) -> AuditResult<()> {
        if u32::from(layer.width()) != self.size.width
            || u32::from(layer.height()) != self.size.height
        {
            return Err(AuditError::render(format!(
                "layer is {}x{}, surface is {}x{}",
                layer.width(),
                layer.height(),
                self.size.width,
                self.size.height
            )));
        }
        straight_over_in_place(&mut self.image, layer.data_as_u8_slice())
    }

    /// The composited straight-alpha image.
    pub fn into_image(self) -> AuditResult<image::RgbaImage> {
        Ok(self.image)
    }
}

/// Transparent pixmap matching `size`.
pub(crate) fn layer_pixmap(size: ImageSize) -> AuditResult<vello_cpu::Pixmap> {
    let (w, h) = pixmap_dims(size)?;
    Ok(vello_cpu::Pixmap::new(w, h))
}

pub(crate) fn pixmap_dims(size: ImageSize) -> AuditResult<(u16, u16)> {
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| AuditError::render("pixmap width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| AuditError::render("pixmap height exceeds u16"))?;
    Ok((w, h))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        px[0] = mul_div255_u8(u16::from(px[0]), a);
        px[1] = mul_div255_u8(u16::from(px[1]), a);
        px[2] = mul_div255_u8(u16::from(px[2]), a);
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        if a == 255 {
            continue;
        }
        px[0] = unpremul_u8(px[0], a);
        px[1] = unpremul_u8(px[1], a);
        px[2] = unpremul_u8(px[2], a);
    }
}

/// Blend premultiplied `src` over straight-alpha `dst`, touching only pixels with `src` alpha > 0.
pub(crate) fn straight_over_in_place(
    dst: &mut image::RgbaImage,
    src: &[u8],
) -> AuditResult<()> {
    if dst.as_raw().len() != src.len() {
        return Err(AuditError::render(
            "straight_over_in_place expects a layer matching the image",
        ));
    }
    for (d, s) in dst.pixels_mut().zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let mut px = d.0;
        premultiply_rgba8_in_place(&mut px);
        premul_over_px(&mut px, s);
        unpremultiply_rgba8_in_place(&mut px);
        d.0 = px;
    }
    Ok(())
}

fn premul_over_px(d: &mut [u8], s: &[u8]) {
    let sa = u16::from(s[3]);
    if sa == 0 {
        return;
    }
    let inv = 255u16 - sa;
    d[3] = s[3].saturating_add(mul_div255_u8(u16::from(d[3]), inv));
    for c in 0..3 {
        let dc = mul_div255_u8(u16::from(d[c]), inv);
        d[c] = s[c].saturating_add(dc);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
