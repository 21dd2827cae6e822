use crate::foundation::error::{AuditError, AuditResult};

pub use kurbo::{Line, Point, Rect};

/// Source image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Largest edge the CPU rasterizer accepts.
    pub const MAX_EDGE: u32 = u16::MAX as u32;

    /// Create a validated size: both edges in `1..=MAX_EDGE`.
    pub fn new(width: u32, height: u32) -> AuditResult<Self> {
        if width == 0 || height == 0 {
            return Err(AuditError::validation(format!(
                "image must be non-empty, got {width}x{height}"
            )));
        }
        if width > Self::MAX_EDGE || height > Self::MAX_EDGE {
            return Err(AuditError::validation(format!(
                "image {width}x{height} exceeds the {} px rasterizer limit",
                Self::MAX_EDGE
            )));
        }
        Ok(Self { width, height })
    }

    /// Width as a real-valued plane extent.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as a real-valued plane extent.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
