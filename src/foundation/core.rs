use crate::foundation::error::{ScrollSeqError, ScrollSeqResult};

pub use kurbo::Rect;

/// 0-based slot index into a frame sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub usize);

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pixel dimensions of a frame or render surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Create a validated size with both dimensions non-zero.
    pub fn new(width: u32, height: u32) -> ScrollSeqResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScrollSeqError::validation(format!(
                "pixel size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Viewport dimensions relevant to scroll mapping.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Visible height in CSS-like pixels.
    pub height: f64,
}

/// Tracked element bounds (viewport-relative) plus the viewport they were measured in.
///
/// Only the vertical extent of `element` drives scroll mapping: `y0` is the element's top and
/// `y1` its bottom, both relative to the viewport's top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Element bounding box.
    pub element: Rect,
    /// Viewport the box was measured against.
    pub viewport: Viewport,
}

impl Geometry {
    /// Build geometry from a full element box.
    pub fn new(element: Rect, viewport_height: f64) -> Self {
        Self {
            element,
            viewport: Viewport {
                height: viewport_height,
            },
        }
    }

    /// Build geometry for a unit-wide element spanning `top..bottom`.
    pub fn vertical(top: f64, bottom: f64, viewport_height: f64) -> Self {
        Self::new(Rect::new(0.0, top, 1.0, bottom), viewport_height)
    }

    /// Element top edge.
    pub fn top(&self) -> f64 {
        self.element.y0
    }

    /// Element bottom edge.
    pub fn bottom(&self) -> f64 {
        self.element.y1
    }

    /// Element height (`bottom - top`).
    pub fn element_height(&self) -> f64 {
        self.element.y1 - self.element.y0
    }

    /// `false` for zero-area or non-finite boxes, or an empty viewport.
    ///
    /// Hosts report a detached element as a zero box; callers treat unavailable geometry as
    /// "no update".
    pub fn is_available(&self) -> bool {
        let r = self.element;
        let finite = [r.x0, r.y0, r.x1, r.y1, self.viewport.height]
            .iter()
            .all(|v| v.is_finite());
        finite && r.area() > 0.0 && self.viewport.height > 0.0
    }

    /// `true` when the element lies entirely above or below the viewport.
    pub fn is_offscreen(&self) -> bool {
        self.bottom() <= 0.0 || self.top() >= self.viewport.height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
