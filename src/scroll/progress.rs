use crate::{foundation::core::Geometry, player::config::PlayerConfig};

/// Which part of the tracked element measures the crossing of the start and end lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bounds {
    /// Starts when the top crosses the start line, ends when the bottom crosses the end line.
    #[default]
    Outside,
    /// Tracks the element's vertical midpoint.
    Center,
    /// Starts when the bottom crosses the start line, ends when the top crosses the end line.
    Inside,
}

/// The vertical band of the viewport in which scroll maps to progress.
///
/// Lines are measured in viewport coordinates (0 at the top edge).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationBand {
    /// Line at which progress is 0.
    pub start_line: f64,
    /// Line at which progress is 1.
    pub end_line: f64,
}

impl AnimationBand {
    /// Band for fractional `scroll_start`/`scroll_end` positions, measured up from the
    /// viewport's bottom edge.
    pub fn new(viewport_height: f64, scroll_start: f64, scroll_end: f64) -> Self {
        Self {
            start_line: viewport_height - scroll_start * viewport_height,
            end_line: viewport_height - scroll_end * viewport_height,
        }
    }

    /// Signed distance between the start and end lines.
    pub fn distance(&self) -> f64 {
        self.start_line - self.end_line
    }

    /// Unclamped progress of an element spanning `top..bottom`.
    pub fn progress(&self, top: f64, bottom: f64, bounds: Bounds) -> f64 {
        let distance = self.distance();
        let element_height = bottom - top;
        match bounds {
            Bounds::Outside => ((top - self.end_line) - distance) / -(element_height + distance),
            Bounds::Inside => (self.start_line - bottom) / (distance - element_height),
            Bounds::Center => (((top + bottom) / 2.0) - self.start_line) / -distance,
        }
    }
}

/// Map element and viewport geometry to scroll progress.
///
/// Nominally in `[0, 1]` but never clamped: elements near the band map slightly outside it.
/// Degenerate bands (e.g. `inside` with an element exactly as tall as the band) yield a
/// non-finite value, which frame selection tolerates.
pub fn scroll_progress(geometry: &Geometry, config: &PlayerConfig) -> f64 {
    AnimationBand::new(
        geometry.viewport.height,
        config.scroll_start,
        config.scroll_end,
    )
    .progress(geometry.top(), geometry.bottom(), config.bounds)
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
