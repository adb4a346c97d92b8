use crate::{
    assets::loader::FrameSet,
    foundation::core::{FrameIndex, Geometry},
    render::surface::RenderSurface,
};

/// Host primitive that schedules one callback at the next display refresh.
///
/// The host answers each request by calling back into the player once.
pub trait RefreshSource {
    /// Request a callback at the next refresh boundary.
    fn request_refresh(&mut self);
}

/// What to paint when the selected frame failed to load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Leave the surface cleared.
    #[default]
    Blank,
    /// Paint the nearest lower frame that did load (cleared if there is none).
    NearestPrevious,
}

/// A frame choice together with the progress it was computed from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    /// Selected frame slot.
    pub frame: FrameIndex,
    /// Unclamped scroll progress.
    pub progress: f64,
}

/// Mutable per-player animation state.
///
/// Mutated only from the host's event loop: by the render scheduler (paint bookkeeping) and by
/// the visibility gate (`listening`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationState {
    pub(crate) current_frame: Option<FrameIndex>,
    pub(crate) redraw_pending: bool,
    pub(crate) listening: bool,
    pub(crate) selection: Option<Selection>,
}

impl AnimationState {
    /// Frame currently on the surface; `None` before the first paint.
    pub fn current_frame(&self) -> Option<FrameIndex> {
        self.current_frame
    }

    /// Whether a refresh callback is outstanding.
    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Whether scroll events are currently subscribed.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Most recent selection handed to the scheduler.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }
}

/// Result of offering a candidate frame to the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Scroll events are not being handled (gate closed or player not mounted).
    NotListening,
    /// Geometry was unavailable or the sequence is empty.
    NoUpdate,
    /// The element is entirely outside the viewport.
    Offscreen,
    /// The candidate is already on the surface.
    Unchanged,
    /// A refresh is already pending; it will paint this latest selection.
    Coalesced,
    /// A refresh was requested.
    Scheduled,
}

/// One-paint-per-refresh gate over an [`AnimationState`].
///
/// Any number of updates between two refreshes collapse into at most one paint of the latest
/// selection, and a paint never repeats the frame already shown.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderScheduler {
    fallback: FallbackPolicy,
    debug: bool,
}

impl RenderScheduler {
    /// Build a scheduler; `debug` enables the human-readable paint log.
    pub fn new(fallback: FallbackPolicy, debug: bool) -> Self {
        Self { fallback, debug }
    }

    /// Offer a candidate selection computed from `geometry`.
    pub fn request<R>(
        &self,
        state: &mut AnimationState,
        geometry: &Geometry,
        selection: Selection,
        refresh: &mut R,
    ) -> UpdateOutcome
    where
        R: RefreshSource + ?Sized,
    {
        if geometry.is_offscreen() {
            return UpdateOutcome::Offscreen;
        }
        if state.redraw_pending {
            state.selection = Some(selection);
            return UpdateOutcome::Coalesced;
        }
        if state.current_frame == Some(selection.frame) {
            return UpdateOutcome::Unchanged;
        }

        state.selection = Some(selection);
        state.redraw_pending = true;
        refresh.request_refresh();
        UpdateOutcome::Scheduled
    }

    /// Run the refresh callback: paint the latest selection if it differs from the current
    /// frame. Returns the painted slot.
    pub fn refresh<S>(
        &self,
        state: &mut AnimationState,
        frames: &FrameSet,
        surface: &mut S,
    ) -> Option<FrameIndex>
    where
        S: RenderSurface + ?Sized,
    {
        if !state.redraw_pending {
            return None;
        }
        state.redraw_pending = false;

        let selection = state.selection?;
        if state.current_frame == Some(selection.frame) {
            return None;
        }
        self.paint(state, frames, surface, selection);
        Some(selection.frame)
    }

    /// Paint `selection` immediately and record it as the current frame.
    pub fn paint<S>(
        &self,
        state: &mut AnimationState,
        frames: &FrameSet,
        surface: &mut S,
        selection: Selection,
    ) where
        S: RenderSurface + ?Sized,
    {
        surface.clear();
        let frame = match self.fallback {
            FallbackPolicy::Blank => frames.get(selection.frame),
            FallbackPolicy::NearestPrevious => frames
                .nearest_present_at_or_below(selection.frame)
                .map(|(_, f)| f),
        };
        match frame {
            Some(frame) => surface.draw_frame(frame),
            None => tracing::debug!(frame = %selection.frame, "no frame to draw; surface left blank"),
        }

        state.current_frame = Some(selection.frame);
        state.selection = Some(selection);

        if self.debug {
            tracing::info!(
                frame = %selection.frame,
                progress = %format!("{:.2}", selection.progress),
                "frame painted"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
