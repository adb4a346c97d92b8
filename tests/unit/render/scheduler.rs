use std::sync::Arc;

use super::*;
use crate::{assets::Frame, foundation::core::PixelSize};

#[derive(Default)]
struct CountingRefresh {
    requests: usize,
}

impl RefreshSource for CountingRefresh {
    fn request_refresh(&mut self) {
        self.requests += 1;
    }
}

/// Records clears and the red-channel tag of every drawn frame.
#[derive(Default)]
struct RecordingSurface {
    clears: usize,
    drawn: Vec<u8>,
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> Option<PixelSize> {
        PixelSize::new(1, 1).ok()
    }

    fn resize(&mut self, _size: PixelSize) {}

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn draw_frame(&mut self, frame: &Frame) {
        self.drawn.push(frame.rgba8_premul[0]);
    }
}

fn tagged(tag: u8) -> Frame {
    Frame {
        width: 1,
        height: 1,
        rgba8_premul: Arc::new(vec![tag, 0, 0, 255]),
    }
}

fn frames(n: u8) -> FrameSet {
    FrameSet::from_slots((0..n).map(|i| Some(tagged(i))).collect())
}

fn on_screen() -> Geometry {
    Geometry::vertical(100.0, 300.0, 1000.0)
}

fn sel(frame: usize) -> Selection {
    Selection {
        frame: FrameIndex(frame),
        progress: 0.0,
    }
}

#[test]
fn rapid_identical_updates_paint_once() {
    let sched = RenderScheduler::default();
    let mut state = AnimationState::default();
    let mut refresh = CountingRefresh::default();
    let mut surface = RecordingSurface::default();
    let set = frames(10);

    assert_eq!(
        sched.request(&mut state, &on_screen(), sel(4), &mut refresh),
        UpdateOutcome::Scheduled
    );
    assert_eq!(
        sched.request(&mut state, &on_screen(), sel(4), &mut refresh),
        UpdateOutcome::Coalesced
    );
    assert_eq!(
        sched.request(&mut state, &on_screen(), sel(4), &mut refresh),
        UpdateOutcome::Coalesced
    );
    assert_eq!(refresh.requests, 1);
    assert!(state.redraw_pending());

    assert_eq!(
        sched.refresh(&mut state, &set, &mut surface),
        Some(FrameIndex(4))
    );
    assert_eq!(surface.drawn, vec![4]);
    assert_eq!(state.current_frame(), Some(FrameIndex(4)));
    assert!(!state.redraw_pending());
}

#[test]
fn latest_selection_wins_within_a_refresh() {
    let sched = RenderScheduler::default();
    let mut state = AnimationState::default();
    let mut refresh = CountingRefresh::default();
    let mut surface = RecordingSurface::default();
    let set = frames(10);

    sched.request(&mut state, &on_screen(), sel(2), &mut refresh);
    sched.request(&mut state, &on_screen(), sel(5), &mut refresh);
    sched.request(&mut state, &on_screen(), sel(7), &mut refresh);
    assert_eq!(refresh.requests, 1);

    sched.refresh(&mut state, &set, &mut surface);
    assert_eq!(surface.drawn, vec![7]);
    assert_eq!(state.current_frame(), Some(FrameIndex(7)));
}

#[test]
fn same_frame_is_not_rescheduled() {
    let sched = RenderScheduler::default();
    let mut state = AnimationState::default();
    let mut refresh = CountingRefresh::default();
    let mut surface = RecordingSurface::default();
    let set = frames(10);

    sched.request(&mut state, &on_screen(), sel(3), &mut refresh);
    sched.refresh(&mut state, &set, &mut surface);

    assert_eq!(
        sched.request(&mut state, &on_screen(), sel(3), &mut refresh),
        UpdateOutcome::Unchanged
    );
    assert_eq!(refresh.requests, 1);
    assert_eq!(surface.drawn.len(), 1);
}

#[test]
fn scrolling_back_before_refresh_skips_paint() {
    let sched = RenderScheduler::default();
    let mut state = AnimationState::default();
    let mut refresh = CountingRefresh::default();
    let mut surface = RecordingSurface::default();
    let set = frames(10);

    sched.request(&mut state, &on_screen(), sel(3), &mut refresh);
    sched.refresh(&mut state, &set, &mut surface);

    sched.request(&mut state, &on_screen(), sel(6), &mut refresh);
    sched.request(&mut state, &on_screen(), sel(3), &mut refresh);
    assert_eq!(sched.refresh(&mut state, &set, &mut surface), None);
    assert_eq!(surface.drawn, vec![3]);
    assert!(!state.redraw_pending());
}

#[test]
fn offscreen_updates_are_ignored() {
    let sched = RenderScheduler::default();
    let mut state = AnimationState::default();
    let mut refresh = CountingRefresh::default();

    let below = Geometry::vertical(1000.0, 1200.0, 1000.0);
    let above = Geometry::vertical(-200.0, 0.0, 1000.0);
    assert_eq!(
        sched.request(&mut state, &below, sel(1), &mut refresh),
        UpdateOutcome::Offscreen
    );
    assert_eq!(
        sched.request(&mut state, &above, sel(1), &mut refresh),
        UpdateOutcome::Offscreen
    );
    assert_eq!(refresh.requests, 0);
    assert_eq!(state.selection(), None);
}

#[test]
fn spurious_refresh_does_nothing() {
    let sched = RenderScheduler::default();
    let mut state = AnimationState::default();
    let mut surface = RecordingSurface::default();
    assert_eq!(sched.refresh(&mut state, &frames(3), &mut surface), None);
    assert_eq!(surface.clears, 0);
}

#[test]
fn absent_frame_paints_blank_by_default() {
    let sched = RenderScheduler::default();
    let mut state = AnimationState::default();
    let mut surface = RecordingSurface::default();
    let set = FrameSet::from_slots(vec![Some(tagged(0)), None, Some(tagged(2))]);

    sched.paint(&mut state, &set, &mut surface, sel(1));
    assert_eq!(surface.clears, 1);
    assert!(surface.drawn.is_empty());
    assert_eq!(state.current_frame(), Some(FrameIndex(1)));
}

#[test]
fn nearest_previous_fallback_fills_holes() {
    let sched = RenderScheduler::new(FallbackPolicy::NearestPrevious, false);
    let mut state = AnimationState::default();
    let mut surface = RecordingSurface::default();
    let set = FrameSet::from_slots(vec![Some(tagged(0)), None, Some(tagged(2))]);

    sched.paint(&mut state, &set, &mut surface, sel(1));
    assert_eq!(surface.drawn, vec![0]);
    assert_eq!(state.current_frame(), Some(FrameIndex(1)));
}

#[test]
fn fallback_policy_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&FallbackPolicy::NearestPrevious).unwrap(),
        "\"nearest_previous\""
    );
}
