use crate::{
    assets::{
        Frame, PrimaryImage,
        loader::{FrameLoader, FrameSet, FrameSource, LoadReport},
    },
    foundation::{
        core::{FrameIndex, Geometry, PixelSize},
        error::{ScrollSeqError, ScrollSeqResult},
    },
    host::Host,
    player::config::PlayerConfig,
    render::{
        scheduler::{AnimationState, RenderScheduler, Selection, UpdateOutcome},
        surface::RenderSurface,
    },
    scroll::{progress::scroll_progress, select::select_frame},
    sequence::resolve::SequenceSpec,
    visibility::gate::{GateTransition, VisibilityGate},
};

/// Player lifecycle states. Each state is entered only after its predecessor completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum PlayerState {
    /// Waiting for the original image to become decode-ready.
    WaitingForFirstFrame,
    /// Deriving the frame sequence and sizing the surface.
    Resolving,
    /// Acquiring the remaining frames.
    LoadingRemainingFrames,
    /// Surface mounted; scroll drives the animation.
    Mounted,
    /// Setup failed; the original image stays in place.
    Aborted,
}

/// Scroll-driven image-sequence player.
///
/// The host drives the player from its event loop:
///
/// 1. [`Player::primary_ready`] once the original image has decoded (or
///    [`Player::primary_failed`] if it never does),
/// 2. [`Player::load_remaining`] to acquire the other frames and mount the surface,
/// 3. [`Player::on_intersection`], [`Player::on_scroll`] and [`Player::on_refresh`] for as long as
///    the player lives,
/// 4. [`Player::teardown`] when the page unmounts it.
#[derive(Debug)]
pub struct Player {
    config: PlayerConfig,
    state: PlayerState,
    sequence: Option<SequenceSpec>,
    identifiers: Vec<String>,
    primary: Option<Frame>,
    frames: FrameSet,
    load_report: Option<LoadReport>,
    animation: AnimationState,
    scheduler: RenderScheduler,
    gate: VisibilityGate,
}

impl Player {
    /// Create a player waiting for its first frame.
    pub fn new(config: PlayerConfig) -> ScrollSeqResult<Self> {
        config.validate()?;
        let scheduler = RenderScheduler::new(config.fallback, config.debug);
        let gate = VisibilityGate::new(config.debug);
        Ok(Self {
            config,
            state: PlayerState::WaitingForFirstFrame,
            sequence: None,
            identifiers: Vec::new(),
            primary: None,
            frames: FrameSet::default(),
            load_report: None,
            animation: AnimationState::default(),
            scheduler,
            gate,
        })
    }

    /// Player configuration.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Sequence pattern, available from `LoadingRemainingFrames` on.
    pub fn sequence(&self) -> Option<&SequenceSpec> {
        self.sequence.as_ref()
    }

    /// Resolved frame identifiers in slot order.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Frame slots; empty until loading settles.
    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    /// Summary of the frame loader run.
    pub fn load_report(&self) -> Option<&LoadReport> {
        self.load_report.as_ref()
    }

    /// Animation bookkeeping (current frame, pending redraw, subscription).
    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// The original image never became decodable. Fatal; there is no retry.
    pub fn primary_failed(&mut self, reason: &str) -> ScrollSeqError {
        if let Err(e) = self.expect_state(PlayerState::WaitingForFirstFrame, "primary_failed") {
            return e;
        }
        self.state = PlayerState::Aborted;
        tracing::warn!(reason, "first frame could not be decoded; player aborted");
        ScrollSeqError::lifecycle(format!("first frame could not be decoded: {reason}"))
    }

    /// The original image is decode-ready: resolve the sequence and size the surface.
    ///
    /// A source without a digit run aborts the player with [`ScrollSeqError::Pattern`].
    pub fn primary_ready<H>(&mut self, primary: PrimaryImage, host: &mut H) -> ScrollSeqResult<()>
    where
        H: Host + ?Sized,
    {
        self.expect_state(PlayerState::WaitingForFirstFrame, "primary_ready")?;
        if self.config.debug {
            tracing::info!(source = %primary.source, "first image decoded");
        }

        self.state = PlayerState::Resolving;
        let resolved = SequenceSpec::parse(&primary.source, self.config.frame_count).and_then(
            |spec| PixelSize::new(primary.frame.width, primary.frame.height).map(|s| (spec, s)),
        );
        let (spec, size) = match resolved {
            Ok(v) => v,
            Err(e) => {
                self.state = PlayerState::Aborted;
                tracing::warn!(error = %e, "sequence resolution failed; player aborted");
                return Err(e);
            }
        };

        host.surface_mut().resize(size);
        self.identifiers = spec.identifiers();
        if self.config.debug {
            tracing::info!(
                source = %primary.source,
                width = size.width,
                height = size.height,
                frames = self.identifiers.len(),
                "sequence resolved"
            );
        }

        self.sequence = Some(spec);
        self.primary = Some(primary.frame);
        self.state = PlayerState::LoadingRemainingFrames;
        Ok(())
    }

    /// Acquire every non-primary frame, then mount the surface.
    ///
    /// Individual frame failures leave absent slots and never fail this call. `geometry` is the
    /// original image's bounds, used to pick the first painted frame.
    pub fn load_remaining<S, H>(
        &mut self,
        loader: &FrameLoader,
        source: &S,
        geometry: Option<Geometry>,
        host: &mut H,
    ) -> ScrollSeqResult<LoadReport>
    where
        S: FrameSource + ?Sized,
        H: Host + ?Sized,
    {
        self.expect_state(PlayerState::LoadingRemainingFrames, "load_remaining")?;

        let primary_slot = self
            .sequence
            .as_ref()
            .and_then(SequenceSpec::primary_index)
            .zip(self.primary.clone());
        let (frames, report) = loader.load_with_primary(source, &self.identifiers, primary_slot);
        if self.config.debug {
            tracing::info!(
                loaded = frames.present_count(),
                failed = report.failed.len(),
                "frames loaded"
            );
        }
        self.frames = frames;
        self.load_report = Some(report.clone());

        self.mount(geometry, host);
        Ok(report)
    }

    /// Run the whole setup: resolve, load and mount.
    pub fn setup<S, H>(
        &mut self,
        primary: PrimaryImage,
        loader: &FrameLoader,
        source: &S,
        geometry: Option<Geometry>,
        host: &mut H,
    ) -> ScrollSeqResult<LoadReport>
    where
        S: FrameSource + ?Sized,
        H: Host + ?Sized,
    {
        self.primary_ready(primary, host)?;
        self.load_remaining(loader, source, geometry, host)
    }

    /// Intersection notification for the mounted surface.
    pub fn on_intersection<H>(&mut self, intersecting: bool, host: &mut H) -> GateTransition
    where
        H: Host + ?Sized,
    {
        self.gate.observe(&mut self.animation, intersecting, host)
    }

    /// Scroll notification carrying the surface's current bounds.
    pub fn on_scroll<H>(&mut self, geometry: Option<Geometry>, host: &mut H) -> UpdateOutcome
    where
        H: Host + ?Sized,
    {
        if !self.animation.listening {
            return UpdateOutcome::NotListening;
        }
        let Some(geometry) = geometry.filter(Geometry::is_available) else {
            return UpdateOutcome::NoUpdate;
        };
        let Some(selection) = self.select(&geometry) else {
            return UpdateOutcome::NoUpdate;
        };
        self.scheduler
            .request(&mut self.animation, &geometry, selection, host)
    }

    /// Display-refresh callback. Returns the painted slot, if any.
    pub fn on_refresh<H>(&mut self, host: &mut H) -> Option<FrameIndex>
    where
        H: Host + ?Sized,
    {
        if self.state != PlayerState::Mounted {
            return None;
        }
        self.scheduler
            .refresh(&mut self.animation, &self.frames, host.surface_mut())
    }

    /// The host is unmounting the player: drop the scroll subscription, stop observing and
    /// cancel any pending paint.
    pub fn teardown<H>(&mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        self.gate.disarm(&mut self.animation, host);
        // An outstanding refresh callback must not paint after unmount.
        self.animation.redraw_pending = false;
        if self.config.debug {
            tracing::info!("player torn down");
        }
    }

    fn mount<H>(&mut self, geometry: Option<Geometry>, host: &mut H)
    where
        H: Host + ?Sized,
    {
        self.state = PlayerState::Mounted;

        if self.frames.is_empty() {
            let surface = host.surface_mut();
            surface.clear();
            if let Some(primary) = &self.primary {
                surface.draw_frame(primary);
            }
        } else {
            let selection = geometry
                .filter(Geometry::is_available)
                .and_then(|g| self.select(&g))
                .unwrap_or(Selection {
                    frame: FrameIndex(0),
                    progress: 0.0,
                });
            self.scheduler
                .paint(&mut self.animation, &self.frames, host.surface_mut(), selection);
        }

        host.copy_attributes();
        host.insert_surface_before_image();
        host.remove_image();
        if self.config.debug {
            tracing::info!("surface inserted and animating");
        }

        if !self.frames.is_empty() {
            self.gate.arm();
        }
    }

    fn select(&self, geometry: &Geometry) -> Option<Selection> {
        let progress = scroll_progress(geometry, &self.config);
        select_frame(progress, self.frames.len()).map(|frame| Selection { frame, progress })
    }

    fn expect_state(&self, expected: PlayerState, op: &str) -> ScrollSeqResult<()> {
        if self.state != expected {
            return Err(ScrollSeqError::lifecycle(format!(
                "{op} requires state {expected:?}, player is {:?}",
                self.state
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/lifecycle.rs"]
mod tests;
