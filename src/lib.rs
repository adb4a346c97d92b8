//! scrollseq is a scroll-driven image-sequence player engine.
//!
//! It replaces a single still image with a sequence of frames whose current frame follows the
//! scroll position, giving a "scrubbed video" effect without any video decoding.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: one source identifier + frame count -> ordered frame identifiers
//!    ([`SequenceSpec`])
//! 2. **Load**: acquire every frame concurrently, tolerating failures, into an index-aligned
//!    [`FrameSet`] ([`FrameLoader`])
//! 3. **Map**: element + viewport geometry -> unclamped progress ([`scroll_progress`])
//! 4. **Select**: progress -> clamped frame index ([`select_frame`])
//! 5. **Schedule**: at most one paint per display refresh, never repeating the shown frame
//!    ([`RenderScheduler`]), gated by viewport visibility ([`VisibilityGate`])
//!
//! [`Player`] sequences these steps as an explicit state machine driven by a [`Host`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Index-aligned frames**: a failed frame leaves an absent slot; later frames never shift.
//! - **Single event loop**: player state is only mutated from host callbacks; only frame
//!   acquisition fans out to worker threads, and it is joined before the player proceeds.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod player;
mod render;
mod scroll;
mod sequence;
mod visibility;

pub mod host;

pub use assets::decode::decode_frame;
pub use assets::loader::{FrameLoader, FrameSet, FrameSource, FsFrameSource, LoadReport, LoaderOpts};
pub use assets::{Frame, PrimaryImage};
pub use foundation::core::{FrameIndex, Geometry, PixelSize, Rect, Viewport};
pub use foundation::error::{ScrollSeqError, ScrollSeqResult};
pub use host::headless::{DocumentState, HeadlessHost};
pub use host::{Document, Host};
pub use player::config::PlayerConfig;
pub use player::lifecycle::{Player, PlayerState};
pub use render::scheduler::{
    AnimationState, FallbackPolicy, RefreshSource, RenderScheduler, Selection, UpdateOutcome,
};
pub use render::surface::{RasterSurface, RenderSurface};
pub use scroll::progress::{AnimationBand, Bounds, scroll_progress};
pub use scroll::select::select_frame;
pub use sequence::resolve::{SequenceSpec, resolve_sequence};
pub use visibility::gate::{GateTransition, ScrollChannel, VisibilityGate, intersects};
