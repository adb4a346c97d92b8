use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    assets::{Frame, PrimaryImage, decode},
    foundation::{
        core::FrameIndex,
        error::{ScrollSeqError, ScrollSeqResult},
    },
};

/// Host primitive that acquires and decodes one frame by identifier.
///
/// Acquisitions for a sequence run concurrently, so implementations must be shareable across
/// loader worker threads.
pub trait FrameSource: Sync {
    /// Acquire the frame named by `identifier`.
    fn acquire(&self, identifier: &str) -> ScrollSeqResult<Frame>;
}

/// [`FrameSource`] that reads encoded images from the filesystem.
///
/// Relative identifiers resolve against `root`; absolute identifiers are used as-is.
#[derive(Clone, Debug)]
pub struct FsFrameSource {
    root: PathBuf,
}

impl FsFrameSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory for relative identifiers.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path an identifier refers to.
    pub fn resolve_path(&self, identifier: &str) -> PathBuf {
        let p = Path::new(identifier);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }

    /// Decode the primary (first) image of a player.
    ///
    /// Unlike [`FrameSource::acquire`], a failure here is fatal for the caller.
    pub fn decode_primary(&self, identifier: &str) -> ScrollSeqResult<PrimaryImage> {
        let bytes = self.read_bytes(identifier)?;
        Ok(PrimaryImage {
            source: identifier.to_string(),
            frame: decode::decode_frame(&bytes)?,
        })
    }

    fn read_bytes(&self, identifier: &str) -> ScrollSeqResult<Vec<u8>> {
        let path = self.resolve_path(identifier);
        std::fs::read(&path)
            .with_context(|| format!("read frame bytes from '{}'", path.display()))
            .map_err(ScrollSeqError::from)
    }
}

impl FrameSource for FsFrameSource {
    fn acquire(&self, identifier: &str) -> ScrollSeqResult<Frame> {
        self.read_bytes(identifier)
            .and_then(|bytes| decode::decode_frame(&bytes))
            .map_err(|e| ScrollSeqError::frame_load(format!("'{identifier}': {e:#}")))
    }
}

/// Index-aligned frame slots; a slot is `None` when its frame failed or was never loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSet {
    slots: Vec<Option<Frame>>,
}

impl FrameSet {
    /// A set of `len` absent slots.
    pub fn absent(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Wrap pre-built slots.
    pub fn from_slots(slots: Vec<Option<Frame>>) -> Self {
        Self { slots }
    }

    /// Number of slots (present or absent).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Return `true` when the set has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Frame at `index`, if present.
    pub fn get(&self, index: FrameIndex) -> Option<&Frame> {
        self.slots.get(index.0).and_then(Option::as_ref)
    }

    /// Return `true` when slot `index` holds a frame.
    pub fn is_present(&self, index: FrameIndex) -> bool {
        self.get(index).is_some()
    }

    /// Number of present slots.
    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Indices of absent slots in ascending order.
    pub fn absent_indices(&self) -> Vec<FrameIndex> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| FrameIndex(i))
            .collect()
    }

    /// Nearest present frame at or below `index`.
    pub fn nearest_present_at_or_below(&self, index: FrameIndex) -> Option<(FrameIndex, &Frame)> {
        let upper = index.0.min(self.slots.len().checked_sub(1)?);
        (0..=upper)
            .rev()
            .find_map(|i| self.slots[i].as_ref().map(|f| (FrameIndex(i), f)))
    }

    /// Store `frame` at `index`.
    pub fn insert(&mut self, index: FrameIndex, frame: Frame) -> ScrollSeqResult<()> {
        let len = self.slots.len();
        let slot = self.slots.get_mut(index.0).ok_or_else(|| {
            ScrollSeqError::validation(format!("frame slot {index} out of range (len {len})"))
        })?;
        *slot = Some(frame);
        Ok(())
    }
}

/// Outcome summary of one loader run.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoadReport {
    /// Acquisitions issued.
    pub requested: usize,
    /// Acquisitions that produced a frame.
    pub loaded: usize,
    /// Slots whose acquisition failed.
    pub failed: Vec<FrameIndex>,
}

/// Frame loader threading options.
#[derive(Clone, Debug, Default)]
pub struct LoaderOpts {
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Concurrent, all-settled frame loader.
///
/// Every identifier is acquired independently on a dedicated worker pool and the call returns
/// once all acquisitions have settled. Failures never shift later slots: the result is always
/// index-aligned with the identifier list.
pub struct FrameLoader {
    pool: rayon::ThreadPool,
}

impl FrameLoader {
    /// Build a loader with its own worker pool.
    pub fn new(opts: LoaderOpts) -> ScrollSeqResult<Self> {
        Ok(Self {
            pool: build_thread_pool(opts.threads)?,
        })
    }

    /// Acquire every identifier.
    pub fn load<S>(&self, source: &S, identifiers: &[String]) -> (FrameSet, LoadReport)
    where
        S: FrameSource + ?Sized,
    {
        self.load_with_primary(source, identifiers, None)
    }

    /// Acquire every identifier except the primary slot, which is filled with `primary`
    /// directly.
    #[tracing::instrument(skip_all, fields(frames = identifiers.len()))]
    pub fn load_with_primary<S>(
        &self,
        source: &S,
        identifiers: &[String],
        primary: Option<(FrameIndex, Frame)>,
    ) -> (FrameSet, LoadReport)
    where
        S: FrameSource + ?Sized,
    {
        let primary = primary.filter(|(idx, _)| idx.0 < identifiers.len());
        let skip = primary.as_ref().map(|(idx, _)| idx.0);

        let slots: Vec<Option<Frame>> = self.pool.install(|| {
            identifiers
                .par_iter()
                .enumerate()
                .map(|(i, identifier)| {
                    if skip == Some(i) {
                        return None;
                    }
                    match source.acquire(identifier) {
                        Ok(frame) => Some(frame),
                        Err(e) => {
                            tracing::warn!(
                                index = i,
                                identifier = %identifier,
                                error = %e,
                                "frame acquisition failed"
                            );
                            None
                        }
                    }
                })
                .collect()
        });

        let failed = slots
            .iter()
            .enumerate()
            .filter(|(i, s)| s.is_none() && skip != Some(*i))
            .map(|(i, _)| FrameIndex(i))
            .collect::<Vec<_>>();
        let requested = identifiers.len() - usize::from(skip.is_some());
        let report = LoadReport {
            requested,
            loaded: requested - failed.len(),
            failed,
        };

        let mut frames = FrameSet::from_slots(slots);
        if let Some((idx, frame)) = primary {
            frames.slots[idx.0] = Some(frame);
        }
        (frames, report)
    }
}

fn build_thread_pool(threads: Option<usize>) -> ScrollSeqResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ScrollSeqError::validation(
            "loader 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScrollSeqError::validation(format!("failed to build loader thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
