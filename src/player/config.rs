use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::error::{ScrollSeqError, ScrollSeqResult},
    render::scheduler::FallbackPolicy,
    scroll::progress::Bounds,
};

/// Per-player configuration, fixed for the player's lifetime.
///
/// `scroll_start` and `scroll_end` are viewport fractions measured up from the bottom edge:
/// `0.0` is the bottom of the viewport and `1.0` the top.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerConfig {
    /// Where progress is 0.
    #[serde(default)]
    pub scroll_start: f64,
    /// Where progress is 1.
    #[serde(default = "default_scroll_end")]
    pub scroll_end: f64,
    /// Which part of the element measures the line crossings.
    #[serde(default)]
    pub bounds: Bounds,
    /// Frames in the sequence. `0` disables animation.
    #[serde(default)]
    pub frame_count: usize,
    /// Emit the human-readable lifecycle log.
    #[serde(default)]
    pub debug: bool,
    /// What an absent frame paints as.
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

fn default_scroll_end() -> f64 {
    1.0
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            scroll_start: 0.0,
            scroll_end: default_scroll_end(),
            bounds: Bounds::default(),
            frame_count: 0,
            debug: false,
            fallback: FallbackPolicy::default(),
        }
    }
}

impl PlayerConfig {
    /// Parse a configuration from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollSeqResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ScrollSeqError::serde(format!("parse player config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> ScrollSeqResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollSeqResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollSeqError::validation(format!("open player config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check that both scroll lines are finite fractions in `[0, 1]`.
    ///
    /// A start line above the end line is allowed and plays the sequence in reverse.
    pub fn validate(&self) -> ScrollSeqResult<()> {
        for (name, v) in [
            ("scroll_start", self.scroll_start),
            ("scroll_end", self.scroll_end),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(ScrollSeqError::validation(format!(
                    "{name} must be a finite value in [0, 1], got {v}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/config.rs"]
mod tests;
