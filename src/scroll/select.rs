use crate::foundation::core::FrameIndex;

/// Select the frame for `progress` in a sequence of `frame_count` frames.
///
/// The index is `round(progress * (frame_count - 1))` clamped to `[0, frame_count - 1]`.
/// Returns `None` for an empty sequence, which callers treat as "no animation". `NaN`
/// progress selects the first frame.
pub fn select_frame(progress: f64, frame_count: usize) -> Option<FrameIndex> {
    let last = frame_count.checked_sub(1)?;
    if progress.is_nan() {
        return Some(FrameIndex(0));
    }
    let raw = (progress * last as f64).round();
    // Float-to-int casts saturate, so infinities land on the clamp bounds.
    let idx = (raw as i64).clamp(0, last as i64);
    Some(FrameIndex(idx as usize))
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/select.rs"]
mod tests;
