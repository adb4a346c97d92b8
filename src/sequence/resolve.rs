use crate::foundation::{
    core::FrameIndex,
    error::{ScrollSeqError, ScrollSeqResult},
};

/// Frame-sequence naming pattern derived from one resolved source identifier.
///
/// The pattern anchors on the last contiguous run of ASCII digits in the identifier's final
/// path segment (extension excluded). Every frame identifier is the source identifier with that
/// run replaced by the frame index, zero-padded to the run's length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceSpec {
    base_identifier: String,
    // Byte range of the extension-less filename inside `base_identifier`.
    name_start: usize,
    name_end: usize,
    digits: String,
    frame_count: usize,
}

impl SequenceSpec {
    /// Derive the sequence pattern from `source`.
    ///
    /// Fails with [`ScrollSeqError::Pattern`] when the filename carries no digits.
    pub fn parse(source: &str, frame_count: usize) -> ScrollSeqResult<Self> {
        let name_start = source.rfind('/').map_or(0, |i| i + 1);
        let segment = &source[name_start..];
        let name = segment.rsplit_once('.').map_or(segment, |(stem, _)| stem);
        let name_end = name_start + name.len();

        let digits = last_digit_run(name).ok_or_else(|| {
            ScrollSeqError::pattern(format!("no digit run in filename of '{source}'"))
        })?;

        Ok(Self {
            base_identifier: source.to_string(),
            name_start,
            name_end,
            digits: digits.to_string(),
            frame_count,
        })
    }

    /// The identifier the pattern was derived from.
    pub fn base_identifier(&self) -> &str {
        &self.base_identifier
    }

    /// Filename of the base identifier without path or extension.
    pub fn file_name(&self) -> &str {
        &self.base_identifier[self.name_start..self.name_end]
    }

    /// The digit run used as substitution anchor.
    pub fn anchor(&self) -> &str {
        &self.digits
    }

    /// Zero-padding width for generated indices.
    pub fn digit_run_length(&self) -> usize {
        self.digits.len()
    }

    /// Number of frames in the sequence.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Slot the base identifier itself occupies, when its number falls inside the sequence.
    pub fn primary_index(&self) -> Option<FrameIndex> {
        self.digits
            .parse::<usize>()
            .ok()
            .filter(|&n| n < self.frame_count)
            .map(FrameIndex)
    }

    /// Identifier for frame `index`.
    ///
    /// Indices wider than the anchor simply produce a longer number.
    pub fn identifier(&self, index: FrameIndex) -> String {
        let width = self.digits.len();
        let number = format!("{:0width$}", index.0);
        let new_name = self.file_name().replacen(&self.digits, &number, 1);

        let mut out = String::with_capacity(self.base_identifier.len() + number.len());
        out.push_str(&self.base_identifier[..self.name_start]);
        out.push_str(&new_name);
        out.push_str(&self.base_identifier[self.name_end..]);
        out
    }

    /// Identifiers for every frame, in slot order.
    pub fn identifiers(&self) -> Vec<String> {
        (0..self.frame_count)
            .map(|i| self.identifier(FrameIndex(i)))
            .collect()
    }
}

/// Resolve the full ordered list of frame identifiers for `source`.
#[tracing::instrument(level = "debug")]
pub fn resolve_sequence(source: &str, frame_count: usize) -> ScrollSeqResult<Vec<String>> {
    Ok(SequenceSpec::parse(source, frame_count)?.identifiers())
}

fn last_digit_run(name: &str) -> Option<&str> {
    let bytes = name.as_bytes();
    let end = bytes.iter().rposition(u8::is_ascii_digit)? + 1;
    let start = bytes[..end]
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |i| i + 1);
    Some(&name[start..end])
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/resolve.rs"]
mod tests;
