use super::*;

#[test]
fn resolves_zero_padded_sequence() {
    let ids = resolve_sequence("images/movie-0004.jpg", 3).unwrap();
    assert_eq!(
        ids,
        vec![
            "images/movie-0000.jpg",
            "images/movie-0001.jpg",
            "images/movie-0002.jpg",
        ]
    );
}

#[test]
fn resolution_is_deterministic() {
    let a = resolve_sequence("https://example.com/a/clip_12.png", 20).unwrap();
    let b = resolve_sequence("https://example.com/a/clip_12.png", 20).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 20);
    assert_eq!(a[7], "https://example.com/a/clip_07.png");
}

#[test]
fn missing_digits_is_pattern_error() {
    let err = resolve_sequence("images/movie.jpg", 3).unwrap_err();
    assert!(matches!(err, ScrollSeqError::Pattern(_)));
}

#[test]
fn digits_in_directory_or_extension_do_not_count() {
    assert!(resolve_sequence("frames-2024/movie.jpg", 2).is_err());
    assert!(resolve_sequence("frames/movie.mp4", 2).is_err());
}

#[test]
fn anchors_on_last_digit_run() {
    let spec = SequenceSpec::parse("12-movie-0000.webp", 2).unwrap();
    assert_eq!(spec.file_name(), "12-movie-0000");
    assert_eq!(spec.anchor(), "0000");
    assert_eq!(spec.digit_run_length(), 4);
    assert_eq!(spec.identifier(FrameIndex(1)), "12-movie-0001.webp");
}

#[test]
fn replaces_first_occurrence_of_anchor() {
    // The anchor text also appears earlier in the name; the first occurrence is substituted.
    let spec = SequenceSpec::parse("07-shot-07.jpg", 3).unwrap();
    assert_eq!(spec.identifier(FrameIndex(2)), "02-shot-07.jpg");
}

#[test]
fn wide_indices_grow_past_padding() {
    let ids = resolve_sequence("seq/f01.png", 150).unwrap();
    assert_eq!(ids[9], "seq/f09.png");
    assert_eq!(ids[99], "seq/f99.png");
    assert_eq!(ids[100], "seq/f100.png");
    assert_eq!(ids[149], "seq/f149.png");
}

#[test]
fn directory_repeating_the_filename_is_untouched() {
    let spec = SequenceSpec::parse("movie-0001/movie-0001.jpg", 3).unwrap();
    assert_eq!(spec.identifier(FrameIndex(2)), "movie-0001/movie-0002.jpg");
}

#[test]
fn extension_is_split_from_the_right() {
    let spec = SequenceSpec::parse("a/take.v2-003.jpg", 5).unwrap();
    assert_eq!(spec.file_name(), "take.v2-003");
    assert_eq!(spec.identifier(FrameIndex(4)), "a/take.v2-004.jpg");
}

#[test]
fn segment_without_extension() {
    let ids = resolve_sequence("frames/0009", 2).unwrap();
    assert_eq!(ids, vec!["frames/0000", "frames/0001"]);
}

#[test]
fn zero_frames_resolves_to_empty_list() {
    assert!(resolve_sequence("movie-0001.jpg", 0).unwrap().is_empty());
}

#[test]
fn primary_index_only_inside_sequence() {
    assert_eq!(
        SequenceSpec::parse("movie-0004.jpg", 10)
            .unwrap()
            .primary_index(),
        Some(FrameIndex(4))
    );
    assert_eq!(
        SequenceSpec::parse("movie-0004.jpg", 3)
            .unwrap()
            .primary_index(),
        None
    );
}
