mod common;

use agrinir_core::error::AgrinirError;
use agrinir_core::frame::{BgrChannel, BgrFrame};
use ndarray::Array3;

#[test]
fn test_from_array_accepts_three_channels() {
    let frame = BgrFrame::from_array(Array3::<u8>::zeros((4, 6, 3))).unwrap();
    assert_eq!(frame.height(), 4);
    assert_eq!(frame.width(), 6);
    assert_eq!(frame.dim(), (4, 6));
}

#[test]
fn test_from_array_rejects_wrong_channel_count() {
    let err = BgrFrame::from_array(Array3::<u8>::zeros((4, 6, 4))).unwrap_err();
    match err {
        AgrinirError::ShapeMismatch { expected, actual, .. } => {
            assert!(expected.contains('3'), "expected shape: {expected}");
            assert!(actual.contains('4'), "actual shape: {actual}");
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn test_from_array_rejects_empty_frame() {
    assert!(BgrFrame::from_array(Array3::<u8>::zeros((0, 6, 3))).is_err());
    assert!(BgrFrame::from_array(Array3::<u8>::zeros((5, 0, 3))).is_err());
}

#[test]
fn test_from_raw_checks_length() {
    assert!(BgrFrame::from_raw(2, 2, vec![0; 11]).is_err());
    let frame = BgrFrame::from_raw(2, 2, (0..12).collect()).unwrap();
    // Interleaved BGR: pixel (0, 1) starts at byte 3.
    assert_eq!(frame.channel_view(BgrChannel::Blue)[[0, 1]], 3);
    assert_eq!(frame.channel_view(BgrChannel::Green)[[0, 1]], 4);
    assert_eq!(frame.channel_view(BgrChannel::Red)[[0, 1]], 5);
}

#[test]
fn test_from_raw_rejects_overflowing_dimensions() {
    let result = BgrFrame::from_raw(usize::MAX / 2, 4, vec![0; 12]);
    assert!(matches!(result, Err(AgrinirError::ShapeMismatch { .. })));
}

#[test]
fn test_channels_follow_bgr_order() {
    let frame = common::uniform_frame(3, 5, [10, 20, 30]);
    let ch = frame.channels();
    assert!(ch.blue.iter().all(|&v| v == 10.0));
    assert!(ch.green.iter().all(|&v| v == 20.0));
    assert!(ch.red.iter().all(|&v| v == 30.0));
    assert_eq!(ch.red.dim(), (3, 5));
}
