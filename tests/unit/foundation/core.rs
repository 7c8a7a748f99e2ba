use super::*;

#[test]
fn zero_sized_frames_are_invalid() {
    let f = Frame::from_rgba8(0, 1080, Vec::new());
    assert!(matches!(f.validate(), Err(StampError::InvalidFrame(_))));

    let f = Frame::from_rgba8(1920, 0, Vec::new());
    assert!(matches!(f.validate(), Err(StampError::InvalidFrame(_))));
}

#[test]
fn buffer_length_must_match_dimensions() {
    let f = Frame::from_rgba8(4, 4, vec![0u8; 4 * 4 * 4 - 1]);
    assert!(matches!(f.validate(), Err(StampError::InvalidFrame(_))));

    let f = Frame::solid(4, 4, Rgba8::BLACK);
    assert_eq!(
        f.validate().unwrap(),
        Canvas {
            width: 4,
            height: 4
        }
    );
}

#[test]
fn oversized_frames_are_invalid() {
    let f = Frame {
        width: 70_000,
        height: 1,
        data: Vec::new(),
    };
    assert!(matches!(f.validate(), Err(StampError::InvalidFrame(_))));
}

#[test]
fn unit_alpha_colors_round_like_css() {
    let c = Rgba8::with_unit_alpha(35, 25, 25, 0.85);
    assert_eq!(c.a, 217);
    assert_eq!(Rgba8::with_unit_alpha(0, 0, 0, 0.8).a, 204);
}
