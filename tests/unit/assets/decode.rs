use std::io::Cursor;

use super::*;

#[test]
fn decode_png_keeps_straight_rgba() {
    let img = image::RgbaImage::from_raw(2, 1, vec![10u8, 20, 30, 255, 200, 100, 50, 128]).unwrap();
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let frame = decode_frame(&bytes).unwrap();
    assert_eq!((frame.width, frame.height), (2, 1));
    assert_eq!(frame.data, vec![10, 20, 30, 255, 200, 100, 50, 128]);
}

#[test]
fn garbage_bytes_are_an_invalid_frame() {
    let err = decode_frame(b"not an image").unwrap_err();
    assert!(matches!(err, StampError::InvalidFrame(_)));
}
