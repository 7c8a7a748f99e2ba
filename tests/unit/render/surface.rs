use super::*;
use crate::foundation::core::Rgba8;

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b).all(|(&x, y)| x.abs_diff(y) <= 2)
}

fn split_frame(width: u32, height: u32, left: Rgba8, right: Rgba8) -> Frame {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..height {
        for x in 0..width {
            let c = if x < width / 2 { left } else { right };
            data.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }
    Frame::from_rgba8(width, height, data)
}

#[test]
fn surface_matches_frame_dimensions_and_pixels() {
    let frame = Frame::solid(33, 17, Rgba8::rgb(10, 200, 30));
    let s = Surface::normalize(&frame, false).unwrap();
    assert_eq!(s.canvas(), frame.canvas());
    assert_eq!(s.data().len(), 33 * 17 * 4);
    assert!(close(s.pixel(0, 0).unwrap(), [10, 200, 30, 255]));
    assert!(close(s.pixel(32, 16).unwrap(), [10, 200, 30, 255]));
    assert!(s.pixel(33, 0).is_none());
}

#[test]
fn mirror_flips_the_scene_once() {
    let red = Rgba8::rgb(255, 0, 0);
    let blue = Rgba8::rgb(0, 0, 255);
    let frame = split_frame(40, 8, red, blue);

    let plain = Surface::normalize(&frame, false).unwrap();
    assert!(close(plain.pixel(2, 4).unwrap(), [255, 0, 0, 255]));
    assert!(close(plain.pixel(37, 4).unwrap(), [0, 0, 255, 255]));

    let flipped = Surface::normalize(&frame, true).unwrap();
    assert!(close(flipped.pixel(2, 4).unwrap(), [0, 0, 255, 255]));
    assert!(close(flipped.pixel(37, 4).unwrap(), [255, 0, 0, 255]));
}

#[test]
fn translucent_frames_are_premultiplied() {
    let frame = Frame::solid(4, 4, Rgba8::rgba(200, 100, 0, 128));
    let s = Surface::normalize(&frame, false).unwrap();
    assert!(close(s.pixel(1, 1).unwrap(), [100, 50, 0, 128]));
}

#[test]
fn transform_scope_resets_on_drop() {
    let pixmap = render_layer(20, 4, |ctx| {
        {
            let mut scoped = TransformScope::new(ctx, mirror_transform(20));
            scoped.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 0, 0, 255));
            scoped.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 5.0, 4.0));
        }
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 255, 0, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 5.0, 4.0));
    });
    let d = pixmap.data_as_u8_slice();
    let px = |x: usize| [d[x * 4], d[x * 4 + 1], d[x * 4 + 2], d[x * 4 + 3]];
    // Mirrored draw lands on the right edge; the unscoped one stays on the left.
    assert!(close(px(18), [255, 0, 0, 255]));
    assert!(close(px(1), [0, 255, 0, 255]));
    assert_eq!(px(10), [0, 0, 0, 0]);
}

#[test]
fn zero_sized_frame_is_invalid() {
    let frame = Frame::from_rgba8(0, 10, Vec::new());
    assert!(matches!(
        Surface::normalize(&frame, false),
        Err(StampError::InvalidFrame(_))
    ));
}
