//! End-to-end behaviour of the traversal engine and the effect entry points.

use pretty_assertions::assert_eq;
use pxfx::pixel::PixelCodec;
use pxfx::{
    black_white_threshold, duotone, for_each_pixel, replace_colour, set_transparent_colour,
    Bitmap, ByteOrder, Channels, Colour, Dimensions, Effect, PxfxError, Traversal,
};

fn hex_row(bitmap: &Bitmap, y: usize) -> String {
    (0..bitmap.width())
        .filter_map(|x| bitmap.get(x, y))
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn pack(colours: &[Colour], channels: Channels) -> Vec<u8> {
    let codec = PixelCodec::native(channels);
    let mut buf = vec![0u8; colours.len() * codec.stride()];
    for (i, colour) in colours.iter().enumerate() {
        codec.encode(*colour, &mut buf, i * codec.stride());
    }
    buf
}

#[test]
fn replace_red_with_green_in_bgr_buffer() {
    // Blue then red, packed little-endian BGR
    let mut buf = [255u8, 0, 0, 0, 0, 255];
    let effect = Effect::replace_colour(Colour::rgb(255, 0, 0), Colour::rgb(0, 255, 0));

    let stats = Traversal::new(Channels::Rgb)
        .with_byte_order(ByteOrder::LittleEndian)
        .run(&mut buf, 2, 1, |c| effect.transform(c))
        .unwrap();

    assert_eq!(buf, [255, 0, 0, 0, 255, 0]);
    assert_eq!(stats.changed, 1);
    assert_eq!(stats.visited, 2);
}

#[test]
fn replace_colour_entry_point_uses_native_order() {
    let mut bitmap = Bitmap::new(
        pack(&[Colour::rgb(0, 0, 255), Colour::rgb(255, 0, 0)], Channels::Rgb),
        2,
        1,
        Channels::Rgb,
    )
    .unwrap();
    let dims = bitmap.dimensions();

    replace_colour(
        bitmap.data_mut(),
        dims,
        Colour::rgb(255, 0, 0),
        Colour::rgb(0, 255, 0),
    )
    .unwrap();

    insta::assert_snapshot!(hex_row(&bitmap, 0), @"#0000FF #00FF00");
}

#[test]
fn mid_gray_threshold_boundary() {
    let gray = Colour::rgb(128, 128, 128);

    let mut buf = pack(&[gray], Channels::Argb);
    black_white_threshold(&mut buf, Dimensions::new(1, 1, 4), 0.5).unwrap();
    assert_eq!(buf, pack(&[Colour::WHITE], Channels::Argb));

    let mut buf = pack(&[gray], Channels::Argb);
    black_white_threshold(&mut buf, Dimensions::new(1, 1, 4), 0.51).unwrap();
    assert_eq!(buf, pack(&[Colour::BLACK], Channels::Argb));
}

#[test]
fn black_white_never_touches_alpha() {
    let colours = [
        Colour::new(250, 250, 250, 0),
        Colour::new(10, 10, 10, 64),
        Colour::new(200, 40, 90, 255),
    ];
    let mut buf = pack(&colours, Channels::Argb);
    black_white_threshold(&mut buf, Dimensions::new(3, 1, 4), 0.3).unwrap();

    let bitmap = Bitmap::new(buf, 3, 1, Channels::Argb).unwrap();
    let alphas: Vec<u8> = (0..3).map(|x| bitmap.get(x, 0).unwrap().a).collect();
    assert_eq!(alphas, vec![0, 64, 255]);
}

#[test]
fn duotone_preserves_alpha_and_endpoints() {
    let low = Colour::rgb(0x1A, 0x1A, 0x2E);
    let high = Colour::rgb(0xF5, 0xC5, 0x18);
    let colours = [Colour::new(0, 0, 0, 10), Colour::new(255, 255, 255, 20)];

    let mut bitmap = Bitmap::new(pack(&colours, Channels::Argb), 2, 1, Channels::Argb).unwrap();
    let dims = bitmap.dimensions();
    duotone(bitmap.data_mut(), dims, low, high).unwrap();

    assert_eq!(bitmap.get(0, 0), Some(low.with_alpha(10)));
    assert_eq!(bitmap.get(1, 0), Some(high.with_alpha(20)));
}

#[test]
fn duotone_interpolates_mid_gray_by_truncation() {
    let low = Colour::rgb(20, 40, 0);
    let high = Colour::rgb(100, 60, 10);
    let colours = [Colour::new(128, 128, 128, 77), Colour::rgb(128, 128, 128)];

    let mut buf = pack(&colours, Channels::Argb);
    let stats = duotone(&mut buf, Dimensions::new(2, 1, 4), low, high).unwrap();

    assert_eq!(stats.changed, 2);
    assert_eq!(
        buf,
        pack(&[Colour::new(60, 50, 5, 77), Colour::rgb(60, 50, 5)], Channels::Argb)
    );
}

#[test]
fn set_transparent_clears_alpha_of_matches_only() {
    let colours = [Colour::WHITE, Colour::rgb(0, 128, 255), Colour::rgb(253, 254, 255)];
    let mut bitmap = Bitmap::new(pack(&colours, Channels::Argb), 3, 1, Channels::Argb).unwrap();
    let dims = bitmap.dimensions();

    let stats = set_transparent_colour(bitmap.data_mut(), dims, Colour::WHITE).unwrap();

    assert_eq!(stats.changed, 2);
    assert_eq!(bitmap.get(0, 0), Some(Colour::new(255, 255, 255, 0)));
    assert_eq!(bitmap.get(1, 0), Some(Colour::rgb(0, 128, 255)));
    assert_eq!(bitmap.get(2, 0), Some(Colour::new(253, 254, 255, 0)));
}

#[test]
fn truncated_pixel_does_not_abort_traversal() {
    // 3x2 ARGB image with the final pixel cut short by one byte
    let colours = [Colour::rgb(255, 0, 0); 6];
    let mut buf = pack(&colours, Channels::Argb);
    buf.pop();

    let stats = replace_colour(
        &mut buf,
        Dimensions::new(3, 2, 4),
        Colour::rgb(255, 0, 0),
        Colour::rgb(0, 0, 255),
    )
    .unwrap();

    assert_eq!(stats.visited, 5);
    assert_eq!(stats.changed, 5);
    assert_eq!(stats.skipped, 1);

    let expected = pack(&[Colour::rgb(0, 0, 255); 5], Channels::Argb);
    assert_eq!(&buf[..20], &expected[..]);
    assert_eq!(buf.len(), 23);
}

#[test]
fn unsupported_channel_count_mutates_nothing() {
    let mut buf = vec![42u8; 20];
    let err = duotone(
        &mut buf,
        Dimensions::new(2, 2, 5),
        Colour::BLACK,
        Colour::WHITE,
    )
    .unwrap_err();

    assert!(matches!(err, PxfxError::UnsupportedFormat { channels: 5 }));
    assert_eq!(buf, vec![42u8; 20]);
}

#[test]
fn rgb_buffers_keep_every_byte_outside_rgb() {
    // 3-channel buffers have no alpha byte to corrupt; neighbours stay intact
    let colours = [Colour::rgb(10, 20, 30), Colour::rgb(255, 0, 0), Colour::rgb(40, 50, 60)];
    let mut buf = pack(&colours, Channels::Rgb);

    for_each_pixel(&mut buf, 3, 1, 3, |c| {
        (c == Colour::rgb(255, 0, 0)).then_some(Colour::new(0, 255, 0, 0))
    })
    .unwrap();

    assert_eq!(
        buf,
        pack(
            &[Colour::rgb(10, 20, 30), Colour::rgb(0, 255, 0), Colour::rgb(40, 50, 60)],
            Channels::Rgb
        )
    );
}

#[test]
fn large_image_matches_sequential_result() {
    let (width, height) = (257, 131);
    let source: Vec<u8> = (0..width * height * 4).map(|i| (i * 7 % 251) as u8).collect();
    let effect = Effect::duotone(Colour::rgb(20, 0, 60), Colour::rgb(255, 220, 120));

    let mut parallel = source.clone();
    effect.apply(&mut parallel, Dimensions::new(width, height, 4)).unwrap();

    let mut sequential = source;
    Traversal::new(Channels::Argb)
        .sequential()
        .run(&mut sequential, width, height, |c| effect.transform(c))
        .unwrap();

    assert!(parallel == sequential);
}
