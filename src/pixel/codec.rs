//! Conversion between packed pixel bytes and [`Colour`] values.

use crate::types::Colour;

use super::layout::{ByteOrder, Channels};

/// Decodes and encodes single pixels for one channel layout and byte order.
///
/// A codec is built once per traversal so every pixel in that call sees the
/// same byte order. Decode and encode on the same codec always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCodec {
    channels: Channels,
    order: ByteOrder,
}

impl PixelCodec {
    /// Create a codec for the given layout and byte order.
    pub const fn new(channels: Channels, order: ByteOrder) -> Self {
        Self { channels, order }
    }

    /// Create a codec using the executing target's byte order.
    pub const fn native(channels: Channels) -> Self {
        Self::new(channels, ByteOrder::native())
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Bytes per pixel.
    pub fn stride(&self) -> usize {
        self.channels.count()
    }

    /// Read the pixel starting at `offset`.
    ///
    /// Returns `None` if the pixel does not fit inside `buf`. Three-channel
    /// pixels decode as fully opaque.
    pub fn decode(&self, buf: &[u8], offset: usize) -> Option<Colour> {
        let end = offset.checked_add(self.stride())?;
        let px = buf.get(offset..end)?;

        let colour = match (self.channels, self.order) {
            (Channels::Rgb, ByteOrder::LittleEndian) => Colour::rgb(px[2], px[1], px[0]),
            (Channels::Rgb, ByteOrder::BigEndian) => Colour::rgb(px[0], px[1], px[2]),
            (Channels::Argb, ByteOrder::LittleEndian) => {
                Colour::from_argb(px[3], px[2], px[1], px[0])
            }
            (Channels::Argb, ByteOrder::BigEndian) => {
                Colour::from_argb(px[0], px[1], px[2], px[3])
            }
        };

        Some(colour)
    }

    /// Write `colour` as the pixel starting at `offset`.
    ///
    /// Writes exactly [`stride`](Self::stride) bytes; alpha is dropped for
    /// three-channel layouts. Returns `false` and leaves `buf` untouched if
    /// the pixel does not fit.
    pub fn encode(&self, colour: Colour, buf: &mut [u8], offset: usize) -> bool {
        let Some(end) = offset.checked_add(self.stride()) else {
            return false;
        };
        let Some(px) = buf.get_mut(offset..end) else {
            return false;
        };

        let Colour { r, g, b, a } = colour;
        match (self.channels, self.order) {
            (Channels::Rgb, ByteOrder::LittleEndian) => px.copy_from_slice(&[b, g, r]),
            (Channels::Rgb, ByteOrder::BigEndian) => px.copy_from_slice(&[r, g, b]),
            (Channels::Argb, ByteOrder::LittleEndian) => px.copy_from_slice(&[b, g, r, a]),
            (Channels::Argb, ByteOrder::BigEndian) => px.copy_from_slice(&[a, r, g, b]),
        }

        true
    }
}

/// Decode one pixel using the native byte order.
///
/// Returns `None` for channel counts other than 3 or 4, or when the pixel
/// runs past the end of `buf`.
pub fn decode(buf: &[u8], offset: usize, channels: usize) -> Option<Colour> {
    let channels = Channels::try_from(channels).ok()?;
    PixelCodec::native(channels).decode(buf, offset)
}

/// Encode one pixel using the native byte order.
///
/// Returns `false` without writing for unsupported channel counts or
/// out-of-range offsets.
pub fn encode(colour: Colour, buf: &mut [u8], offset: usize, channels: usize) -> bool {
    match Channels::try_from(channels) {
        Ok(channels) => PixelCodec::native(channels).encode(colour, buf, offset),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LE_RGB: PixelCodec = PixelCodec::new(Channels::Rgb, ByteOrder::LittleEndian);
    const BE_RGB: PixelCodec = PixelCodec::new(Channels::Rgb, ByteOrder::BigEndian);
    const LE_ARGB: PixelCodec = PixelCodec::new(Channels::Argb, ByteOrder::LittleEndian);
    const BE_ARGB: PixelCodec = PixelCodec::new(Channels::Argb, ByteOrder::BigEndian);

    fn sample_colours() -> Vec<Colour> {
        vec![
            Colour::TRANSPARENT,
            Colour::BLACK,
            Colour::WHITE,
            Colour::new(1, 2, 3, 4),
            Colour::new(250, 0, 128, 77),
        ]
    }

    #[test]
    fn test_little_endian_layouts() {
        let buf = [10u8, 20, 30, 40];
        assert_eq!(LE_RGB.decode(&buf, 0), Some(Colour::rgb(30, 20, 10)));
        assert_eq!(LE_ARGB.decode(&buf, 0), Some(Colour::from_argb(40, 30, 20, 10)));
    }

    #[test]
    fn test_big_endian_layouts() {
        let buf = [10u8, 20, 30, 40];
        assert_eq!(BE_RGB.decode(&buf, 0), Some(Colour::rgb(10, 20, 30)));
        assert_eq!(BE_ARGB.decode(&buf, 0), Some(Colour::from_argb(10, 20, 30, 40)));
    }

    #[test]
    fn test_argb_roundtrip_keeps_alpha() {
        for codec in [LE_ARGB, BE_ARGB] {
            for colour in sample_colours() {
                let mut buf = [0u8; 4];
                assert!(codec.encode(colour, &mut buf, 0));
                assert_eq!(codec.decode(&buf, 0), Some(colour));
            }
        }
    }

    #[test]
    fn test_rgb_roundtrip_synthesises_opaque_alpha() {
        for codec in [LE_RGB, BE_RGB] {
            for colour in sample_colours() {
                let mut buf = [0u8; 3];
                codec.encode(colour, &mut buf, 0);
                let decoded = codec.decode(&buf, 0).unwrap();
                assert_eq!(decoded, colour.with_alpha(255));
            }
        }
    }

    #[test]
    fn test_encode_touches_only_its_pixel() {
        let mut buf = [0xAAu8; 10];
        assert!(LE_RGB.encode(Colour::rgb(1, 2, 3), &mut buf, 3));
        assert_eq!(buf, [0xAA, 0xAA, 0xAA, 3, 2, 1, 0xAA, 0xAA, 0xAA, 0xAA]);
    }

    #[test]
    fn test_out_of_range() {
        let mut buf = [0u8; 5];
        assert_eq!(LE_ARGB.decode(&buf, 2), None);
        assert_eq!(LE_ARGB.decode(&buf, usize::MAX), None);
        assert!(!LE_ARGB.encode(Colour::WHITE, &mut buf, 2));
        assert!(!LE_ARGB.encode(Colour::WHITE, &mut buf, usize::MAX - 1));
        assert_eq!(buf, [0; 5]);

        assert!(LE_ARGB.decode(&buf, 1).is_some());
    }

    #[test]
    fn test_free_functions_reject_bad_channels() {
        let mut buf = [0u8; 8];
        assert_eq!(decode(&buf, 0, 2), None);
        assert_eq!(decode(&buf, 0, 5), None);
        assert!(!encode(Colour::WHITE, &mut buf, 0, 1));
        assert_eq!(buf, [0; 8]);
    }

    #[test]
    fn test_free_functions_roundtrip() {
        let colour = Colour::new(9, 8, 7, 6);
        let mut buf = [0u8; 4];
        assert!(encode(colour, &mut buf, 0, 4));
        assert_eq!(decode(&buf, 0, 4), Some(colour));
    }
}
