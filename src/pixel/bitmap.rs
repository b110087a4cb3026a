//! Owned packed-pixel buffer and its bridge to the `image` crate.

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::error::{PxfxError, Result};
use crate::types::Colour;

use super::codec::PixelCodec;
use super::layout::{Channels, Dimensions};
use super::traverse::{Traversal, TraversalStats};

/// A row-major packed pixel buffer in the native byte order.
///
/// The byte length always equals `width * height * channels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: Channels,
}

impl Bitmap {
    /// Wrap an existing packed buffer, checking its length.
    pub fn new(data: Vec<u8>, width: usize, height: usize, channels: Channels) -> Result<Self> {
        let expected = Dimensions::new(width, height, channels.count())
            .byte_len()
            .ok_or(PxfxError::Dimensions { width, height })?;

        if data.len() != expected {
            return Err(PxfxError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Create a bitmap filled with one colour.
    pub fn filled(width: usize, height: usize, channels: Channels, colour: Colour) -> Result<Self> {
        let len = Dimensions::new(width, height, channels.count())
            .byte_len()
            .ok_or(PxfxError::Dimensions { width, height })?;

        let codec = PixelCodec::native(channels);
        let mut pixel = [0u8; 4];
        codec.encode(colour, &mut pixel, 0);

        let data = pixel[..codec.stride()].repeat(len / codec.stride());
        Self::new(data, width, height, channels)
    }

    /// Pack a decoded image. Images with alpha become ARGB, others RGB.
    pub fn from_image(img: &DynamicImage) -> Self {
        let (width, height) = (img.width() as usize, img.height() as usize);

        let (channels, raw) = if img.color().has_alpha() {
            (Channels::Argb, img.to_rgba8().into_raw())
        } else {
            (Channels::Rgb, img.to_rgb8().into_raw())
        };

        let codec = PixelCodec::native(channels);
        let stride = codec.stride();
        let mut data = vec![0u8; raw.len()];

        for (i, px) in raw.chunks_exact(stride).enumerate() {
            let colour = match channels {
                Channels::Rgb => Colour::rgb(px[0], px[1], px[2]),
                Channels::Argb => Colour::new(px[0], px[1], px[2], px[3]),
            };
            codec.encode(colour, &mut data, i * stride);
        }

        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// Unpack into an RGB8 or RGBA8 image, matching the channel layout.
    pub fn to_image(&self) -> Result<DynamicImage> {
        let too_large = || PxfxError::Dimensions {
            width: self.width,
            height: self.height,
        };
        let width = u32::try_from(self.width).map_err(|_| too_large())?;
        let height = u32::try_from(self.height).map_err(|_| too_large())?;

        let codec = PixelCodec::native(self.channels);
        let mut raw = Vec::with_capacity(self.data.len());

        for offset in (0..self.data.len()).step_by(codec.stride()) {
            let colour = codec.decode(&self.data, offset).ok_or_else(too_large)?;
            match self.channels {
                Channels::Rgb => raw.extend_from_slice(&[colour.r, colour.g, colour.b]),
                Channels::Argb => raw.extend_from_slice(&colour.to_rgba()),
            }
        }

        let img = match self.channels {
            Channels::Rgb => RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
            Channels::Argb => RgbaImage::from_raw(width, height, raw).map(DynamicImage::ImageRgba8),
        };

        img.ok_or_else(too_large)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Dimensions in the form the effect entry points take.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height, self.channels.count())
    }

    /// Get the pixel at the given position.
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let codec = PixelCodec::native(self.channels);
        codec.decode(&self.data, (y * self.width + x) * codec.stride())
    }

    /// Get a reference to the packed bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get a mutable reference to the packed bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Take the packed bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Apply `f` to every pixel in parallel. See [`Traversal::run`].
    pub fn for_each_pixel<F>(&mut self, f: F) -> Result<TraversalStats>
    where
        F: Fn(Colour) -> Option<Colour> + Sync,
    {
        Traversal::new(self.channels).run(&mut self.data, self.width, self.height, f)
    }
}
