//! Row-parallel per-pixel traversal.
//!
//! The buffer is split into rows of `width * channels` bytes. Rows are
//! disjoint slices, so rayon workers can mutate them concurrently without
//! locks; columns within a row are visited in order by one worker.

use std::ops::Add;

use rayon::prelude::*;

use crate::error::{PxfxError, Result};
use crate::types::Colour;

use super::codec::PixelCodec;
use super::layout::{ByteOrder, Channels, Dimensions};

/// Pixel counts gathered during a traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Pixels decoded and passed to the transform.
    pub visited: usize,
    /// Pixels the transform rewrote.
    pub changed: usize,
    /// Pixels that could not be decoded and were left as-is.
    pub skipped: usize,
}

impl Add for TraversalStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            visited: self.visited + rhs.visited,
            changed: self.changed + rhs.changed,
            skipped: self.skipped + rhs.skipped,
        }
    }
}

/// Configured traversal over one channel layout.
///
/// ```
/// use pxfx::pixel::{ByteOrder, Channels, Traversal};
/// use pxfx::Colour;
///
/// // 2x1 image, blue then red, packed BGR
/// let mut buf = [255u8, 0, 0, 0, 0, 255];
/// let stats = Traversal::new(Channels::Rgb)
///     .with_byte_order(ByteOrder::LittleEndian)
///     .run(&mut buf, 2, 1, |c| (c.r == 255).then_some(Colour::rgb(0, 255, 0)))
///     .unwrap();
///
/// assert_eq!(buf, [255, 0, 0, 0, 255, 0]);
/// assert_eq!(stats.changed, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Traversal {
    codec: PixelCodec,
    parallel: bool,
}

impl Traversal {
    /// Parallel traversal in the native byte order.
    pub fn new(channels: Channels) -> Self {
        Self {
            codec: PixelCodec::native(channels),
            parallel: true,
        }
    }

    /// Override the byte order pixels are packed in.
    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.codec = PixelCodec::new(self.codec.channels(), order);
        self
    }

    /// Process rows on the calling thread only.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn codec(&self) -> PixelCodec {
        self.codec
    }

    /// Apply `f` to every pixel of a `width` x `height` buffer, in place.
    ///
    /// `f` returns `None` to leave a pixel untouched. Pixels that run past the
    /// end of a short buffer are skipped rather than treated as an error.
    /// Bytes past `width * height * channels` are never read or written.
    pub fn run<F>(&self, buf: &mut [u8], width: usize, height: usize, f: F) -> Result<TraversalStats>
    where
        F: Fn(Colour) -> Option<Colour> + Sync,
    {
        let dims = Dimensions::new(width, height, self.codec.stride());
        let row_bytes = dims
            .row_bytes()
            .ok_or(PxfxError::Dimensions { width, height })?;

        if row_bytes == 0 || height == 0 {
            return Ok(TraversalStats::default());
        }

        let extent = dims.byte_len().map_or(buf.len(), |len| len.min(buf.len()));
        let rows = &mut buf[..extent];
        let codec = self.codec;

        let process_row = |row: &mut [u8]| -> TraversalStats {
            let mut stats = TraversalStats::default();

            for col in 0..width {
                let offset = col * codec.stride();
                let Some(colour) = codec.decode(row, offset) else {
                    stats.skipped += 1;
                    continue;
                };

                stats.visited += 1;
                if let Some(result) = f(colour) {
                    codec.encode(result, row, offset);
                    stats.changed += 1;
                }
            }

            stats
        };

        let mut stats = if self.parallel {
            rows.par_chunks_mut(row_bytes)
                .map(process_row)
                .reduce(TraversalStats::default, |a, b| a + b)
        } else {
            rows.chunks_mut(row_bytes)
                .map(process_row)
                .fold(TraversalStats::default(), |a, b| a + b)
        };

        // Rows missing entirely from a short buffer
        let present_rows = extent.div_ceil(row_bytes);
        stats.skipped += (height - present_rows.min(height)) * width;

        Ok(stats)
    }
}

/// Apply `f` to every pixel of a packed buffer, in place and in parallel.
///
/// `channels` must be 3 (RGB) or 4 (ARGB); anything else fails with
/// [`PxfxError::UnsupportedFormat`] before the buffer is touched. The native
/// byte order is captured once for the whole call.
pub fn for_each_pixel<F>(
    buf: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    f: F,
) -> Result<TraversalStats>
where
    F: Fn(Colour) -> Option<Colour> + Sync,
{
    let channels = Channels::try_from(channels)?;
    Traversal::new(channels).run(buf, width, height, f)
}
