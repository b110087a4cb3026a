//! Pixel buffer layout descriptors.

use std::fmt;

use crate::error::{PxfxError, Result};

/// Number and meaning of channels in a packed pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channels {
    /// Red, green, blue. Alpha is implicitly opaque.
    Rgb,
    /// Alpha, red, green, blue.
    Argb,
}

impl Channels {
    /// Bytes per pixel.
    pub const fn count(self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Argb => 4,
        }
    }

    /// Check if the layout stores an alpha channel.
    pub const fn has_alpha(self) -> bool {
        matches!(self, Channels::Argb)
    }
}

impl TryFrom<usize> for Channels {
    type Error = PxfxError;

    fn try_from(channels: usize) -> Result<Self> {
        match channels {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Argb),
            _ => Err(PxfxError::UnsupportedFormat { channels }),
        }
    }
}

impl fmt::Display for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channels::Rgb => write!(f, "rgb"),
            Channels::Argb => write!(f, "argb"),
        }
    }
}

/// How the channels of a packed pixel are laid out in memory.
///
/// Pixels are treated as packed integers (`0xAARRGGBB` or `0xRRGGBB`) stored in
/// the platform's byte order, so on little-endian targets blue comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least-significant byte first: `[B, G, R]` / `[B, G, R, A]`.
    LittleEndian,
    /// Most-significant byte first: `[R, G, B]` / `[A, R, G, B]`.
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the executing target.
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        Self::native()
    }
}

/// Width, height and channel count of a raw pixel buffer.
///
/// `channels` stays a plain count so callers can pass whatever their
/// decoder reported; it is validated when a traversal starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }

    /// Bytes in one row, or `None` on overflow.
    pub fn row_bytes(&self) -> Option<usize> {
        self.width.checked_mul(self.channels)
    }

    /// Bytes a buffer with these dimensions must hold, or `None` on overflow.
    pub fn byte_len(&self) -> Option<usize> {
        self.row_bytes()?.checked_mul(self.height)
    }
}
