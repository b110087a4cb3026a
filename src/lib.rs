//! pxfx - Pixel colour effects for presentation images
//!
//! Rewrites the pixels of a raw packed buffer in place: replacing a colour,
//! thresholding to black and white, or remapping onto a duotone gradient.
//! Decoding and encoding image files is left to the caller; the engine only
//! needs the bytes, the dimensions, and the channel count.
//!
//! ```
//! use pxfx::{replace_colour, Colour, Dimensions};
//!
//! let mut buf = vec![0u8; 4 * 4 * 4];
//! let stats = replace_colour(
//!     &mut buf,
//!     Dimensions::new(4, 4, 4),
//!     Colour::TRANSPARENT,
//!     Colour::WHITE,
//! )
//! .unwrap();
//!
//! assert_eq!(stats.changed, 16);
//! ```

pub mod cli;
pub mod effect;
pub mod error;
pub mod output;
pub mod pixel;
pub mod types;

pub use effect::{
    black_white_threshold, duotone, replace_colour, set_transparent_colour, Effect, Recipe,
};
pub use error::{PxfxError, Result};
pub use pixel::{
    for_each_pixel, Bitmap, ByteOrder, Channels, Dimensions, PixelCodec, Traversal,
    TraversalStats,
};
pub use types::{colour_difference, is_similar, is_similar_within, Colour, DEFAULT_ACCURACY};
