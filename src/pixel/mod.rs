//! Packed pixel buffers and the per-pixel traversal engine.
//!
//! - `layout` - channel layouts, byte order and buffer dimensions
//! - `codec` - reading and writing one pixel at a byte offset
//! - `traverse` - row-parallel application of a transform to every pixel
//! - `bitmap` - an owned, length-checked buffer bridged to the `image` crate

mod bitmap;
mod codec;
mod layout;
mod traverse;

pub use bitmap::Bitmap;
pub use codec::{decode, encode, PixelCodec};
pub use layout::{ByteOrder, Channels, Dimensions};
pub use traverse::{for_each_pixel, Traversal, TraversalStats};
