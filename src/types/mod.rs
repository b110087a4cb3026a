//! Core domain types for pxfx.
//!
//! - `Colour` - RGBA colour values, grayscale and duotone math
//! - `similarity` - redmean colour distance and the similarity policy

mod colour;
pub mod similarity;

pub use colour::Colour;
pub use similarity::{colour_difference, is_similar, is_similar_within, DEFAULT_ACCURACY};
