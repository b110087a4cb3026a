//! Perceptual colour distance and the similarity policy built on it.
//!
//! Distance is the "redmean" weighted Euclidean distance in RGB space, which
//! tracks human sensitivity better than plain RGB distance at a fraction of
//! the cost of a Lab conversion.

use super::Colour;

/// Tolerance used when no accuracy is given.
pub const DEFAULT_ACCURACY: u32 = 36;

/// Redmean-weighted Euclidean distance between two colours.
///
/// Alpha is ignored. Computed entirely in `f64`.
pub fn colour_difference(x: Colour, y: Colour) -> f64 {
    let m = (x.r as f64 + y.r as f64) / 2.0;
    let dr = x.r as f64 - y.r as f64;
    let dg = x.g as f64 - y.g as f64;
    let db = x.b as f64 - y.b as f64;

    ((2.0 + m / 256.0) * dr * dr + 4.0 * dg * dg + (2.0 + (255.0 - m) / 256.0) * db * db).sqrt()
}

/// Check whether two colours are similar under the default accuracy.
pub fn is_similar(x: Colour, y: Colour) -> bool {
    is_similar_within(x, y, DEFAULT_ACCURACY)
}

/// Check whether two colours are similar under a tolerance budget.
///
/// - Alpha channels more than 1 apart are never similar.
/// - A uniform shift (equal R, G and B offsets of magnitude > 1) must fit
///   within a third of `accuracy`.
/// - Anything else must fit within `accuracy`.
pub fn is_similar_within(x: Colour, y: Colour, accuracy: u32) -> bool {
    let offset_a = x.a as i16 - y.a as i16;
    if offset_a.abs() > 1 {
        return false;
    }

    let offset_r = x.r as i16 - y.r as i16;
    let offset_g = x.g as i16 - y.g as i16;
    let offset_b = x.b as i16 - y.b as i16;

    let difference = colour_difference(x, y);

    if offset_r == offset_g && offset_r == offset_b && offset_r.abs() > 1 {
        return difference <= accuracy as f64 / 3.0;
    }

    difference <= accuracy as f64
}

impl Colour {
    /// Redmean distance to another colour. See [`colour_difference`].
    pub fn difference(self, other: Colour) -> f64 {
        colour_difference(self, other)
    }

    /// Similarity under the default accuracy. See [`is_similar_within`].
    pub fn is_similar(self, other: Colour) -> bool {
        is_similar(self, other)
    }
}
