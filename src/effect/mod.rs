//! Colour effects applied to packed pixel buffers.
//!
//! Every effect is a stateless value whose [`Effect::transform`] is a pure
//! `Colour -> Option<Colour>` function, handed to the traversal engine.
//!
//! # Example
//!
//! ```yaml
//! effects:
//!   - type: replace-colour
//!     from: "#FF0000"
//!     to: lime
//!   - type: black-white
//!     threshold: 0.5
//! ```

mod recipe;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PxfxError, Result};
use crate::pixel::{for_each_pixel, Bitmap, Dimensions, TraversalStats};
use crate::types::{is_similar_within, Colour, DEFAULT_ACCURACY};

pub use recipe::Recipe;

/// A per-pixel colour effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Effect {
    /// Replaces colours similar to `from` with `to`.
    ReplaceColour {
        from: Colour,
        to: Colour,
        /// Similarity budget (default: 36).
        #[serde(default = "default_accuracy")]
        accuracy: u32,
    },

    /// Maps pixels to black or white by grayscale, keeping alpha.
    BlackWhite {
        /// Grayscale at or above which a pixel turns white (0.0 - 1.0).
        threshold: f32,
    },

    /// Remaps pixels onto the `low -> high` gradient by grayscale.
    Duotone { low: Colour, high: Colour },

    /// Makes colours similar to `colour` fully transparent, or swaps them for
    /// `replacement` when one is given.
    SetTransparent {
        colour: Colour,
        /// Similarity budget (default: 36).
        #[serde(default = "default_accuracy")]
        accuracy: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        replacement: Option<Colour>,
    },
}

fn default_accuracy() -> u32 {
    DEFAULT_ACCURACY
}

impl Effect {
    /// Create a replace-colour effect with the default accuracy.
    pub fn replace_colour(from: Colour, to: Colour) -> Self {
        Self::ReplaceColour {
            from,
            to,
            accuracy: DEFAULT_ACCURACY,
        }
    }

    /// Create a black/white effect.
    pub fn black_white(threshold: f32) -> Self {
        Self::BlackWhite {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Create a duotone effect.
    pub fn duotone(low: Colour, high: Colour) -> Self {
        Self::Duotone { low, high }
    }

    /// Create a set-transparent effect with the default accuracy.
    pub fn set_transparent(colour: Colour) -> Self {
        Self::SetTransparent {
            colour,
            accuracy: DEFAULT_ACCURACY,
            replacement: None,
        }
    }

    /// Write `colour` over matches instead of clearing their alpha.
    /// No-op for effects other than set-transparent.
    pub fn with_replacement(mut self, colour: Colour) -> Self {
        if let Self::SetTransparent { replacement, .. } = &mut self {
            *replacement = Some(colour);
        }
        self
    }

    /// Use a different similarity budget. No-op for effects without one.
    pub fn with_accuracy(mut self, value: u32) -> Self {
        match &mut self {
            Self::ReplaceColour { accuracy, .. } | Self::SetTransparent { accuracy, .. } => {
                *accuracy = value;
            }
            Self::BlackWhite { .. } | Self::Duotone { .. } => {}
        }
        self
    }

    /// Get the effect type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Effect::ReplaceColour { .. } => "replace-colour",
            Effect::BlackWhite { .. } => "black-white",
            Effect::Duotone { .. } => "duotone",
            Effect::SetTransparent { .. } => "set-transparent",
        }
    }

    /// Check parameters that the type system cannot.
    pub fn validate(&self) -> Result<()> {
        match self {
            Effect::BlackWhite { threshold } if !(0.0..=1.0).contains(threshold) => {
                Err(PxfxError::Validation {
                    message: format!("black-white threshold {} is out of range", threshold),
                    help: Some("Thresholds are grayscale levels between 0.0 and 1.0".to_string()),
                })
            }
            _ => Ok(()),
        }
    }

    /// Compute the new value of one pixel, or `None` to leave it unchanged.
    pub fn transform(&self, colour: Colour) -> Option<Colour> {
        match *self {
            Effect::ReplaceColour { from, to, accuracy } => {
                is_similar_within(colour, from, accuracy).then_some(to)
            }
            Effect::BlackWhite { threshold } => {
                let level = if colour.grayscale() >= threshold {
                    Colour::WHITE
                } else {
                    Colour::BLACK
                };
                // The luminance decision must never alter transparency
                Some(level.with_alpha(colour.a))
            }
            Effect::Duotone { low, high } => Some(colour.duotone(low, high)),
            Effect::SetTransparent {
                colour: target,
                accuracy,
                replacement,
            } => is_similar_within(colour, target, accuracy)
                .then(|| replacement.unwrap_or(colour.with_alpha(0))),
        }
    }

    /// Apply this effect to a raw packed buffer in place.
    pub fn apply(&self, buf: &mut [u8], dims: Dimensions) -> Result<TraversalStats> {
        for_each_pixel(buf, dims.width, dims.height, dims.channels, |c| {
            self.transform(c)
        })
    }

    /// Apply this effect to a bitmap in place.
    pub fn apply_to_bitmap(&self, bitmap: &mut Bitmap) -> Result<TraversalStats> {
        bitmap.for_each_pixel(|c| self.transform(c))
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::ReplaceColour { from, to, .. } => write!(f, "replace-colour {} -> {}", from, to),
            Effect::BlackWhite { threshold } => write!(f, "black-white at {:.2}", threshold),
            Effect::Duotone { low, high } => write!(f, "duotone {} .. {}", low, high),
            Effect::SetTransparent {
                colour,
                replacement: Some(to),
                ..
            } => write!(f, "set-transparent {} -> {}", colour, to),
            Effect::SetTransparent { colour, .. } => write!(f, "set-transparent {}", colour),
        }
    }
}

/// Replace colours similar to `from` with `to`.
pub fn replace_colour(
    buf: &mut [u8],
    dims: Dimensions,
    from: Colour,
    to: Colour,
) -> Result<TraversalStats> {
    Effect::replace_colour(from, to).apply(buf, dims)
}

/// Turn every pixel black or white by grayscale, keeping alpha.
///
/// `threshold` is clamped to `[0, 1]`.
pub fn black_white_threshold(
    buf: &mut [u8],
    dims: Dimensions,
    threshold: f32,
) -> Result<TraversalStats> {
    Effect::black_white(threshold).apply(buf, dims)
}

/// Remap every pixel onto the `low -> high` gradient by grayscale.
pub fn duotone(
    buf: &mut [u8],
    dims: Dimensions,
    low: Colour,
    high: Colour,
) -> Result<TraversalStats> {
    Effect::duotone(low, high).apply(buf, dims)
}

/// Make colours similar to `colour` fully transparent.
///
/// Three-channel buffers have nowhere to store alpha, so matching pixels are
/// rewritten with their own RGB and look unchanged.
pub fn set_transparent_colour(
    buf: &mut [u8],
    dims: Dimensions,
    colour: Colour,
) -> Result<TraversalStats> {
    Effect::set_transparent(colour).apply(buf, dims)
}
