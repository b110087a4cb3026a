//! Effect recipes loaded from YAML or JSON.
//!
//! A recipe is an ordered list of effects applied one after another:
//!
//! ```yaml
//! effects:
//!   - type: set-transparent
//!     colour: white
//!   - type: duotone
//!     low: "#1A1A2E"
//!     high: "#F5C518"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PxfxError, Result};
use crate::pixel::{Bitmap, TraversalStats};

use super::Effect;

/// An ordered chain of effects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Effects, applied in order.
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl Recipe {
    pub fn new(effects: Vec<Effect>) -> Self {
        Self { effects }
    }

    /// Load a recipe file. `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PxfxError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read recipe: {}", e),
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse(&content)
        }
    }

    /// Parse a recipe from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let recipe: Self = serde_yaml::from_str(content).map_err(|e| PxfxError::Parse {
            message: format!("Invalid recipe: {}", e),
            help: Some("Check the recipe's YAML syntax".to_string()),
        })?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Parse a recipe from a JSON string.
    pub fn parse_json(content: &str) -> Result<Self> {
        let recipe: Self = serde_json::from_str(content).map_err(|e| PxfxError::Parse {
            message: format!("Invalid recipe: {}", e),
            help: Some("Check the recipe's JSON syntax".to_string()),
        })?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Validate every effect in the recipe.
    pub fn validate(&self) -> Result<()> {
        self.effects.iter().try_for_each(Effect::validate)
    }

    /// Append an effect.
    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Apply every effect to `bitmap` in order, returning per-effect stats.
    pub fn apply(&self, bitmap: &mut Bitmap) -> Result<Vec<TraversalStats>> {
        self.effects
            .iter()
            .map(|effect| effect.apply_to_bitmap(bitmap))
            .collect()
    }
}
