//! Compare command implementation.

use clap::Args;
use serde::Serialize;

use crate::error::{PxfxError, Result};
use crate::output::Printer;
use crate::types::{colour_difference, is_similar_within, Colour, DEFAULT_ACCURACY};

/// Measure the perceptual distance between two colours
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First colour (hex or CSS name)
    pub a: Colour,

    /// Second colour (hex or CSS name)
    pub b: Colour,

    /// Similarity budget
    #[arg(long, default_value_t = DEFAULT_ACCURACY)]
    pub accuracy: u32,

    /// Print the comparison as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Result of comparing two colours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub a: Colour,
    pub b: Colour,
    pub difference: f64,
    pub accuracy: u32,
    pub similar: bool,
    pub grayscale: [f32; 2],
}

/// Compare two colours under a similarity budget.
pub fn compare(a: Colour, b: Colour, accuracy: u32) -> Comparison {
    Comparison {
        a,
        b,
        difference: colour_difference(a, b),
        accuracy,
        similar: is_similar_within(a, b, accuracy),
        grayscale: [a.grayscale(), b.grayscale()],
    }
}

pub fn run(args: CompareArgs, printer: &Printer) -> Result<()> {
    let comparison = compare(args.a, args.b, args.accuracy);

    if args.json {
        let json = serde_json::to_string_pretty(&comparison).map_err(|e| PxfxError::Parse {
            message: format!("Failed to serialise comparison: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    let verdict = if comparison.similar {
        "similar"
    } else {
        "different"
    };
    printer.status(
        "Compared",
        &format!(
            "{} and {}: {} {}",
            comparison.a,
            comparison.b,
            printer.bold(verdict),
            printer.dim(&format!(
                "(distance {:.3}, budget {})",
                comparison.difference, comparison.accuracy
            ))
        ),
    );

    Ok(())
}
