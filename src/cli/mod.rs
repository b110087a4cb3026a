pub mod apply;
pub mod compare;
pub mod completions;

use clap::{Parser, Subcommand};

/// pxfx - Pixel colour effects for presentation images
#[derive(Parser, Debug)]
#[command(name = "pxfx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply colour effects to image files
    Apply(apply::ApplyArgs),

    /// Measure the perceptual distance between two colours
    Compare(compare::CompareArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
