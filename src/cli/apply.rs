//! Apply command implementation.
//!
//! Decodes image files, runs an effect recipe over their pixels, and writes
//! the results to an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use walkdir::WalkDir;

use crate::effect::{Effect, Recipe};
use crate::error::{PxfxError, Result};
use crate::output::{display_path, plural, Printer};
use crate::pixel::Bitmap;
use crate::types::{Colour, DEFAULT_ACCURACY};

/// File extensions picked up when an input is a directory.
const IMAGE_EXTENSIONS: &[&str] = &["png", "bmp", "jpg", "jpeg", "tga", "tif", "tiff"];

/// Apply colour effects to image files
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Image files or directories to process
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Recipe file (YAML or JSON) listing effects to apply first
    #[arg(long)]
    pub recipe: Option<PathBuf>,

    /// Replace colours similar to FROM with TO
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    pub replace: Option<Vec<Colour>>,

    /// Convert to black and white at a grayscale threshold (0.0 - 1.0)
    #[arg(long, value_name = "THRESHOLD")]
    pub black_white: Option<f32>,

    /// Remap onto a two-colour gradient from LOW to HIGH
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"])]
    pub duotone: Option<Vec<Colour>>,

    /// Make colours similar to COLOUR fully transparent
    #[arg(long, value_name = "COLOUR")]
    pub transparent: Option<Colour>,

    /// Similarity budget for --replace and --transparent
    #[arg(long, default_value_t = DEFAULT_ACCURACY)]
    pub accuracy: u32,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,

    /// Worker threads for pixel processing (defaults to one per CPU)
    #[arg(long)]
    pub threads: Option<usize>,
}

pub fn run(args: ApplyArgs, printer: &Printer) -> Result<()> {
    let recipe = build_recipe(&args)?;

    if recipe.is_empty() {
        return Err(PxfxError::Validation {
            message: "No effects to apply".to_string(),
            help: Some(
                "Pass --recipe, --replace, --black-white, --duotone, or --transparent".to_string(),
            ),
        });
    }

    if let Some(threads) = args.threads {
        if rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .is_err()
        {
            printer.warning("Ignoring", "--threads: worker pool is already running");
        }
    }

    let files = collect_inputs(&args.inputs, printer);
    if files.is_empty() {
        return Err(PxfxError::Validation {
            message: "No image files found".to_string(),
            help: Some(format!("Supported extensions: {}", IMAGE_EXTENSIONS.join(", "))),
        });
    }

    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| PxfxError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    for effect in &recipe.effects {
        printer.info("Effect", &effect.to_string());
    }

    for file in &files {
        process_image(file, &recipe, &args.output, printer)?;
    }

    printer.success(
        "Finished",
        &format!(
            "{} to {}",
            plural(files.len(), "image", "images"),
            printer.cyan(&display_path(&args.output))
        ),
    );

    Ok(())
}

/// Assemble the effect chain: recipe file first, then command-line flags.
pub fn build_recipe(args: &ApplyArgs) -> Result<Recipe> {
    let mut recipe = match &args.recipe {
        Some(path) => Recipe::load(path)?,
        None => Recipe::default(),
    };

    if let Some([from, to]) = args.replace.as_deref() {
        recipe.push(Effect::replace_colour(*from, *to).with_accuracy(args.accuracy));
    }

    if let Some(threshold) = args.black_white {
        let effect = Effect::BlackWhite { threshold };
        effect.validate()?;
        recipe.push(effect);
    }

    if let Some([low, high]) = args.duotone.as_deref() {
        recipe.push(Effect::duotone(*low, *high));
    }

    if let Some(colour) = args.transparent {
        recipe.push(Effect::set_transparent(colour).with_accuracy(args.accuracy));
    }

    Ok(recipe)
}

/// Expand inputs into image files. Directories are walked recursively.
fn collect_inputs(inputs: &[PathBuf], printer: &Printer) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_image(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else if is_image(input) {
            files.push(input.clone());
        } else {
            printer.warning("Skipping", &format!("unsupported file {}", display_path(input)));
        }
    }

    files
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// Run the recipe over one image and write it to `output_dir`.
/// Returns the path written.
fn process_image(
    path: &Path,
    recipe: &Recipe,
    output_dir: &Path,
    printer: &Printer,
) -> Result<PathBuf> {
    let img = image::open(path).map_err(|e| PxfxError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to decode image: {}", e),
    })?;

    let mut bitmap = Bitmap::from_image(&img);
    printer.status(
        "Processing",
        &format!(
            "{} {}",
            display_path(path),
            printer.dim(&format!(
                "({}x{} {})",
                bitmap.width(),
                bitmap.height(),
                bitmap.channels()
            ))
        ),
    );

    let stats = recipe.apply(&mut bitmap)?;
    let total = bitmap.width() * bitmap.height();
    for (effect, stats) in recipe.effects.iter().zip(&stats) {
        printer.info(
            effect.type_name(),
            &format!("changed {} of {}", stats.changed, plural(total, "pixel", "pixels")),
        );
    }

    let file_name = path.file_name().ok_or_else(|| PxfxError::Io {
        path: path.to_path_buf(),
        message: "Input has no file name".to_string(),
    })?;
    let output_path = output_dir.join(file_name);

    bitmap
        .to_image()?
        .save(&output_path)
        .map_err(|e| PxfxError::Io {
            path: output_path.clone(),
            message: format!("Failed to write image: {}", e),
        })?;

    Ok(output_path)
}
