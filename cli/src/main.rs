use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kitchen_units::UnitRegistry;
use trivet_core::{
    format_quantity, load_densities, load_recipe, OutputFormat, RecipeFormatter, UnitConverter,
    UnitPreferences,
};

#[derive(Parser)]
#[command(name = "trivet")]
#[command(about = "Recipe book utility", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a recipe file to stdout
    Print {
        /// Recipe file (TOML)
        recipe_file: PathBuf,
        /// Unit preferences file
        #[arg(long)]
        prefs: Option<PathBuf>,
        /// Factor to scale the recipe by
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
    },
    /// Convert a quantity to another unit, bridging volume and mass
    /// through a registered density when needed
    Convert {
        /// Quantity to convert, e.g. "1 cup"
        quantity: String,
        /// Target unit, e.g. "g"
        unit: String,
        /// Density identifier (usually an ingredient name)
        #[arg(long)]
        identifier: Option<String>,
        /// Density file (TOML) to consult
        #[arg(long)]
        densities: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Html,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> OutputFormat {
        match format {
            Format::Markdown => OutputFormat::Markdown,
            Format::Html => OutputFormat::Html,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Print {
            recipe_file,
            prefs,
            scale,
            format,
        } => print_recipe(&recipe_file, prefs.as_deref(), scale, format.into()),
        Commands::Convert {
            quantity,
            unit,
            identifier,
            densities,
        } => convert(&quantity, &unit, identifier.as_deref(), densities.as_deref()),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

fn print_recipe(
    recipe_file: &Path,
    prefs: Option<&Path>,
    scale: f64,
    format: OutputFormat,
) -> Result<()> {
    let units = UnitRegistry::new();
    let preferences = match prefs {
        Some(path) => UnitPreferences::from_toml(&read(path)?, &units)?,
        None => UnitPreferences::new(),
    };

    let mut converter = UnitConverter::default();
    let recipe = load_recipe(&read(recipe_file)?, &units, &mut converter)?;

    let formatter = RecipeFormatter::new(&preferences, &converter).with_scale(scale);
    print!("{}", formatter.render(&recipe, format)?);
    Ok(())
}

fn convert(
    quantity: &str,
    unit: &str,
    identifier: Option<&str>,
    densities: Option<&Path>,
) -> Result<()> {
    let units = UnitRegistry::new();
    let converter = match densities {
        Some(path) => load_densities(&read(path)?, &units)?,
        None => UnitConverter::default(),
    };

    let in_quantity = units.parse_quantity(quantity)?;
    let out_unit = units.parse_unit(unit)?;
    let result = converter.convert(&in_quantity, &out_unit, identifier)?;
    println!("{}", format_quantity(&result));
    Ok(())
}
