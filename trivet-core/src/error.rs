use std::path::PathBuf;

use kitchen_units::UnitError;
use thiserror::Error;

/// Failures from the density registry and conversion engine.
///
/// All of these are deterministic functions of their inputs; none is
/// retryable, and none leaves the registry partially mutated.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("density for '{identifier}' must be mass per volume or its inverse, got {dimension}")]
    InvalidDensityDimension {
        identifier: String,
        dimension: String,
    },

    #[error("new density for {identifier} ({offered}) does not match earlier density ({current})")]
    InconsistentDensity {
        identifier: String,
        current: String,
        offered: String,
    },

    #[error(
        "no density known for '{}' in dimensional conversion",
        .identifier.as_deref().unwrap_or("none")
    )]
    NoDensityKnown { identifier: Option<String> },

    #[error("unable to convert {from} to {to} with density {density}")]
    UnconvertibleDimensions {
        from: String,
        to: String,
        density: String,
    },

    #[error(transparent)]
    Unit(#[from] UnitError),
}

/// Failures while loading or saving recipe and density files.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("could not serialize document: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}
