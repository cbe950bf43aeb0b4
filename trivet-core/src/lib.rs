pub mod convert;
pub mod error;
pub mod format;
pub mod recipe;
pub mod storage;

pub use convert::{UnitConverter, DEFAULT_TOLERANCE};
pub use error::{ConvertError, StorageError};
pub use format::{format_quantity, OutputFormat, RecipeFormatter, UnitPreferences};
pub use recipe::{Ingredient, Recipe, RecipeStep};
pub use storage::{
    load_densities, load_recipe, save_densities, save_recipe, RecipeBook,
};
