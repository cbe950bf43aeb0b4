//! TOML storage for recipes and density files.
//!
//! Documents are deserialized into raw string-field shapes first, then
//! resolved into model types through an explicit [`UnitRegistry`]. A
//! recipe document may carry a `[densities]` table; those observations are
//! fed into the shared converter before any ingredient is resolved, so a
//! recipe can rely on densities it declares itself.
//!
//! Density files persist the registry's tolerance alongside the values:
//!
//! ```toml
//! tolerance = 0.001
//!
//! [densities]
//! rice = "180 g/cup"
//! water = "240 g/cup"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use kitchen_units::{Dimension, UnitRegistry};

use crate::convert::{UnitConverter, DEFAULT_TOLERANCE};
use crate::error::StorageError;
use crate::format::UnitPreferences;
use crate::recipe::{Ingredient, Recipe, RecipeStep};

/// File name of the book-wide density registry inside a book directory.
pub const DENSITY_FILE: &str = "densities.toml";
/// File name of the book-wide unit preferences inside a book directory.
pub const PREFERENCES_FILE: &str = "preferences.toml";

// =============================================================================
// Raw document shapes
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct RecipeDoc {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comments: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    references: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tools: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    densities: BTreeMap<String, String>,
    #[serde(default)]
    ingredients: Vec<IngredientDoc>,
    #[serde(default)]
    steps: Vec<StepDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct IngredientDoc {
    item: String,
    quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StepDoc {
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DensityFileDoc {
    #[serde(default = "default_tolerance")]
    tolerance: f64,
    #[serde(default)]
    densities: BTreeMap<String, String>,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

// =============================================================================
// Recipe documents
// =============================================================================

/// Parse a recipe document, feeding its `[densities]` table into
/// `converter` before ingredient quantities are resolved.
pub fn load_recipe(
    text: &str,
    units: &UnitRegistry,
    converter: &mut UnitConverter,
) -> Result<Recipe, StorageError> {
    let doc: RecipeDoc = toml::from_str(text)?;
    for (identifier, value) in &doc.densities {
        converter.add_density(identifier, units.parse_quantity(value)?)?;
    }
    let ingredients = doc
        .ingredients
        .into_iter()
        .map(|i| {
            Ok(Ingredient {
                quantity: units.parse_quantity(&i.quantity)?,
                item: i.item,
                identifier: i.identifier,
                category: i.category,
                notes: i.notes,
            })
        })
        .collect::<Result<Vec<_>, StorageError>>()?;
    let steps = doc
        .steps
        .into_iter()
        .map(|s| {
            Ok(RecipeStep {
                time: s
                    .time
                    .map(|t| units.parse_quantity_checked(&t, Dimension::TIME))
                    .transpose()?,
                description: s.description,
                group: s.group,
            })
        })
        .collect::<Result<Vec<_>, StorageError>>()?;
    Ok(Recipe {
        name: doc.name,
        comments: doc.comments,
        references: doc.references,
        tools: doc.tools,
        ingredients,
        steps,
    })
}

/// Serialize a recipe back to TOML.
///
/// With `densities` given, the densities registered for the recipe's own
/// ingredient identifiers are written into a `[densities]` table so the
/// document stays self-contained.
pub fn save_recipe(
    recipe: &Recipe,
    densities: Option<&UnitConverter>,
) -> Result<String, StorageError> {
    let mut density_table = BTreeMap::new();
    if let Some(converter) = densities {
        for identifier in recipe.density_identifiers() {
            if let Some(density) = converter.get_density(identifier) {
                density_table.insert(identifier.to_string(), density.to_string());
            }
        }
    }
    let doc = RecipeDoc {
        name: recipe.name.clone(),
        comments: recipe.comments.clone(),
        references: recipe.references.clone(),
        tools: recipe.tools.clone(),
        densities: density_table,
        ingredients: recipe
            .ingredients
            .iter()
            .map(|i| IngredientDoc {
                item: i.item.clone(),
                quantity: i.quantity.to_string(),
                identifier: i.identifier.clone(),
                category: i.category.clone(),
                notes: i.notes.clone(),
            })
            .collect(),
        steps: recipe
            .steps
            .iter()
            .map(|s| StepDoc {
                description: s.description.clone(),
                group: s.group.clone(),
                time: s.time.as_ref().map(|t| t.to_string()),
            })
            .collect(),
    };
    Ok(toml::to_string(&doc)?)
}

// =============================================================================
// Density documents
// =============================================================================

/// Build a converter from a densities-only document. The document's
/// tolerance (default 0.001) configures the new registry.
pub fn load_densities(text: &str, units: &UnitRegistry) -> Result<UnitConverter, StorageError> {
    let doc: DensityFileDoc = toml::from_str(text)?;
    let mut converter = UnitConverter::new(doc.tolerance);
    for (identifier, value) in &doc.densities {
        converter.add_density(identifier, units.parse_quantity(value)?)?;
    }
    Ok(converter)
}

/// Serialize every registered density, with the registry tolerance.
pub fn save_densities(converter: &UnitConverter) -> Result<String, StorageError> {
    let doc = DensityFileDoc {
        tolerance: converter.tolerance(),
        densities: converter
            .densities()
            .map(|(identifier, density)| (identifier.to_string(), density.to_string()))
            .collect(),
    };
    Ok(toml::to_string(&doc)?)
}

// =============================================================================
// Directory-backed books
// =============================================================================

/// A directory of recipe files sharing one density registry and one set of
/// unit preferences.
///
/// Layout: every `*.toml` file is a recipe keyed by its file stem, except
/// [`DENSITY_FILE`] and [`PREFERENCES_FILE`], which configure the book.
#[derive(Debug)]
pub struct RecipeBook {
    recipes: BTreeMap<String, Recipe>,
    converter: UnitConverter,
    preferences: UnitPreferences,
}

impl RecipeBook {
    pub fn load_dir(dir: &Path, units: &UnitRegistry) -> Result<RecipeBook, StorageError> {
        let read = |path: &Path| {
            fs::read_to_string(path).map_err(|source| StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        let density_path = dir.join(DENSITY_FILE);
        let mut converter = if density_path.is_file() {
            load_densities(&read(&density_path)?, units)?
        } else {
            UnitConverter::default()
        };

        let preferences_path = dir.join(PREFERENCES_FILE);
        let preferences = if preferences_path.is_file() {
            UnitPreferences::from_toml(&read(&preferences_path)?, units)?
        } else {
            UnitPreferences::default()
        };

        let mut paths: Vec<_> = fs::read_dir(dir)
            .map_err(|source| StorageError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| name != DENSITY_FILE && name != PREFERENCES_FILE)
            })
            .collect();
        paths.sort();

        let mut recipes = BTreeMap::new();
        for path in paths {
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let recipe = load_recipe(&read(&path)?, units, &mut converter)?;
            tracing::debug!(key = %stem, name = %recipe.name, "loaded recipe");
            recipes.insert(stem, recipe);
        }
        tracing::info!(
            recipes = recipes.len(),
            densities = converter.len(),
            "loaded recipe book from {}",
            dir.display()
        );

        Ok(RecipeBook {
            recipes,
            converter,
            preferences,
        })
    }

    /// Recipe keys (file stems) in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Recipe> {
        self.recipes.get(key)
    }

    pub fn converter(&self) -> &UnitConverter {
        &self.converter
    }

    pub fn preferences(&self) -> &UnitPreferences {
        &self.preferences
    }
}
