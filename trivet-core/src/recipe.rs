//! The recipe data model.
//!
//! Plain immutable data. Quantities are already-parsed [`Quantity`] values;
//! turning text into these lives in [`crate::storage`].

use kitchen_units::Quantity;

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    /// Human-readable item name ("Water", "Arborio rice").
    pub item: String,
    pub quantity: Quantity,
    /// Key into the density registry, when the ingredient has one.
    pub identifier: Option<String>,
    /// Preference category ("bulk_solid", "liquid") used to pick a display unit.
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// One step of the procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeStep {
    pub description: String,
    /// Optional grouping label for multi-part recipes.
    pub group: Option<String>,
    /// Expected duration, when one is worth stating.
    pub time: Option<Quantity>,
}

/// A complete recipe.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recipe {
    pub name: String,
    pub comments: Option<String>,
    pub references: Vec<String>,
    pub tools: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<RecipeStep>,
}

impl Recipe {
    /// Identifiers of every ingredient that names one, deduplicated,
    /// in first-appearance order.
    pub fn density_identifiers(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for ingredient in &self.ingredients {
            if let Some(id) = ingredient.identifier.as_deref() {
                if !seen.contains(&id) {
                    seen.push(id);
                }
            }
        }
        seen
    }
}
