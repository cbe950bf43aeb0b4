//! Recipe rendering and unit preferences.
//!
//! Output formats are a closed set; each renderer walks the same recipe
//! structure (comments, tools, ingredients, procedure, references) and the
//! ingredient quantities pass through the density-aware converter so each
//! category can be displayed in its preferred unit.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use kitchen_units::{Quantity, Unit, UnitRegistry};

use crate::convert::UnitConverter;
use crate::error::{ConvertError, StorageError};
use crate::recipe::{Ingredient, Recipe, RecipeStep};

/// The supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Html,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Markdown, OutputFormat::Html];

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Html => "text/html",
        }
    }
}

/// Preferred display units by ingredient category.
#[derive(Debug, Clone, Default)]
pub struct UnitPreferences {
    preferred: HashMap<String, Unit>,
}

#[derive(Debug, Deserialize)]
struct PreferencesDoc {
    #[serde(default)]
    preferences: BTreeMap<String, String>,
}

impl UnitPreferences {
    pub fn new() -> UnitPreferences {
        UnitPreferences::default()
    }

    /// Load a `[preferences]` table mapping category names to unit
    /// expressions:
    ///
    /// ```toml
    /// [preferences]
    /// bulk_solid = "g"
    /// liquid = "cup"
    /// ```
    pub fn from_toml(text: &str, units: &UnitRegistry) -> Result<UnitPreferences, StorageError> {
        let doc: PreferencesDoc = toml::from_str(text)?;
        let mut prefs = UnitPreferences::new();
        for (category, expression) in &doc.preferences {
            prefs.set_preference(category, units.parse_unit(expression)?);
        }
        Ok(prefs)
    }

    pub fn set_preference(&mut self, category: &str, unit: Unit) {
        self.preferred.insert(category.to_string(), unit);
    }

    pub fn preferred_unit(&self, category: &str) -> Option<&Unit> {
        self.preferred.get(category)
    }

    pub fn is_empty(&self) -> bool {
        self.preferred.is_empty()
    }
}

/// Renders recipes, resolving each ingredient quantity against the unit
/// preferences and the density registry.
pub struct RecipeFormatter<'a> {
    preferences: &'a UnitPreferences,
    converter: &'a UnitConverter,
    scale: f64,
}

impl<'a> RecipeFormatter<'a> {
    pub fn new(preferences: &'a UnitPreferences, converter: &'a UnitConverter) -> Self {
        RecipeFormatter {
            preferences,
            converter,
            scale: 1.0,
        }
    }

    /// Multiply every ingredient quantity by `scale` when rendering.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn render(&self, recipe: &Recipe, format: OutputFormat) -> Result<String, ConvertError> {
        match format {
            OutputFormat::Markdown => self.render_markdown(recipe),
            OutputFormat::Html => self.render_html(recipe),
        }
    }

    /// The quantity to display for an ingredient: scaled, then converted
    /// to the category's preferred unit when one is configured.
    fn display_quantity(&self, ingredient: &Ingredient) -> Result<Quantity, ConvertError> {
        let scaled = ingredient.quantity.scale(self.scale);
        let preferred = ingredient
            .category
            .as_deref()
            .and_then(|category| self.preferences.preferred_unit(category));
        match preferred {
            Some(unit) => self
                .converter
                .convert(&scaled, unit, ingredient.identifier.as_deref()),
            None => Ok(scaled),
        }
    }

    fn format_ingredient(&self, ingredient: &Ingredient) -> Result<String, ConvertError> {
        let quantity = format_quantity(&self.display_quantity(ingredient)?);
        Ok(match &ingredient.notes {
            None => format!("{} {}", quantity, ingredient.item),
            Some(notes) => format!("{} {}, {}", quantity, ingredient.item, notes),
        })
    }

    fn render_markdown(&self, recipe: &Recipe) -> Result<String, ConvertError> {
        let mut out = String::new();
        out.push_str(&format!("### {}\n", recipe.name));
        if let Some(comments) = &recipe.comments {
            out.push_str("\n#### Comments\n");
            out.push_str(&format!("\n{comments}\n"));
        }
        if !recipe.tools.is_empty() {
            out.push_str("\n#### Tools\n\n");
            for tool in &recipe.tools {
                out.push_str(&format!("-    {tool}\n"));
            }
        }
        out.push_str("\n#### Ingredients\n\n");
        for ingredient in &recipe.ingredients {
            out.push_str(&format!("-    {}\n", self.format_ingredient(ingredient)?));
        }
        out.push_str("\n#### Procedure\n\n");
        for (i, step) in recipe.steps.iter().enumerate() {
            out.push_str(&format!("{})   {}\n", i + 1, format_step(step)));
        }
        if !recipe.references.is_empty() {
            out.push_str("\n#### References\n\n");
            for reference in &recipe.references {
                out.push_str(&format!("-    {reference}\n"));
            }
        }
        Ok(out)
    }

    fn render_html(&self, recipe: &Recipe) -> Result<String, ConvertError> {
        let mut out = String::new();
        out.push_str(&format!("<h3>{}</h3>", recipe.name));
        if let Some(comments) = &recipe.comments {
            out.push_str("<h4>Comments</h4>");
            out.push_str(&format!("<p>{comments}</p>"));
        }
        if !recipe.tools.is_empty() {
            out.push_str("<h4>Tools</h4><ul>");
            for tool in &recipe.tools {
                out.push_str(&format!("<li>{tool}</li>"));
            }
            out.push_str("</ul>");
        }
        out.push_str("<h4>Ingredients</h4><ul>");
        for ingredient in &recipe.ingredients {
            out.push_str(&format!("<li>{}</li>", self.format_ingredient(ingredient)?));
        }
        out.push_str("</ul>");
        out.push_str("<h4>Instructions</h4><ol>");
        for step in &recipe.steps {
            out.push_str(&format!("<li>{}</li>", format_step(step)));
        }
        out.push_str("</ol>");
        if !recipe.references.is_empty() {
            out.push_str("<h4>References</h4><ul>");
            for reference in &recipe.references {
                out.push_str(&format!("<li>{reference}</li>"));
            }
            out.push_str("</ul>");
        }
        Ok(out)
    }
}

fn format_step(step: &RecipeStep) -> String {
    match &step.time {
        None => step.description.clone(),
        Some(time) => format!("{} ({})", step.description, format_quantity(time)),
    }
}

/// Display a quantity with the magnitude rounded to three decimal places,
/// so converted values don't surface float noise ("239.99999999999997 g").
pub fn format_quantity(quantity: &Quantity) -> String {
    let rounded = (quantity.magnitude() * 1000.0).round() / 1000.0;
    if quantity.unit().label().is_empty() {
        format!("{rounded}")
    } else {
        format!("{rounded} {}", quantity.unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(OutputFormat::Markdown.mime_type(), "text/markdown");
        assert_eq!(OutputFormat::Html.mime_type(), "text/html");
    }

    #[test]
    fn test_preferences_lookup() {
        let units = UnitRegistry::new();
        let mut prefs = UnitPreferences::new();
        assert!(prefs.is_empty());
        prefs.set_preference("bulk_solid", units.parse_unit("g").unwrap());
        assert_eq!(prefs.preferred_unit("bulk_solid").unwrap().label(), "g");
        assert!(prefs.preferred_unit("liquid").is_none());
    }

    #[test]
    fn test_preferences_from_toml() {
        let units = UnitRegistry::new();
        let prefs = UnitPreferences::from_toml(
            "[preferences]\nbulk_solid = \"g\"\nliquid = \"cup\"\n",
            &units,
        )
        .unwrap();
        assert_eq!(prefs.preferred_unit("bulk_solid").unwrap().label(), "g");
        assert_eq!(prefs.preferred_unit("liquid").unwrap().label(), "cup");
    }

    #[test]
    fn test_preferences_reject_unknown_unit() {
        let units = UnitRegistry::new();
        let err = UnitPreferences::from_toml("[preferences]\nbulk_solid = \"blorp\"\n", &units);
        assert!(err.is_err());
    }

    #[test]
    fn test_format_quantity_rounds_float_noise() {
        let units = UnitRegistry::new();
        let q = Quantity::new(239.99999999999997, units.parse_unit("g").unwrap());
        assert_eq!(format_quantity(&q), "240 g");
        let q = units.parse_quantity("1.5 cup").unwrap();
        assert_eq!(format_quantity(&q), "1.5 cup");
    }
}
