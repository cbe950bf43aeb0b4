//! Rendering tests: golden Markdown output, HTML structure, and
//! preference-driven unit conversion during formatting.

use kitchen_units::UnitRegistry;
use pretty_assertions::assert_eq;
use trivet_core::{
    ConvertError, Ingredient, OutputFormat, Recipe, RecipeFormatter, RecipeStep, UnitConverter,
    UnitPreferences,
};

fn boiling_water(units: &UnitRegistry, comments: Option<&str>) -> Recipe {
    Recipe {
        name: "Boiling Water".to_string(),
        comments: comments.map(str::to_string),
        references: Vec::new(),
        tools: vec!["Saucepan".to_string()],
        ingredients: vec![Ingredient {
            item: "Water".to_string(),
            quantity: units.parse_quantity("1 cup").unwrap(),
            identifier: None,
            category: None,
            notes: None,
        }],
        steps: vec![RecipeStep {
            description: "Place water on stove until boiling".to_string(),
            group: None,
            time: None,
        }],
    }
}

#[test]
fn test_markdown_golden() {
    let units = UnitRegistry::new();
    let prefs = UnitPreferences::new();
    let converter = UnitConverter::default();
    let formatter = RecipeFormatter::new(&prefs, &converter);

    let rendered = formatter
        .render(&boiling_water(&units, None), OutputFormat::Markdown)
        .unwrap();
    assert_eq!(
        rendered,
        "### Boiling Water\n\
         \n\
         #### Tools\n\
         \n\
         -    Saucepan\n\
         \n\
         #### Ingredients\n\
         \n\
         -    1 cup Water\n\
         \n\
         #### Procedure\n\
         \n\
         1)   Place water on stove until boiling\n"
    );
}

#[test]
fn test_markdown_golden_with_comments() {
    let units = UnitRegistry::new();
    let prefs = UnitPreferences::new();
    let converter = UnitConverter::default();
    let formatter = RecipeFormatter::new(&prefs, &converter);

    let rendered = formatter
        .render(
            &boiling_water(&units, Some("Utterly basic")),
            OutputFormat::Markdown,
        )
        .unwrap();
    assert_eq!(
        rendered,
        "### Boiling Water\n\
         \n\
         #### Comments\n\
         \n\
         Utterly basic\n\
         \n\
         #### Tools\n\
         \n\
         -    Saucepan\n\
         \n\
         #### Ingredients\n\
         \n\
         -    1 cup Water\n\
         \n\
         #### Procedure\n\
         \n\
         1)   Place water on stove until boiling\n"
    );
}

#[test]
fn test_step_time_and_notes() {
    let units = UnitRegistry::new();
    let prefs = UnitPreferences::new();
    let converter = UnitConverter::default();
    let formatter = RecipeFormatter::new(&prefs, &converter);

    let recipe = Recipe {
        name: "Rice".to_string(),
        ingredients: vec![Ingredient {
            item: "Rice".to_string(),
            quantity: units.parse_quantity("1 cup").unwrap(),
            identifier: Some("rice".to_string()),
            category: None,
            notes: Some("rinsed".to_string()),
        }],
        steps: vec![RecipeStep {
            description: "Simmer".to_string(),
            group: None,
            time: Some(units.parse_quantity("18 min").unwrap()),
        }],
        ..Recipe::default()
    };

    let rendered = formatter.render(&recipe, OutputFormat::Markdown).unwrap();
    assert!(rendered.contains("-    1 cup Rice, rinsed\n"));
    assert!(rendered.contains("1)   Simmer (18 min)\n"));
}

#[test]
fn test_preferences_convert_through_density() {
    let units = UnitRegistry::new();
    let mut prefs = UnitPreferences::new();
    prefs.set_preference("bulk_solid", units.parse_unit("g").unwrap());
    let mut converter = UnitConverter::default();
    converter
        .add_density("rice", units.parse_quantity("180 g/cup").unwrap())
        .unwrap();

    let recipe = Recipe {
        name: "Rice".to_string(),
        ingredients: vec![Ingredient {
            item: "Arborio rice".to_string(),
            quantity: units.parse_quantity("1 cup").unwrap(),
            identifier: Some("rice".to_string()),
            category: Some("bulk_solid".to_string()),
            notes: None,
        }],
        ..Recipe::default()
    };

    let formatter = RecipeFormatter::new(&prefs, &converter);
    let rendered = formatter.render(&recipe, OutputFormat::Markdown).unwrap();
    assert!(rendered.contains("-    180 g Arborio rice\n"));
}

#[test]
fn test_uncategorized_ingredient_passes_through() {
    let units = UnitRegistry::new();
    let mut prefs = UnitPreferences::new();
    prefs.set_preference("bulk_solid", units.parse_unit("g").unwrap());
    let converter = UnitConverter::default();

    let recipe = Recipe {
        name: "Rice".to_string(),
        ingredients: vec![Ingredient {
            item: "Rice".to_string(),
            quantity: units.parse_quantity("1 cup").unwrap(),
            identifier: Some("rice".to_string()),
            category: None,
            notes: None,
        }],
        ..Recipe::default()
    };

    let formatter = RecipeFormatter::new(&prefs, &converter);
    let rendered = formatter.render(&recipe, OutputFormat::Markdown).unwrap();
    assert!(rendered.contains("-    1 cup Rice\n"));
}

#[test]
fn test_preference_without_density_fails() {
    let units = UnitRegistry::new();
    let mut prefs = UnitPreferences::new();
    prefs.set_preference("bulk_solid", units.parse_unit("g").unwrap());
    let converter = UnitConverter::default();

    let recipe = Recipe {
        name: "Rice".to_string(),
        ingredients: vec![Ingredient {
            item: "Rice".to_string(),
            quantity: units.parse_quantity("1 cup").unwrap(),
            identifier: Some("rice".to_string()),
            category: Some("bulk_solid".to_string()),
            notes: None,
        }],
        ..Recipe::default()
    };

    let formatter = RecipeFormatter::new(&prefs, &converter);
    let err = formatter.render(&recipe, OutputFormat::Markdown).unwrap_err();
    assert!(matches!(err, ConvertError::NoDensityKnown { .. }));
}

#[test]
fn test_scale_factor() {
    let units = UnitRegistry::new();
    let prefs = UnitPreferences::new();
    let converter = UnitConverter::default();

    let recipe = boiling_water(&units, None);
    let formatter = RecipeFormatter::new(&prefs, &converter).with_scale(2.0);
    let rendered = formatter.render(&recipe, OutputFormat::Markdown).unwrap();
    assert!(rendered.contains("-    2 cup Water\n"));
}

#[test]
fn test_scale_combines_with_preferences() {
    let units = UnitRegistry::new();
    let mut prefs = UnitPreferences::new();
    prefs.set_preference("bulk_solid", units.parse_unit("g").unwrap());
    let mut converter = UnitConverter::default();
    converter
        .add_density("rice", units.parse_quantity("180 g/cup").unwrap())
        .unwrap();

    let recipe = Recipe {
        name: "Rice".to_string(),
        ingredients: vec![Ingredient {
            item: "Rice".to_string(),
            quantity: units.parse_quantity("1 cup").unwrap(),
            identifier: Some("rice".to_string()),
            category: Some("bulk_solid".to_string()),
            notes: None,
        }],
        ..Recipe::default()
    };

    let formatter = RecipeFormatter::new(&prefs, &converter).with_scale(2.0);
    let rendered = formatter.render(&recipe, OutputFormat::Markdown).unwrap();
    assert!(rendered.contains("-    360 g Rice\n"));
}

#[test]
fn test_html_structure() {
    let units = UnitRegistry::new();
    let prefs = UnitPreferences::new();
    let converter = UnitConverter::default();
    let formatter = RecipeFormatter::new(&prefs, &converter);

    let recipe = Recipe {
        references: vec!["The Joy of Cooking".to_string()],
        comments: Some("Utterly basic".to_string()),
        ..boiling_water(&units, None)
    };
    let rendered = formatter.render(&recipe, OutputFormat::Html).unwrap();
    assert!(rendered.starts_with("<h3>Boiling Water</h3>"));
    assert!(rendered.contains("<h4>Comments</h4><p>Utterly basic</p>"));
    assert!(rendered.contains("<h4>Tools</h4><ul><li>Saucepan</li></ul>"));
    assert!(rendered.contains("<li>1 cup Water</li>"));
    assert!(rendered.contains("<h4>Instructions</h4><ol><li>Place water on stove until boiling</li></ol>"));
    assert!(rendered.contains("<h4>References</h4><ul><li>The Joy of Cooking</li></ul>"));
}
