use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Leading quantity: digits, vulgar fractions, slashes, decimal points, ranges
static QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\d\u{00BC}-\u{00BE}\u{2150}-\u{215E}/.,\s-]+").expect("valid quantity regex")
});

/// Unit or size word directly following the quantity
static UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(cups?|tbsps?|tablespoons?|tsps?|teaspoons?|g|grams?|kg|kilograms?|ml|millilit(er|re)s?|l|lit(er|re)s?|oz|ounces?|lbs?|pounds?|pinch(es)?|dash(es)?|cloves?|cans?|slices?|sticks?|large|medium|small)\.?\s+",
    )
    .expect("valid unit regex")
});

/// A recipe as seen by the search engine
///
/// Only `ingredients` and `ratings` take part in matching and ranking; the
/// remaining fields are carried through untouched for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: i64,
    pub title: String,
    pub cook_time: Option<i64>,
    pub prep_time: Option<i64>,
    pub ingredients: Vec<String>,
    pub ratings: Option<f64>,
    pub cuisine: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
}

impl RecipeRecord {
    /// Ingredient list flattened with single spaces and lowercased.
    pub fn ingredient_text(&self) -> String {
        flatten_ingredients(&self.ingredients)
    }

    /// Ingredient names with leading quantities and units removed
    pub fn ingredient_names(&self) -> Vec<String> {
        self.ingredients.iter().map(|i| ingredient_name(i)).collect()
    }
}

/// Flatten an ingredient list into the lowercased text that lookups match against.
pub fn flatten_ingredients(ingredients: &[String]) -> String {
    ingredients.join(" ").to_lowercase()
}

/// Strip a leading quantity and unit from a free-text ingredient line.
///
/// `"1 cup all-purpose flour"` becomes `"all-purpose flour"`. When nothing
/// would be left, the trimmed original is returned instead.
pub fn ingredient_name(ingredient: &str) -> String {
    let trimmed = ingredient.trim();
    let without_quantity = QUANTITY.replace(trimmed, "");
    let cleaned = if without_quantity.len() < trimmed.len() {
        UNIT.replace(&without_quantity, "").trim().to_string()
    } else {
        without_quantity.trim().to_string()
    };

    if cleaned.is_empty() {
        trimmed.to_string()
    } else {
        cleaned
    }
}
