use crate::error::{Error, Result};
use crate::search::record::{flatten_ingredients, RecipeRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub cook_time: Option<i64>,
    pub prep_time: Option<i64>,
    pub ingredients: String, // JSON array
    pub ingredient_text: String,
    pub ratings: Option<f64>,
    pub cuisine: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<Recipe> for RecipeRecord {
    type Error = Error;

    fn try_from(recipe: Recipe) -> Result<Self> {
        let ingredients: Vec<String> = serde_json::from_str(&recipe.ingredients)?;

        Ok(RecipeRecord {
            id: recipe.id,
            title: recipe.title,
            cook_time: recipe.cook_time,
            prep_time: recipe.prep_time,
            ingredients,
            ratings: recipe.ratings,
            cuisine: recipe.cuisine,
            category: recipe.category,
            author: recipe.author,
            image: recipe.image,
        })
    }
}

/// A recipe to insert, in the shape of the seed data file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRecipe {
    #[serde(default)]
    pub title: String,
    pub cook_time: Option<i64>,
    pub prep_time: Option<i64>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub ratings: Option<f64>,
    pub cuisine: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
}

impl NewRecipe {
    /// A recipe needs a title and at least one ingredient
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("Title can't be blank".to_string()));
        }

        if self.ingredients.iter().all(|i| i.trim().is_empty()) {
            return Err(Error::Validation("Ingredients can't be blank".to_string()));
        }

        Ok(())
    }

    pub fn ingredients_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.ingredients)?)
    }

    pub fn ingredient_text(&self) -> String {
        flatten_ingredients(&self.ingredients)
    }
}
