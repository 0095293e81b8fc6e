use crate::search::{IngredientsInput, RankedResult, RecipeRecord, SearchOutcome, SearchRequest};
use serde::Serialize;

/// Search request parameters decoded from a raw query string
///
/// `ingredients=x` is a single value; `ingredients[]=x` or a repeated
/// `ingredients` key builds a list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub ingredients: Option<IngredientsInput>,
    pub limit: Option<i64>,
}

impl SearchParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = SearchParams::default();

        for (key, value) in pairs {
            match key.as_str() {
                "ingredients" | "ingredients[]" => {
                    let bracketed = key.ends_with("[]");
                    params.ingredients = Some(match (params.ingredients.take(), bracketed) {
                        (None, false) => IngredientsInput::One(value),
                        (None, true) => IngredientsInput::Many(vec![Some(value)]),
                        (Some(IngredientsInput::One(first)), _) => {
                            IngredientsInput::Many(vec![Some(first), Some(value)])
                        }
                        (Some(IngredientsInput::Many(mut values)), _) => {
                            values.push(Some(value));
                            IngredientsInput::Many(values)
                        }
                    });
                }
                // Unparsable limits fall back to the default like absent ones
                "limit" => params.limit = value.trim().parse().ok(),
                _ => {}
            }
        }

        params
    }
}

impl From<SearchParams> for SearchRequest {
    fn from(params: SearchParams) -> Self {
        SearchRequest {
            ingredients: params.ingredients,
            limit: params.limit,
        }
    }
}

/// Search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<RecipeResult>,
    pub search_metadata: SearchMetadata,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        SearchResponse {
            results: outcome.results.into_iter().map(RecipeResult::from).collect(),
            search_metadata: SearchMetadata {
                query_ingredients: outcome.query_ingredients,
                total_results: outcome.total_results,
                search_time_ms: outcome.search_time_ms,
                limit: outcome.limit,
            },
        }
    }
}

/// Recipe as listed in search results
#[derive(Debug, Clone, Serialize)]
pub struct RecipeResult {
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

impl From<RecipeRecord> for RecipeResult {
    fn from(recipe: RecipeRecord) -> Self {
        RecipeResult {
            id: recipe.id,
            title: recipe.title,
            cook_time: recipe.cook_time,
            prep_time: recipe.prep_time,
            ingredients: recipe.ingredients,
            ratings: recipe.ratings,
            cuisine: recipe.cuisine,
            category: recipe.category,
            author: recipe.author,
            image: recipe.image,
        }
    }
}

impl From<RankedResult> for RecipeResult {
    fn from(ranked: RankedResult) -> Self {
        ranked.recipe.into()
    }
}

/// Search metadata
#[derive(Debug, Clone, Serialize)]
pub struct SearchMetadata {
    pub query_ingredients: Vec<String>,
    pub total_results: usize,
    pub search_time_ms: f64,
    pub limit: usize,
}

/// Full recipe details
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: RecipeResult,
    /// Ingredient lines with quantities and units stripped
    pub ingredient_names: Vec<String>,
}

/// System statistics
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub total_recipes: i64,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_single_ingredient_is_one() {
        let params = SearchParams::from_pairs(pairs(&[("ingredients", "chocolate")]));
        assert_eq!(
            params.ingredients,
            Some(IngredientsInput::One("chocolate".to_string()))
        );
        assert_eq!(params.limit, None);
    }

    #[test]
    fn test_bracketed_and_repeated_keys_build_lists() {
        let params = SearchParams::from_pairs(pairs(&[("ingredients[]", "")]));
        assert_eq!(
            params.ingredients,
            Some(IngredientsInput::Many(vec![Some(String::new())]))
        );

        let params = SearchParams::from_pairs(pairs(&[
            ("ingredients", "flour"),
            ("ingredients", "sugar"),
            ("limit", "5"),
        ]));
        assert_eq!(
            params.ingredients,
            Some(IngredientsInput::Many(vec![
                Some("flour".to_string()),
                Some("sugar".to_string())
            ]))
        );
        assert_eq!(params.limit, Some(5));
    }

    #[test]
    fn test_missing_and_bad_values() {
        let params = SearchParams::from_pairs(pairs(&[("limit", "lots"), ("page", "2")]));
        assert_eq!(params, SearchParams::default());
    }
}
