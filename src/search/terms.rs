use crate::error::{Error, Result, INGREDIENTS_REQUIRED, INGREDIENT_REQUIRED};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Raw `ingredients` value as supplied by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientsInput {
    One(String),
    Many(Vec<Option<String>>),
}

impl IngredientsInput {
    fn is_blank(&self) -> bool {
        match self {
            IngredientsInput::One(value) => value.trim().is_empty(),
            IngredientsInput::Many(values) => values.is_empty(),
        }
    }
}

impl From<&str> for IngredientsInput {
    fn from(value: &str) -> Self {
        IngredientsInput::One(value.to_string())
    }
}

impl From<Vec<&str>> for IngredientsInput {
    fn from(values: Vec<&str>) -> Self {
        IngredientsInput::Many(values.into_iter().map(|v| Some(v.to_string())).collect())
    }
}

impl From<Vec<String>> for IngredientsInput {
    fn from(values: Vec<String>) -> Self {
        IngredientsInput::Many(values.into_iter().map(Some).collect())
    }
}

/// Validate caller input and drop null or blank entries.
///
/// The returned strings keep their original casing so they can be echoed back
/// in search metadata; see [`matching_terms`] for the form used in lookups.
pub fn normalize_ingredients(input: Option<IngredientsInput>) -> Result<Vec<String>> {
    let input = match input {
        Some(input) if !input.is_blank() => input,
        _ => return Err(Error::Validation(INGREDIENTS_REQUIRED.to_string())),
    };

    let values = match input {
        IngredientsInput::One(value) => vec![value],
        IngredientsInput::Many(values) => values
            .into_iter()
            .flatten()
            .filter(|v| !v.trim().is_empty())
            .collect(),
    };

    if values.is_empty() {
        return Err(Error::Validation(INGREDIENT_REQUIRED.to_string()));
    }

    Ok(values)
}

/// A trimmed, lowercased, non-empty ingredient name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IngredientTerm(String);

impl IngredientTerm {
    /// Returns `None` for input that is blank after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let term = raw.trim().to_lowercase();
        if term.is_empty() {
            None
        } else {
            Some(Self(term))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercased terms in query order, duplicates removed.
pub fn matching_terms<S: AsRef<str>>(ingredients: &[S]) -> Vec<IngredientTerm> {
    let mut seen = HashSet::new();
    ingredients
        .iter()
        .filter_map(|raw| IngredientTerm::new(raw.as_ref()))
        .filter(|term| seen.insert(term.clone()))
        .collect()
}
