use crate::search::record::RecipeRecord;
use crate::search::terms::IngredientTerm;
use std::cmp::Ordering;
use std::collections::HashSet;

/// A candidate paired with the number of query terms it contains
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub recipe: RecipeRecord,
    pub match_count: usize,
}

/// Number of distinct terms found as substrings of the recipe's ingredient text.
pub fn match_count(recipe: &RecipeRecord, terms: &[IngredientTerm]) -> usize {
    let text = recipe.ingredient_text();
    if text.is_empty() {
        return 0;
    }

    terms
        .iter()
        .map(IngredientTerm::as_str)
        .collect::<HashSet<_>>()
        .into_iter()
        .filter(|term| text.contains(term))
        .count()
}

/// Score and order candidates.
///
/// Order is match count descending, then rating descending with unrated
/// recipes after every rated one, then id ascending.
pub fn rank(
    candidates: impl IntoIterator<Item = RecipeRecord>,
    terms: &[IngredientTerm],
) -> Vec<RankedResult> {
    let mut ranked: Vec<RankedResult> = candidates
        .into_iter()
        .map(|recipe| RankedResult {
            match_count: match_count(&recipe, terms),
            recipe,
        })
        .collect();

    ranked.sort_by(compare);
    ranked
}

fn compare(a: &RankedResult, b: &RankedResult) -> Ordering {
    b.match_count
        .cmp(&a.match_count)
        .then_with(|| compare_ratings(b.recipe.ratings, a.recipe.ratings))
        .then_with(|| a.recipe.id.cmp(&b.recipe.id))
}

fn compare_ratings(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
