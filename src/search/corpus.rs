use crate::error::Result;
use crate::search::patterns::SearchPattern;
use crate::search::record::RecipeRecord;
use std::future::Future;
use std::sync::Arc;

/// Read-only access to the recipe corpus used by the search engine
///
/// Both lookups test the pattern against each recipe's flattened, lowercased
/// ingredient text. Implementations own any locking and consistency concerns
/// of the underlying storage and should report failures as
/// [`Error::CorpusUnavailable`](crate::Error::CorpusUnavailable).
pub trait CandidateIndex: Send + Sync {
    /// All recipes whose ingredient text contains `term`. No ordering guarantee.
    fn exact_lookup(&self, term: &str) -> impl Future<Output = Result<Vec<RecipeRecord>>> + Send;

    /// Up to `cap` recipes whose ingredient text matches `pattern`.
    fn pattern_lookup(
        &self,
        pattern: &SearchPattern,
        cap: usize,
    ) -> impl Future<Output = Result<Vec<RecipeRecord>>> + Send;
}

impl<T: CandidateIndex> CandidateIndex for Arc<T> {
    fn exact_lookup(&self, term: &str) -> impl Future<Output = Result<Vec<RecipeRecord>>> + Send {
        (**self).exact_lookup(term)
    }

    fn pattern_lookup(
        &self,
        pattern: &SearchPattern,
        cap: usize,
    ) -> impl Future<Output = Result<Vec<RecipeRecord>>> + Send {
        (**self).pattern_lookup(pattern, cap)
    }
}

/// In-process corpus that scans every recipe on each lookup
///
/// Recipes are kept sorted by id so capped lookups are deterministic.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    entries: Vec<(String, RecipeRecord)>,
}

impl MemoryCorpus {
    pub fn new(recipes: impl IntoIterator<Item = RecipeRecord>) -> Self {
        let mut entries: Vec<(String, RecipeRecord)> = recipes
            .into_iter()
            .map(|recipe| (recipe.ingredient_text(), recipe))
            .collect();
        entries.sort_by_key(|(_, recipe)| recipe.id);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn scan(&self, pattern: &SearchPattern, cap: usize) -> Vec<RecipeRecord> {
        self.entries
            .iter()
            .filter(|(text, _)| pattern.matches(text))
            .map(|(_, recipe)| recipe.clone())
            .take(cap)
            .collect()
    }
}

impl CandidateIndex for MemoryCorpus {
    async fn exact_lookup(&self, term: &str) -> Result<Vec<RecipeRecord>> {
        Ok(self.scan(&SearchPattern::literal(&term.to_lowercase()), usize::MAX))
    }

    async fn pattern_lookup(
        &self,
        pattern: &SearchPattern,
        cap: usize,
    ) -> Result<Vec<RecipeRecord>> {
        Ok(self.scan(pattern, cap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i64, ingredients: &[&str]) -> RecipeRecord {
        RecipeRecord {
            id,
            title: format!("Recipe {id}"),
            cook_time: None,
            prep_time: None,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            ratings: None,
            cuisine: None,
            category: None,
            author: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_exact_lookup_is_case_insensitive() {
        let corpus = MemoryCorpus::new(vec![
            recipe(2, &["Dark Chocolate"]),
            recipe(1, &["flour"]),
        ]);

        let hits = corpus.exact_lookup("CHOCOLATE").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[tokio::test]
    async fn test_pattern_lookup_respects_cap_in_id_order() {
        let corpus = MemoryCorpus::new((1..=30).rev().map(|id| recipe(id, &["flour"])));
        let pattern = SearchPattern::from_segments(vec!["fl".to_string(), "ur".to_string()]);

        let hits = corpus.pattern_lookup(&pattern, 20).await.unwrap();
        assert_eq!(hits.len(), 20);
        assert_eq!(hits[0].id, 1);
        assert_eq!(hits[19].id, 20);
    }

    #[tokio::test]
    async fn test_literal_wildcard_characters_match_literally() {
        let corpus = MemoryCorpus::new(vec![recipe(1, &["flour"]), recipe(2, &["100% cocoa"])]);

        let hits = corpus.exact_lookup("%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }
}
