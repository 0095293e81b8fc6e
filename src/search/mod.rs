//! Ingredient search engine.
//!
//! A search call validates the caller's ingredients, gathers candidates from
//! a [`CandidateIndex`] (exact lookups plus typo patterns for scarce terms),
//! ranks the merged set by match count and rating, and keeps the first
//! `limit` entries.

pub mod corpus;
pub mod limit;
pub mod patterns;
pub mod ranking;
pub mod record;
pub mod retrieval;
pub mod terms;

pub use corpus::{CandidateIndex, MemoryCorpus};
pub use patterns::{PatternSet, SearchPattern};
pub use ranking::RankedResult;
pub use record::RecipeRecord;
pub use terms::{IngredientTerm, IngredientsInput};

use crate::config::SearchConfig;
use crate::error::Result;
use std::time::Instant;
use tracing::debug;

/// Parameters of one search call
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub ingredients: Option<IngredientsInput>,
    pub limit: Option<i64>,
}

impl SearchRequest {
    pub fn new(ingredients: impl Into<IngredientsInput>) -> Self {
        Self {
            ingredients: Some(ingredients.into()),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Ranked results of one search call plus the metadata echoed to callers
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub results: Vec<RankedResult>,
    /// Validated ingredients with their original casing
    pub query_ingredients: Vec<String>,
    pub total_results: usize,
    pub search_time_ms: f64,
    pub limit: usize,
}

/// Stateless search front end over a corpus
pub struct SearchEngine<C> {
    corpus: C,
    config: SearchConfig,
}

impl<C: CandidateIndex> SearchEngine<C> {
    pub fn new(corpus: C, config: SearchConfig) -> Self {
        Self { corpus, config }
    }

    /// Run a search.
    ///
    /// Input validation happens before any corpus access. All lookups finish
    /// before ranking starts, and the full candidate set is ranked before the
    /// limit is applied.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchOutcome> {
        let query_ingredients = terms::normalize_ingredients(request.ingredients)?;
        let limit = limit::resolve_limit(request.limit, &self.config);

        let start = Instant::now();

        let terms = terms::matching_terms(&query_ingredients);
        let candidates = retrieval::collect_candidates(&self.corpus, &terms, &self.config).await?;
        let candidate_count = candidates.len();

        let ranked = ranking::rank(candidates.into_values(), &terms);
        let results = limit::truncate(ranked, limit);

        let search_time_ms = (start.elapsed().as_secs_f64() * 100_000.0).round() / 100.0;

        debug!(
            "Search for {:?}: {} candidates, returning {} (limit {}) in {}ms",
            query_ingredients,
            candidate_count,
            results.len(),
            limit,
            search_time_ms
        );

        Ok(SearchOutcome {
            total_results: results.len(),
            results,
            query_ingredients,
            search_time_ms,
            limit,
        })
    }
}
