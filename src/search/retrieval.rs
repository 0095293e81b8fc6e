use crate::config::SearchConfig;
use crate::error::Result;
use crate::search::corpus::CandidateIndex;
use crate::search::patterns::PatternSet;
use crate::search::record::RecipeRecord;
use crate::search::terms::IngredientTerm;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::HashMap;
use tracing::debug;

/// Candidates for one query keyed by recipe id
pub type MatchSet = HashMap<i64, RecipeRecord>;

/// Gather every candidate recipe for `terms`.
///
/// Each term gets an exact lookup; terms with fewer exact hits than the
/// scarcity threshold are expanded with their typo patterns. Lookups run
/// concurrently; the first failing lookup fails the whole call.
pub async fn collect_candidates<C: CandidateIndex>(
    index: &C,
    terms: &[IngredientTerm],
    config: &SearchConfig,
) -> Result<MatchSet> {
    let per_term: Vec<Vec<RecipeRecord>> = stream::iter(terms.iter().cloned())
        .map(move |term| async move { lookup_term(index, &term, config).await })
        .buffer_unordered(config.lookup_concurrency)
        .try_collect()
        .await?;

    let mut matches = MatchSet::new();
    for recipe in per_term.into_iter().flatten() {
        matches.entry(recipe.id).or_insert(recipe);
    }

    debug!(
        "Collected {} distinct candidates for {} terms",
        matches.len(),
        terms.len()
    );

    Ok(matches)
}

async fn lookup_term<C: CandidateIndex>(
    index: &C,
    term: &IngredientTerm,
    config: &SearchConfig,
) -> Result<Vec<RecipeRecord>> {
    let mut hits = index.exact_lookup(term.as_str()).await?;
    debug!("Exact lookup for '{}' returned {} recipes", term, hits.len());

    if hits.len() >= config.scarcity_threshold {
        return Ok(hits);
    }

    let patterns = PatternSet::for_term(term.as_str());
    debug!(
        "Expanding '{}' with {} typo patterns",
        term,
        patterns.len()
    );

    let cap = config.pattern_cap;
    let fuzzy: Vec<Vec<RecipeRecord>> = stream::iter(patterns)
        .map(move |pattern| async move { index.pattern_lookup(&pattern, cap).await })
        .buffer_unordered(config.lookup_concurrency)
        .try_collect()
        .await?;

    hits.extend(fuzzy.into_iter().flatten());
    Ok(hits)
}
