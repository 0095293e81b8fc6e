use crate::db::{recipes, DbPool};
use crate::error::{Error, Result};
use crate::search::{CandidateIndex, RecipeRecord, SearchPattern};
use tracing::debug;

/// Candidate index backed by the `recipes` table
///
/// Lookups run `LIKE` against the stored lowercased ingredient text. Rows come
/// back in id order so capped lookups are repeatable.
#[derive(Debug, Clone)]
pub struct SqliteCorpus {
    pool: DbPool,
}

impl SqliteCorpus {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn lookup(&self, pattern: &SearchPattern, limit: Option<i64>) -> Result<Vec<RecipeRecord>> {
        let rows = recipes::find_by_ingredient_pattern(&self.pool, &pattern.to_like(), limit)
            .await
            .map_err(|e| match e {
                Error::Database(e) => Error::CorpusUnavailable(e.to_string()),
                other => other,
            })?;

        debug!("Pattern '{}' matched {} rows", pattern, rows.len());

        rows.into_iter()
            .map(RecipeRecord::try_from)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| match e {
                Error::Json(e) => Error::CorpusUnavailable(format!("corrupt ingredients: {e}")),
                other => other,
            })
    }
}

impl CandidateIndex for SqliteCorpus {
    async fn exact_lookup(&self, term: &str) -> Result<Vec<RecipeRecord>> {
        self.lookup(&SearchPattern::literal(&term.to_lowercase()), None)
            .await
    }

    async fn pattern_lookup(
        &self,
        pattern: &SearchPattern,
        cap: usize,
    ) -> Result<Vec<RecipeRecord>> {
        let cap = i64::try_from(cap).unwrap_or(i64::MAX);
        self.lookup(pattern, Some(cap)).await
    }
}
