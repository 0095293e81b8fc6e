use crate::config::SearchConfig;
use crate::search::ranking::RankedResult;

/// Effective result limit for a caller-supplied value.
///
/// Absent or non-positive values fall back to the configured default; larger
/// values are clamped to the configured maximum.
pub fn resolve_limit(requested: Option<i64>, config: &SearchConfig) -> usize {
    match requested {
        Some(n) if n > 0 => usize::try_from(n)
            .unwrap_or(usize::MAX)
            .min(config.max_limit),
        _ => config.default_limit,
    }
}

/// Keep the first `limit` entries of a fully ranked list.
pub fn truncate(mut ranked: Vec<RankedResult>, limit: usize) -> Vec<RankedResult> {
    ranked.truncate(limit);
    ranked
}
