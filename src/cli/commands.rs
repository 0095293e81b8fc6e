use crate::config::SearchConfig;
use crate::db::{corpus::SqliteCorpus, models::NewRecipe, recipes, DbPool};
use crate::search::{SearchEngine, SearchOutcome, SearchRequest};
use crate::{Error, Result};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

const SEED_BATCH_SIZE: usize = 1000;

/// Counts from a seeding run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub processed: u64,
    /// Entries missing a title or ingredients
    pub skipped: u64,
    /// Entries that did not have the expected shape
    pub failed: u64,
}

/// Replace every recipe with the entries of a JSON array file
pub async fn seed(pool: &DbPool, path: impl AsRef<Path>) -> Result<SeedReport> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(format!("{} not found", path.display())));
    }

    info!("Loading recipes from {}", path.display());
    let raw = tokio::fs::read_to_string(path).await?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
    info!("Found {} recipes to process", entries.len());

    let cleared = recipes::delete_all_recipes(pool).await?;
    info!("Cleared {} existing recipes", cleared);

    let mut report = SeedReport::default();
    let total_batches = entries.len().div_ceil(SEED_BATCH_SIZE);

    for (batch_index, chunk) in entries.chunks(SEED_BATCH_SIZE).enumerate() {
        let mut batch = Vec::with_capacity(chunk.len());

        for entry in chunk {
            match serde_json::from_value::<NewRecipe>(entry.clone()) {
                Ok(recipe) if recipe.validate().is_ok() => batch.push(recipe),
                Ok(_) => report.skipped += 1,
                Err(e) => {
                    let title = entry.get("title").and_then(|t| t.as_str()).unwrap_or("?");
                    warn!("Failed to process recipe '{}': {}", title, e);
                    report.failed += 1;
                }
            }
        }

        if !batch.is_empty() {
            report.processed += recipes::insert_recipes(pool, &batch).await?;
        }

        info!(
            "Batch {}/{}: {} processed, {} skipped, {} failed",
            batch_index + 1,
            total_batches,
            report.processed,
            report.skipped,
            report.failed
        );
    }

    Ok(report)
}

/// Seed and print a summary
pub async fn seed_and_report(pool: &DbPool, path: &str) -> Result<()> {
    let report = seed(pool, path).await?;

    println!("✓ Seeding completed");
    println!("  Processed: {}", report.processed);
    println!("  Skipped:   {}", report.skipped);
    println!("  Failed:    {}", report.failed);
    println!(
        "  Total recipes in database: {}",
        recipes::count_all_recipes(pool).await?
    );

    let samples = recipes::list_recipes(pool, 3, 0).await?;
    if !samples.is_empty() {
        println!("\nSample recipes:");
        for recipe in samples {
            println!(
                "- {} ({}) - Rating: {}",
                recipe.title,
                recipe.category.as_deref().unwrap_or("uncategorized"),
                recipe
                    .ratings
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "n/a".to_string())
            );
        }
    }

    Ok(())
}

/// Search the local database and print ranked results
pub async fn search(
    pool: &DbPool,
    config: &SearchConfig,
    ingredients: Vec<String>,
    limit: Option<i64>,
) -> Result<()> {
    let engine = SearchEngine::new(SqliteCorpus::new(pool.clone()), config.clone());
    let request = SearchRequest {
        ingredients: Some(ingredients.into()),
        limit,
    };

    let outcome = engine.search(request).await?;
    print_search_results(&outcome);

    Ok(())
}

/// Timing summary for one benchmark query
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub name: &'static str,
    pub ingredients: Vec<&'static str>,
    pub times_ms: Vec<f64>,
    pub result_counts: Vec<usize>,
}

impl BenchReport {
    pub fn average_ms(&self) -> f64 {
        if self.times_ms.is_empty() {
            return 0.0;
        }
        self.times_ms.iter().sum::<f64>() / self.times_ms.len() as f64
    }

    pub fn min_ms(&self) -> f64 {
        self.times_ms.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_ms(&self) -> f64 {
        self.times_ms.iter().copied().fold(0.0, f64::max)
    }
}

const BENCH_CASES: &[(&str, &[&str])] = &[
    ("Single common ingredient", &["flour"]),
    ("Single specific ingredient", &["chocolate"]),
    ("Multiple ingredients", &["flour", "eggs", "sugar"]),
    ("Ingredient with typo", &["chocolat"]),
    ("Less common ingredient", &["vanilla"]),
    ("Multiple specific ingredients", &["beef", "carrots", "onions"]),
];

/// Run every benchmark query `runs` times at the maximum limit
pub async fn bench(pool: &DbPool, config: &SearchConfig, runs: usize) -> Result<Vec<BenchReport>> {
    let engine = SearchEngine::new(SqliteCorpus::new(pool.clone()), config.clone());
    let limit = i64::try_from(config.max_limit).unwrap_or(i64::MAX);
    let mut reports = Vec::with_capacity(BENCH_CASES.len());

    for (name, ingredients) in BENCH_CASES {
        let mut report = BenchReport {
            name,
            ingredients: ingredients.to_vec(),
            times_ms: Vec::with_capacity(runs),
            result_counts: Vec::with_capacity(runs),
        };

        for _ in 0..runs {
            let request = SearchRequest::new(ingredients.to_vec()).with_limit(limit);
            let start = Instant::now();
            let outcome = engine.search(request).await?;
            report
                .times_ms
                .push((start.elapsed().as_secs_f64() * 100_000.0).round() / 100.0);
            report.result_counts.push(outcome.results.len());
        }

        reports.push(report);
    }

    Ok(reports)
}

/// Run the benchmark and print a summary per query
pub async fn bench_and_report(pool: &DbPool, config: &SearchConfig, runs: usize) -> Result<()> {
    println!("=== Recipe Search Benchmark ===");
    println!(
        "Total recipes in database: {}\n",
        recipes::count_all_recipes(pool).await?
    );

    for report in bench(pool, config, runs).await? {
        let avg_results = if report.result_counts.is_empty() {
            0.0
        } else {
            report.result_counts.iter().sum::<usize>() as f64 / report.result_counts.len() as f64
        };

        println!("Testing: {}", report.name);
        println!("Ingredients: {}", report.ingredients.join(", "));
        for (i, (time, count)) in report
            .times_ms
            .iter()
            .zip(&report.result_counts)
            .enumerate()
        {
            println!("  Run {}: {time}ms ({count} results)", i + 1);
        }
        println!("  Average: {:.2}ms", report.average_ms());
        println!("  Range: {}ms - {}ms", report.min_ms(), report.max_ms());
        println!("  Average results: {avg_results:.1}\n");
    }

    Ok(())
}

fn print_search_results(outcome: &SearchOutcome) {
    if outcome.results.is_empty() {
        println!("No recipes found");
        return;
    }

    println!(
        "\nFound {} recipes for {} in {}ms:\n",
        outcome.total_results,
        outcome.query_ingredients.join(", "),
        outcome.search_time_ms
    );
    println!("{:<7} {:<8} {:<7} {:<50}", "ID", "Matches", "Rating", "Title");
    println!("{}", "-".repeat(75));

    for result in &outcome.results {
        let rating = result
            .recipe
            .ratings
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<7} {:<8} {:<7} {:<50}",
            result.recipe.id,
            result.match_count,
            rating,
            truncate(&result.recipe.title, 48)
        );
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_pool, run_migrations};
    use std::io::Write;

    async fn test_pool() -> DbPool {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_seed_skips_incomplete_entries() {
        let pool = test_pool().await;
        recipes::create_recipe(
            &pool,
            &NewRecipe {
                title: "Stale".to_string(),
                ingredients: vec!["salt".to_string()],
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"title": "Chocolate Cake", "ingredients": ["flour", "chocolate"], "ratings": 4.5, "cook_time": 45}},
                {{"title": "", "ingredients": ["flour"]}},
                {{"title": "No Ingredients", "ingredients": []}},
                {{"title": "Bad Shape", "ingredients": "flour"}},
                {{"title": "Beef Stew", "ingredients": ["beef", "carrots"], "ratings": null}}
            ]"#
        )
        .unwrap();

        let report = seed(&pool, file.path()).await.unwrap();
        assert_eq!(
            report,
            SeedReport {
                processed: 2,
                skipped: 2,
                failed: 1
            }
        );
        assert_eq!(recipes::count_all_recipes(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_seed_missing_file() {
        let pool = test_pool().await;
        let result = seed(&pool, "/nonexistent/recipes.json").await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_bench_runs_every_case() {
        let pool = test_pool().await;
        let batch = vec![NewRecipe {
            title: "Chocolate Cake".to_string(),
            ingredients: vec!["flour".to_string(), "chocolate".to_string()],
            ..Default::default()
        }];
        recipes::insert_recipes(&pool, &batch).await.unwrap();

        let reports = bench(&pool, &SearchConfig::default(), 2).await.unwrap();
        assert_eq!(reports.len(), BENCH_CASES.len());
        assert!(reports.iter().all(|r| r.times_ms.len() == 2));
        assert_eq!(reports[0].result_counts, vec![1, 1]);
        assert_eq!(reports[3].result_counts, vec![1, 1]);
        assert_eq!(reports[5].result_counts, vec![0, 0]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Beef Stew", 48), "Beef Stew");
        assert_eq!(truncate("Crème brûlée with caramel", 10), "Crème b...");
    }
}
