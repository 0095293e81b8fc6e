use pantry_search::config::SearchConfig;
use pantry_search::db::corpus::SqliteCorpus;
use pantry_search::db::models::NewRecipe;
use pantry_search::db::recipes;
use pantry_search::error::{INGREDIENTS_REQUIRED, INGREDIENT_REQUIRED};
use pantry_search::search::{IngredientsInput, SearchEngine, SearchOutcome, SearchRequest};
use pantry_search::Error;
use sqlx::SqlitePool;

async fn setup_engine() -> SearchEngine<SqliteCorpus> {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let corpus = [
        (
            "Chocolate Cake",
            vec!["flour", "chocolate", "eggs", "sugar"],
            4.5,
        ),
        (
            "Vanilla Cookies",
            vec!["flour", "vanilla", "butter", "sugar"],
            4.2,
        ),
        (
            "Beef Stew",
            vec!["beef", "carrots", "potatoes", "onions"],
            4.8,
        ),
    ];

    for (title, ingredients, ratings) in corpus {
        recipes::create_recipe(
            &pool,
            &NewRecipe {
                title: title.to_string(),
                ingredients: ingredients.into_iter().map(String::from).collect(),
                ratings: Some(ratings),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to create recipe");
    }

    SearchEngine::new(SqliteCorpus::new(pool), SearchConfig::default())
}

fn titles(outcome: &SearchOutcome) -> Vec<&str> {
    outcome
        .results
        .iter()
        .map(|r| r.recipe.title.as_str())
        .collect()
}

#[tokio::test]
async fn test_single_ingredient_ranked_by_rating() {
    let engine = setup_engine().await;

    let outcome = engine
        .search(SearchRequest::new(vec!["flour"]).with_limit(10))
        .await
        .unwrap();

    assert_eq!(titles(&outcome), vec!["Chocolate Cake", "Vanilla Cookies"]);
    assert_eq!(outcome.total_results, 2);
    assert_eq!(outcome.limit, 10);
}

#[tokio::test]
async fn test_shared_ingredients_tie_on_match_count() {
    let engine = setup_engine().await;

    let outcome = engine
        .search(SearchRequest::new(vec!["flour", "sugar"]))
        .await
        .unwrap();

    assert_eq!(titles(&outcome), vec!["Chocolate Cake", "Vanilla Cookies"]);
    assert!(outcome.results.iter().all(|r| r.match_count == 2));
}

#[tokio::test]
async fn test_more_matches_outrank_higher_rating() {
    let engine = setup_engine().await;

    let outcome = engine
        .search(SearchRequest::new(vec!["beef", "flour", "chocolate"]))
        .await
        .unwrap();

    assert_eq!(
        titles(&outcome),
        vec!["Chocolate Cake", "Beef Stew", "Vanilla Cookies"]
    );
    assert_eq!(outcome.results[0].match_count, 2);
}

#[tokio::test]
async fn test_typos_still_find_recipes() {
    let engine = setup_engine().await;

    for typo in ["chocolat", "choclate", "chocolaet", "chocollate"] {
        let outcome = engine.search(SearchRequest::new(vec![typo])).await.unwrap();
        assert_eq!(titles(&outcome), vec!["Chocolate Cake"], "typo: {typo}");
    }
}

#[tokio::test]
async fn test_unknown_ingredient_returns_empty() {
    let engine = setup_engine().await;

    let outcome = engine
        .search(SearchRequest::new(vec!["saffron"]))
        .await
        .unwrap();

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.total_results, 0);
    assert_eq!(outcome.query_ingredients, vec!["saffron"]);
}

#[tokio::test]
async fn test_blank_ingredient_rejected() {
    let engine = setup_engine().await;

    let err = engine
        .search(SearchRequest::new(vec![""]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(ref msg) if msg == INGREDIENT_REQUIRED));
}

#[tokio::test]
async fn test_missing_ingredients_rejected() {
    let engine = setup_engine().await;

    let err = engine.search(SearchRequest::default()).await.unwrap_err();

    assert!(matches!(err, Error::Validation(ref msg) if msg == INGREDIENTS_REQUIRED));
}

#[tokio::test]
async fn test_limit_keeps_highest_ranked() {
    let engine = setup_engine().await;

    let outcome = engine
        .search(SearchRequest::new(vec!["flour"]).with_limit(1))
        .await
        .unwrap();

    assert_eq!(titles(&outcome), vec!["Chocolate Cake"]);
    assert_eq!(outcome.limit, 1);
    assert_eq!(outcome.total_results, 1);
}

#[tokio::test]
async fn test_out_of_range_limits() {
    let engine = setup_engine().await;

    let outcome = engine
        .search(SearchRequest::new(vec!["flour"]).with_limit(0))
        .await
        .unwrap();
    assert_eq!(outcome.limit, 10);
    assert_eq!(outcome.results.len(), 2);

    let outcome = engine
        .search(SearchRequest::new(vec!["flour"]).with_limit(500))
        .await
        .unwrap();
    assert_eq!(outcome.limit, 50);
}

#[tokio::test]
async fn test_single_string_and_case_insensitive() {
    let engine = setup_engine().await;

    let outcome = engine
        .search(SearchRequest::new(IngredientsInput::One("  BEEF ".to_string())))
        .await
        .unwrap();

    assert_eq!(titles(&outcome), vec!["Beef Stew"]);
    assert_eq!(outcome.query_ingredients, vec!["  BEEF "]);
}
