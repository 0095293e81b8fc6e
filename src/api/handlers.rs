use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::models::*,
    db::{self, corpus::SqliteCorpus},
    search::{RecipeRecord, SearchEngine},
    Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub engine: Arc<SearchEngine<SqliteCorpus>>,
    pub settings: crate::config::Settings,
}

impl AppState {
    pub fn new(pool: sqlx::SqlitePool, settings: crate::config::Settings) -> Self {
        let engine = SearchEngine::new(SqliteCorpus::new(pool.clone()), settings.search.clone());
        Self {
            pool,
            engine: Arc::new(engine),
            settings,
        }
    }
}

/// GET /api/recipes/search - Search recipes by ingredients
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>> {
    let params = SearchParams::from_pairs(pairs);
    debug!("Search request: {:?}", params);

    let outcome = state.engine.search(params.into()).await?;

    Ok(Json(outcome.into()))
}

/// GET /api/recipes/:id - Get recipe details
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetail>> {
    debug!("Get recipe request: {}", id);

    let recipe = RecipeRecord::try_from(db::recipes::get_recipe(&state.pool, id).await?)?;
    let ingredient_names = recipe.ingredient_names();

    Ok(Json(RecipeDetail {
        recipe: recipe.into(),
        ingredient_names,
    }))
}

/// GET /api/stats - Get system statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    debug!("Get stats request");

    let total_recipes = db::recipes::count_all_recipes(&state.pool).await?;

    Ok(Json(Stats { total_recipes }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let db_healthy = db::ping(&state.pool).await;

    Ok(Json(ReadinessResponse {
        ready: db_healthy,
        database: if db_healthy { "ok" } else { "error" }.to_string(),
    }))
}
