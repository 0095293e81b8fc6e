use crate::db::{models::*, DbPool};
use crate::error::{Error, Result};
use chrono::Utc;

/// Create a new recipe
pub async fn create_recipe(pool: &DbPool, new_recipe: &NewRecipe) -> Result<Recipe> {
    new_recipe.validate()?;
    let now = Utc::now();

    let recipe = sqlx::query_as::<_, Recipe>(
        r#"
        INSERT INTO recipes (
            title, cook_time, prep_time, ingredients, ingredient_text,
            ratings, cuisine, category, author, image, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&new_recipe.title)
    .bind(new_recipe.cook_time)
    .bind(new_recipe.prep_time)
    .bind(new_recipe.ingredients_json()?)
    .bind(new_recipe.ingredient_text())
    .bind(new_recipe.ratings)
    .bind(&new_recipe.cuisine)
    .bind(&new_recipe.category)
    .bind(&new_recipe.author)
    .bind(&new_recipe.image)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(recipe)
}

/// Insert a batch of recipes in one transaction
///
/// Callers are expected to have validated every recipe.
pub async fn insert_recipes(pool: &DbPool, batch: &[NewRecipe]) -> Result<u64> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for recipe in batch {
        let result = sqlx::query(
            r#"
            INSERT INTO recipes (
                title, cook_time, prep_time, ingredients, ingredient_text,
                ratings, cuisine, category, author, image, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&recipe.title)
        .bind(recipe.cook_time)
        .bind(recipe.prep_time)
        .bind(recipe.ingredients_json()?)
        .bind(recipe.ingredient_text())
        .bind(recipe.ratings)
        .bind(&recipe.cuisine)
        .bind(&recipe.category)
        .bind(&recipe.author)
        .bind(&recipe.image)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        inserted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

/// Get recipe by ID
pub async fn get_recipe(pool: &DbPool, recipe_id: i64) -> Result<Recipe> {
    let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe {recipe_id} not found")))?;

    Ok(recipe)
}

/// Recipes whose ingredient text matches a `LIKE` pattern, in id order
///
/// The pattern uses `\` as its escape character. `limit` of `None` returns
/// every match.
pub async fn find_by_ingredient_pattern(
    pool: &DbPool,
    like: &str,
    limit: Option<i64>,
) -> Result<Vec<Recipe>> {
    let recipes = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT * FROM recipes
        WHERE ingredient_text LIKE ? ESCAPE '\'
        ORDER BY id
        LIMIT ?
        "#,
    )
    .bind(like)
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await?;

    Ok(recipes)
}

/// List recipes with pagination, best rated first
pub async fn list_recipes(pool: &DbPool, limit: i64, offset: i64) -> Result<Vec<Recipe>> {
    let recipes = sqlx::query_as::<_, Recipe>(
        "SELECT * FROM recipes ORDER BY ratings DESC, id ASC LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(recipes)
}

/// Count all recipes
pub async fn count_all_recipes(pool: &DbPool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

/// Delete every recipe, returning how many were removed
pub async fn delete_all_recipes(pool: &DbPool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM recipes").execute(pool).await?;
    Ok(result.rows_affected())
}
