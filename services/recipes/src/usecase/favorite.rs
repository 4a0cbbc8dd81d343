use uuid::Uuid;

use crate::domain::repository::{RecipeMarkRepository, RecipeRepository};
use crate::domain::types::Recipe;
use crate::error::RecipesServiceError;

// ── AddFavorite ──────────────────────────────────────────────────────────────

pub struct AddFavoriteUseCase<R: RecipeRepository, F: RecipeMarkRepository> {
    pub recipes: R,
    pub favorites: F,
}

impl<R: RecipeRepository, F: RecipeMarkRepository> AddFavoriteUseCase<R, F> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<Recipe, RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if !self.favorites.add(user_id, recipe_id).await? {
            return Err(RecipesServiceError::FavoriteAlreadyExists);
        }
        Ok(recipe)
    }
}

// ── RemoveFavorite ───────────────────────────────────────────────────────────

pub struct RemoveFavoriteUseCase<R: RecipeRepository, F: RecipeMarkRepository> {
    pub recipes: R,
    pub favorites: F,
}

impl<R: RecipeRepository, F: RecipeMarkRepository> RemoveFavoriteUseCase<R, F> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<(), RecipesServiceError> {
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        if !self.favorites.remove(user_id, recipe_id).await? {
            return Err(RecipesServiceError::FavoriteNotFound);
        }
        Ok(())
    }
}
