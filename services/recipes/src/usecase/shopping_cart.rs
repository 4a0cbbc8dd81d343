use uuid::Uuid;

use crate::domain::repository::{RecipeRepository, ShoppingCartRepository};
use crate::domain::shopping_list::{self, ShoppingListLine};
use crate::domain::types::Recipe;
use crate::error::RecipesServiceError;

// ── AddToShoppingCart ────────────────────────────────────────────────────────

pub struct AddToShoppingCartUseCase<R: RecipeRepository, C: ShoppingCartRepository> {
    pub recipes: R,
    pub cart: C,
}

impl<R: RecipeRepository, C: ShoppingCartRepository> AddToShoppingCartUseCase<R, C> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<Recipe, RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if !self.cart.add(user_id, recipe_id).await? {
            return Err(RecipesServiceError::ShoppingCartEntryAlreadyExists);
        }
        Ok(recipe)
    }
}

// ── RemoveFromShoppingCart ───────────────────────────────────────────────────

pub struct RemoveFromShoppingCartUseCase<R: RecipeRepository, C: ShoppingCartRepository> {
    pub recipes: R,
    pub cart: C,
}

impl<R: RecipeRepository, C: ShoppingCartRepository> RemoveFromShoppingCartUseCase<R, C> {
    pub async fn execute(&self, user_id: Uuid, recipe_id: i32) -> Result<(), RecipesServiceError> {
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        if !self.cart.remove(user_id, recipe_id).await? {
            return Err(RecipesServiceError::ShoppingCartEntryNotFound);
        }
        Ok(())
    }
}

// ── DownloadShoppingList ─────────────────────────────────────────────────────

pub struct DownloadShoppingListUseCase<C: ShoppingCartRepository> {
    pub cart: C,
}

impl<C: ShoppingCartRepository> DownloadShoppingListUseCase<C> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<ShoppingListLine>, RecipesServiceError> {
        let rows = self.cart.list_ingredients(user_id).await?;
        Ok(shopping_list::aggregate(rows))
    }
}
