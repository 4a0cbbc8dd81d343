use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_domain::user::UserRole;

use crate::domain::permission::can_modify_recipe;
use crate::domain::repository::{IngredientRepository, RecipeRepository, TagRepository};
use crate::domain::types::{Recipe, RecipeDetail, RecipeDraft, RecipeFilter};
use crate::error::RecipesServiceError;

/// Tag and ingredient lookups shared by create and update.
async fn ensure_references_exist<T: TagRepository, I: IngredientRepository>(
    tags: &T,
    ingredients: &I,
    draft: &RecipeDraft,
) -> Result<(), RecipesServiceError> {
    if tags.find_by_ids(&draft.tag_ids).await?.len() != draft.tag_ids.len() {
        return Err(RecipesServiceError::TagNotFound);
    }
    let ingredient_ids = draft.ingredient_ids();
    if ingredients.find_by_ids(&ingredient_ids).await?.len() != ingredient_ids.len() {
        return Err(RecipesServiceError::IngredientNotFound);
    }
    Ok(())
}

async fn detail_of<R: RecipeRepository>(
    repo: &R,
    recipe: Recipe,
    viewer: Option<Uuid>,
) -> Result<RecipeDetail, RecipesServiceError> {
    repo.details(vec![recipe], viewer)
        .await?
        .into_iter()
        .next()
        .ok_or(RecipesServiceError::RecipeNotFound)
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

pub struct ListRecipesUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> ListRecipesUseCase<R> {
    pub async fn execute(
        &self,
        filter: RecipeFilter,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<RecipeDetail>, RecipesServiceError> {
        let recipes = self.repo.list(&filter, page).await?;
        self.repo.details(recipes, viewer).await
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> GetRecipeUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        viewer: Option<Uuid>,
    ) -> Result<RecipeDetail, RecipesServiceError> {
        let recipe = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        detail_of(&self.repo, recipe, viewer).await
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R: RecipeRepository, T: TagRepository, I: IngredientRepository> {
    pub repo: R,
    pub tags: T,
    pub ingredients: I,
}

impl<R: RecipeRepository, T: TagRepository, I: IngredientRepository> CreateRecipeUseCase<R, T, I> {
    pub async fn execute(
        &self,
        author_id: Uuid,
        draft: RecipeDraft,
    ) -> Result<RecipeDetail, RecipesServiceError> {
        draft.validate()?;
        ensure_references_exist(&self.tags, &self.ingredients, &draft).await?;
        if self.repo.find_id_by_name(&draft.name).await?.is_some() {
            return Err(RecipesServiceError::RecipeAlreadyExists);
        }
        let recipe = self.repo.create(author_id, &draft).await?;
        tracing::info!(recipe_id = recipe.id, %author_id, "recipe created");
        detail_of(&self.repo, recipe, Some(author_id)).await
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R: RecipeRepository, T: TagRepository, I: IngredientRepository> {
    pub repo: R,
    pub tags: T,
    pub ingredients: I,
}

impl<R: RecipeRepository, T: TagRepository, I: IngredientRepository> UpdateRecipeUseCase<R, T, I> {
    pub async fn execute(
        &self,
        id: i32,
        user_id: Uuid,
        role: UserRole,
        draft: RecipeDraft,
    ) -> Result<RecipeDetail, RecipesServiceError> {
        draft.validate()?;
        let recipe = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if !can_modify_recipe(user_id, role, &recipe) {
            return Err(RecipesServiceError::Forbidden);
        }
        ensure_references_exist(&self.tags, &self.ingredients, &draft).await?;
        let taken_by = self.repo.find_id_by_name(&draft.name).await?;
        if taken_by.is_some_and(|other| other != id) {
            return Err(RecipesServiceError::RecipeAlreadyExists);
        }
        self.repo.update(id, &draft).await?;
        let updated = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        detail_of(&self.repo, updated, Some(user_id)).await
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<(), RecipesServiceError> {
        let recipe = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if !can_modify_recipe(user_id, role, &recipe) {
            return Err(RecipesServiceError::Forbidden);
        }
        if !self.repo.delete(id).await? {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        Ok(())
    }
}
