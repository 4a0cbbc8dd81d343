use crate::domain::repository::IngredientRepository;
use crate::domain::types::{Ingredient, MAX_NAME_LEN, MAX_UNIT_LEN};
use crate::error::RecipesServiceError;

// ── ListIngredients ──────────────────────────────────────────────────────────

pub struct ListIngredientsUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> ListIngredientsUseCase<R> {
    pub async fn execute(&self, name: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let prefix = name.map(str::trim).filter(|n| !n.is_empty());
        self.repo.search(prefix).await
    }
}

// ── GetIngredient ────────────────────────────────────────────────────────────

pub struct GetIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> GetIngredientUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::IngredientNotFound)
    }
}

// ── CreateIngredient ─────────────────────────────────────────────────────────

pub struct CreateIngredientInput {
    pub name: String,
    pub measurement_unit: String,
}

pub struct CreateIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> CreateIngredientUseCase<R> {
    /// Returns the ingredient and whether it was newly inserted. An identical
    /// (name, unit) row is reused instead of duplicated.
    pub async fn execute(
        &self,
        input: CreateIngredientInput,
    ) -> Result<(Ingredient, bool), RecipesServiceError> {
        let name = input.name.trim();
        let unit = input.measurement_unit.trim();
        if name.is_empty()
            || unit.is_empty()
            || name.chars().count() > MAX_NAME_LEN
            || unit.chars().count() > MAX_UNIT_LEN
        {
            return Err(RecipesServiceError::MissingData);
        }
        if let Some(existing) = self.repo.find_by_name_and_unit(name, unit).await? {
            return Ok((existing, false));
        }
        let created = self.repo.create(name, unit).await?;
        Ok((created, true))
    }
}
