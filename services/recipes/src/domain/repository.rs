#![allow(async_fn_in_trait)]

use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;

use crate::domain::shopping_list::CartIngredient;
use crate::domain::types::{
    Ingredient, Recipe, RecipeDetail, RecipeDraft, RecipeFilter, Tag, TagDraft, User,
};
use crate::error::RecipesServiceError;

/// Repository for user profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError>;

    /// Users ordered by username.
    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RecipesServiceError>;

    /// Insert a user. Returns `false` if the email or username is taken.
    async fn create(&self, user: &User) -> Result<bool, RecipesServiceError>;

    async fn update_names(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), RecipesServiceError>;
}

pub trait TagRepository: Send + Sync {
    /// All tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError>;

    /// Returns `None` if the name or slug is taken.
    async fn create(&self, draft: &TagDraft) -> Result<Option<Tag>, RecipesServiceError>;

    /// Returns `false` if the new name or slug collides with another tag.
    async fn update(&self, tag: &Tag) -> Result<bool, RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError>;
}

pub trait IngredientRepository: Send + Sync {
    /// Ingredients whose name starts with `prefix` (case-insensitive), ordered by name.
    async fn search(&self, prefix: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError>;

    async fn find_by_name_and_unit(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Option<Ingredient>, RecipesServiceError>;

    async fn create(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Ingredient, RecipesServiceError>;
}

pub trait RecipeRepository: Send + Sync {
    /// Recipes matching `filter`, newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError>;

    async fn find_id_by_name(&self, name: &str) -> Result<Option<i32>, RecipesServiceError>;

    /// Insert the recipe with its tag and ingredient links atomically.
    async fn create(
        &self,
        author_id: Uuid,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipesServiceError>;

    /// Overwrite the recipe fields and replace its tag and ingredient links atomically.
    async fn update(&self, id: i32, draft: &RecipeDraft) -> Result<(), RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError>;

    /// The author's recipes, newest first, optionally truncated.
    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, RecipesServiceError>;

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError>;

    /// Load authors, tags, ingredients and viewer flags for `recipes`, keeping their order.
    async fn details(
        &self,
        recipes: Vec<Recipe>,
        viewer: Option<Uuid>,
    ) -> Result<Vec<RecipeDetail>, RecipesServiceError>;
}

/// A per-user set of recipes (favorites, shopping cart).
pub trait RecipeMarkRepository: Send + Sync {
    /// Returns `false` if the recipe is already marked.
    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError>;
}

pub trait ShoppingCartRepository: RecipeMarkRepository {
    /// Every ingredient line of every recipe in the user's cart.
    async fn list_ingredients(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CartIngredient>, RecipesServiceError>;
}

pub trait SubscriptionRepository: Send + Sync {
    /// Returns `false` if the subscription already exists.
    async fn add(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn remove(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError>;

    /// Authors the user follows, ordered by username.
    async fn list_authors(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, RecipesServiceError>;

    /// The subset of `author_ids` the user follows.
    async fn subscribed_among(
        &self,
        user_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, RecipesServiceError>;
}
