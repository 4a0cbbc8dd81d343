use chrono::{DateTime, Utc};
use uuid::Uuid;

use foodgram_domain::user::UserRole;

use crate::error::RecipesServiceError;

/// Registered user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// A user as seen by a particular viewer.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    /// Whether the viewer follows this user. Always false for anonymous viewers and self.
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Tag fields supplied on create or update.
#[derive(Debug, Clone)]
pub struct TagDraft {
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author_id: Uuid,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
}

/// One ingredient line of a recipe submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// Recipe fields supplied on create or update. Tags and ingredients replace
/// the existing sets wholesale.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// A recipe with everything needed to render it for one viewer.
#[derive(Debug, Clone)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub author: UserProfile,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Filters for recipe list queries. All present filters must match.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub author_id: Option<Uuid>,
    /// Matches recipes carrying any of these tag slugs.
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<Uuid>,
    pub in_shopping_cart_of: Option<Uuid>,
}

/// An author the viewer follows, with a preview of their recipes.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub author: User,
    pub recipes_count: u64,
    /// Newest first, truncated to the requested limit.
    pub recipes: Vec<Recipe>,
}

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_UNIT_LEN: usize = 7;
pub const MAX_USERNAME_LEN: usize = 150;
pub const MAX_EMAIL_LEN: usize = 254;
pub const DEFAULT_TAG_COLOR: &str = "#FF0000";

/// Usernames allow ASCII word characters plus `.@+-`. `me` is reserved for the
/// profile route.
pub fn validate_username(username: &str) -> bool {
    if username.is_empty() || username.len() > MAX_USERNAME_LEN || username == "me" {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'))
}

pub fn validate_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_NAME_LEN
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Non-blank, and no longer than `max` characters as stored (untrimmed).
pub fn fits_column(value: &str, max: usize) -> bool {
    !value.trim().is_empty() && value.chars().count() <= max
}

/// `#RRGGBB`, either case.
pub fn validate_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

impl TagDraft {
    pub fn validate(&self) -> Result<(), RecipesServiceError> {
        if !fits_column(&self.name, MAX_NAME_LEN) {
            return Err(RecipesServiceError::MissingData);
        }
        if !validate_slug(&self.slug) {
            return Err(RecipesServiceError::InvalidSlug);
        }
        if !validate_color(&self.color) {
            return Err(RecipesServiceError::InvalidColor);
        }
        Ok(())
    }
}

impl RecipeDraft {
    /// Checks that need no storage access. Runs before any lookup.
    pub fn validate(&self) -> Result<(), RecipesServiceError> {
        if self.ingredients.is_empty() || self.tag_ids.is_empty() {
            return Err(RecipesServiceError::MissingData);
        }
        if self.ingredients.iter().any(|i| i.amount < 1) {
            return Err(RecipesServiceError::InvalidAmount);
        }
        let mut ingredient_ids: Vec<i32> = self.ingredients.iter().map(|i| i.ingredient_id).collect();
        ingredient_ids.sort_unstable();
        ingredient_ids.dedup();
        if ingredient_ids.len() != self.ingredients.len() {
            return Err(RecipesServiceError::DuplicateIngredient);
        }
        let mut tag_ids = self.tag_ids.clone();
        tag_ids.sort_unstable();
        tag_ids.dedup();
        if tag_ids.len() != self.tag_ids.len() {
            return Err(RecipesServiceError::DuplicateTag);
        }
        if self.cooking_time < 1 {
            return Err(RecipesServiceError::InvalidCookingTime);
        }
        if !fits_column(&self.name, MAX_NAME_LEN) || self.text.trim().is_empty() {
            return Err(RecipesServiceError::MissingData);
        }
        Ok(())
    }

    pub fn ingredient_ids(&self) -> Vec<i32> {
        self.ingredients.iter().map(|i| i.ingredient_id).collect()
    }
}
