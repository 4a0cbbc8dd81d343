use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_domain::user::UserRole;
use foodgram_recipes::domain::repository::{
    IngredientRepository, RecipeMarkRepository, RecipeRepository, ShoppingCartRepository,
    SubscriptionRepository, TagRepository, UserRepository,
};
use foodgram_recipes::domain::shopping_list::CartIngredient;
use foodgram_recipes::domain::types::{
    Ingredient, IngredientAmount, Recipe, RecipeDetail, RecipeDraft, RecipeFilter,
    RecipeIngredient, Tag, TagDraft, User, UserProfile,
};
use foodgram_recipes::error::RecipesServiceError;

// ── In-memory store ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
    pub recipe_tags: Vec<(i32, i32)>,
    pub recipe_ingredients: Vec<(i32, IngredientAmount)>,
    pub favorites: Vec<(Uuid, i32)>,
    pub shopping_carts: Vec<(Uuid, i32)>,
    pub subscriptions: Vec<(Uuid, Uuid)>,
}

/// Shared in-memory tables. Clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryDb {
    pub tables: Arc<Mutex<Tables>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn favorites(&self) -> MemoryFavorites {
        MemoryFavorites(self.clone())
    }

    pub fn cart(&self) -> MemoryCart {
        MemoryCart(self.clone())
    }

    pub fn add_user(&self, username: &str) -> User {
        let user = test_user(username);
        self.tables.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn add_tag(&self, name: &str, slug: &str) -> Tag {
        let mut tables = self.tables.lock().unwrap();
        let tag = Tag {
            id: tables.tags.len() as i32 + 1,
            name: name.into(),
            color: "#FF0000".into(),
            slug: slug.into(),
        };
        tables.tags.push(tag.clone());
        tag
    }

    pub fn add_ingredient(&self, name: &str, unit: &str) -> Ingredient {
        let mut tables = self.tables.lock().unwrap();
        let ingredient = Ingredient {
            id: tables.ingredients.len() as i32 + 1,
            name: name.into(),
            measurement_unit: unit.into(),
        };
        tables.ingredients.push(ingredient.clone());
        ingredient
    }
}

pub fn test_user(username: &str) -> User {
    User {
        id: Uuid::now_v7(),
        email: format!("{username}@example.com"),
        username: username.into(),
        first_name: "Test".into(),
        last_name: "User".into(),
        role: UserRole::User,
        created_at: Utc::now(),
    }
}

pub fn draft(name: &str, tag_ids: Vec<i32>, ingredients: Vec<(i32, i32)>) -> RecipeDraft {
    RecipeDraft {
        name: name.into(),
        image: "data:image/png;base64,iVBORw0KGgo=".into(),
        text: "Combine everything and cook.".into(),
        cooking_time: 30,
        tag_ids,
        ingredients: ingredients
            .into_iter()
            .map(|(ingredient_id, amount)| IngredientAmount {
                ingredient_id,
                amount,
            })
            .collect(),
    }
}

impl UserRepository for MemoryDb {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let mut users = tables.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(users, page))
    }

    async fn create(&self, user: &User) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Ok(false);
        }
        tables.users.push(user.clone());
        Ok(true)
    }

    async fn update_names(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            if let Some(first_name) = first_name {
                user.first_name = first_name.into();
            }
            if let Some(last_name) = last_name {
                user.last_name = last_name.into();
            }
        }
        Ok(())
    }
}

impl TagRepository for MemoryDb {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let mut tags = self.tables.lock().unwrap().tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .tags
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &TagDraft) -> Result<Option<Tag>, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .tags
            .iter()
            .any(|t| t.name == draft.name || t.slug == draft.slug)
        {
            return Ok(None);
        }
        let tag = Tag {
            id: tables.tags.len() as i32 + 1,
            name: draft.name.clone(),
            color: draft.color.clone(),
            slug: draft.slug.clone(),
        };
        tables.tags.push(tag.clone());
        Ok(Some(tag))
    }

    async fn update(&self, tag: &Tag) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .tags
            .iter()
            .any(|t| t.id != tag.id && (t.name == tag.name || t.slug == tag.slug))
        {
            return Ok(false);
        }
        if let Some(existing) = tables.tags.iter_mut().find(|t| t.id == tag.id) {
            *existing = tag.clone();
        }
        Ok(true)
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.tags.len();
        tables.tags.retain(|t| t.id != id);
        tables.recipe_tags.retain(|(_, tag_id)| *tag_id != id);
        Ok(tables.tags.len() != before)
    }
}

impl IngredientRepository for MemoryDb {
    async fn search(&self, prefix: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let prefix = prefix.map(str::to_lowercase).unwrap_or_default();
        let mut found: Vec<Ingredient> = self
            .tables
            .lock()
            .unwrap()
            .ingredients
            .iter()
            .filter(|i| i.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn find_by_name_and_unit(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Option<Ingredient>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .ingredients
            .iter()
            .find(|i| i.name == name && i.measurement_unit == measurement_unit)
            .cloned())
    }

    async fn create(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Ingredient, RecipesServiceError> {
        Ok(self.add_ingredient(name, measurement_unit))
    }
}

impl RecipeRepository for MemoryDb {
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let tag_ids: Vec<i32> = tables
            .tags
            .iter()
            .filter(|t| filter.tag_slugs.contains(&t.slug))
            .map(|t| t.id)
            .collect();
        let mut recipes: Vec<Recipe> = tables
            .recipes
            .iter()
            .filter(|r| filter.author_id.is_none_or(|a| r.author_id == a))
            .filter(|r| {
                filter.tag_slugs.is_empty()
                    || tables
                        .recipe_tags
                        .iter()
                        .any(|(rid, tid)| *rid == r.id && tag_ids.contains(tid))
            })
            .filter(|r| {
                filter
                    .favorited_by
                    .is_none_or(|u| tables.favorites.contains(&(u, r.id)))
            })
            .filter(|r| {
                filter
                    .in_shopping_cart_of
                    .is_none_or(|u| tables.shopping_carts.contains(&(u, r.id)))
            })
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(recipes, page))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn find_id_by_name(&self, name: &str) -> Result<Option<i32>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.recipes.iter().find(|r| r.name == name).map(|r| r.id))
    }

    async fn create(
        &self,
        author_id: Uuid,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        // Strictly increasing timestamps keep newest-first ordering deterministic.
        let created_at = Utc::now() + Duration::milliseconds(i64::from(id));
        let recipe = Recipe {
            id,
            author_id,
            name: draft.name.clone(),
            image: draft.image.clone(),
            text: draft.text.clone(),
            cooking_time: draft.cooking_time,
            created_at,
        };
        tables.recipes.push(recipe.clone());
        link(&mut tables, id, draft);
        Ok(recipe)
    }

    async fn update(&self, id: i32, draft: &RecipeDraft) -> Result<(), RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(recipe) = tables.recipes.iter_mut().find(|r| r.id == id) {
            recipe.name = draft.name.clone();
            recipe.image = draft.image.clone();
            recipe.text = draft.text.clone();
            recipe.cooking_time = draft.cooking_time;
        }
        tables.recipe_tags.retain(|(rid, _)| *rid != id);
        tables.recipe_ingredients.retain(|(rid, _)| *rid != id);
        link(&mut tables, id, draft);
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.recipes.len();
        tables.recipes.retain(|r| r.id != id);
        tables.recipe_tags.retain(|(rid, _)| *rid != id);
        tables.recipe_ingredients.retain(|(rid, _)| *rid != id);
        tables.favorites.retain(|(_, rid)| *rid != id);
        tables.shopping_carts.retain(|(_, rid)| *rid != id);
        Ok(tables.recipes.len() != before)
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let mut recipes: Vec<Recipe> = tables
            .recipes
            .iter()
            .filter(|r| r.author_id == author_id)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        if let Some(limit) = limit {
            recipes.truncate(limit as usize);
        }
        Ok(recipes)
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .recipes
            .iter()
            .filter(|r| r.author_id == author_id)
            .count() as u64)
    }

    async fn details(
        &self,
        recipes: Vec<Recipe>,
        viewer: Option<Uuid>,
    ) -> Result<Vec<RecipeDetail>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        recipes
            .into_iter()
            .map(|recipe| -> Result<RecipeDetail, RecipesServiceError> {
                let author = tables
                    .users
                    .iter()
                    .find(|u| u.id == recipe.author_id)
                    .cloned()
                    .ok_or(RecipesServiceError::UserNotFound)?;
                let tags = tables
                    .recipe_tags
                    .iter()
                    .filter(|(rid, _)| *rid == recipe.id)
                    .filter_map(|(_, tid)| tables.tags.iter().find(|t| t.id == *tid).cloned())
                    .collect();
                let ingredients = tables
                    .recipe_ingredients
                    .iter()
                    .filter(|(rid, _)| *rid == recipe.id)
                    .filter_map(|(_, line)| {
                        tables
                            .ingredients
                            .iter()
                            .find(|i| i.id == line.ingredient_id)
                            .map(|i| RecipeIngredient {
                                ingredient: i.clone(),
                                amount: line.amount,
                            })
                    })
                    .collect();
                let is_subscribed =
                    viewer.is_some_and(|v| tables.subscriptions.contains(&(v, author.id)));
                Ok(RecipeDetail {
                    is_favorited: viewer
                        .is_some_and(|v| tables.favorites.contains(&(v, recipe.id))),
                    is_in_shopping_cart: viewer
                        .is_some_and(|v| tables.shopping_carts.contains(&(v, recipe.id))),
                    author: UserProfile {
                        user: author,
                        is_subscribed,
                    },
                    tags,
                    ingredients,
                    recipe,
                })
            })
            .collect()
    }
}

impl SubscriptionRepository for MemoryDb {
    async fn add(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.subscriptions.contains(&(user_id, author_id)) {
            return Ok(false);
        }
        tables.subscriptions.push((user_id, author_id));
        Ok(true)
    }

    async fn remove(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.subscriptions.len();
        tables.subscriptions.retain(|s| *s != (user_id, author_id));
        Ok(tables.subscriptions.len() != before)
    }

    async fn list_authors(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let mut authors: Vec<User> = tables
            .users
            .iter()
            .filter(|u| tables.subscriptions.contains(&(user_id, u.id)))
            .cloned()
            .collect();
        authors.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(authors, page))
    }

    async fn subscribed_among(
        &self,
        user_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .subscriptions
            .iter()
            .filter(|(u, a)| *u == user_id && author_ids.contains(a))
            .map(|(_, a)| *a)
            .collect())
    }
}

// ── Favorites / shopping cart views ──────────────────────────────────────────

#[derive(Clone)]
pub struct MemoryFavorites(pub MemoryDb);

#[derive(Clone)]
pub struct MemoryCart(pub MemoryDb);

impl RecipeMarkRepository for MemoryFavorites {
    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let mut tables = self.0.tables.lock().unwrap();
        Ok(insert_pair(&mut tables.favorites, (user_id, recipe_id)))
    }

    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let mut tables = self.0.tables.lock().unwrap();
        Ok(remove_pair(&mut tables.favorites, (user_id, recipe_id)))
    }
}

impl RecipeMarkRepository for MemoryCart {
    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let mut tables = self.0.tables.lock().unwrap();
        Ok(insert_pair(&mut tables.shopping_carts, (user_id, recipe_id)))
    }

    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let mut tables = self.0.tables.lock().unwrap();
        Ok(remove_pair(&mut tables.shopping_carts, (user_id, recipe_id)))
    }
}

impl ShoppingCartRepository for MemoryCart {
    async fn list_ingredients(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CartIngredient>, RecipesServiceError> {
        let tables = self.0.tables.lock().unwrap();
        Ok(tables
            .shopping_carts
            .iter()
            .filter(|(u, _)| *u == user_id)
            .flat_map(|(_, recipe_id)| {
                tables
                    .recipe_ingredients
                    .iter()
                    .filter(move |(rid, _)| rid == recipe_id)
            })
            .filter_map(|(_, line)| {
                tables
                    .ingredients
                    .iter()
                    .find(|i| i.id == line.ingredient_id)
                    .map(|i| CartIngredient {
                        ingredient_id: i.id,
                        name: i.name.clone(),
                        measurement_unit: i.measurement_unit.clone(),
                        amount: line.amount,
                    })
            })
            .collect())
    }
}

// ── Internals ────────────────────────────────────────────────────────────────

fn paginate<T>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

fn link(tables: &mut Tables, recipe_id: i32, draft: &RecipeDraft) {
    for tag_id in &draft.tag_ids {
        tables.recipe_tags.push((recipe_id, *tag_id));
    }
    for line in &draft.ingredients {
        tables.recipe_ingredients.push((recipe_id, *line));
    }
}

fn insert_pair(pairs: &mut Vec<(Uuid, i32)>, pair: (Uuid, i32)) -> bool {
    if pairs.contains(&pair) {
        return false;
    }
    pairs.push(pair);
    true
}

fn remove_pair(pairs: &mut Vec<(Uuid, i32)>, pair: (Uuid, i32)) -> bool {
    let before = pairs.len();
    pairs.retain(|p| *p != pair);
    pairs.len() != before
}
