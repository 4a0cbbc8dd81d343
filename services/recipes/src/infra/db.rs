use std::collections::{HashMap, HashSet};

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, Statement, TransactionError, TransactionTrait,
    sea_query::{Expr, Func, OnConflict, Query},
};
use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_domain::user::UserRole;
use foodgram_recipes_schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_carts,
    subscriptions, tags, users,
};

use crate::domain::repository::{
    IngredientRepository, RecipeMarkRepository, RecipeRepository, ShoppingCartRepository,
    SubscriptionRepository, TagRepository, UserRepository,
};
use crate::domain::shopping_list::CartIngredient;
use crate::domain::types::{
    Ingredient, Recipe, RecipeDetail, RecipeDraft, RecipeFilter, RecipeIngredient, Tag, TagDraft,
    User, UserProfile,
};
use crate::error::RecipesServiceError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RecipesServiceError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Username)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn create(&self, user: &User) -> Result<bool, RecipesServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            role: Set(i16::from(user.role.as_u8())),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update_names(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), RecipesServiceError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(first_name) = first_name {
            am.first_name = Set(first_name.to_owned());
        }
        if let Some(last_name) = last_name {
            am.last_name = Set(last_name.to_owned());
        }
        am.update(&self.db).await.context("update user names")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        role: u8::try_from(model.role)
            .ok()
            .and_then(UserRole::from_u8)
            .unwrap_or_default(),
        created_at: model.created_at,
    }
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("find tags by ids")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn create(&self, draft: &TagDraft) -> Result<Option<Tag>, RecipesServiceError> {
        let result = tags::ActiveModel {
            id: NotSet,
            name: Set(draft.name.clone()),
            color: Set(draft.color.clone()),
            slug: Set(draft.slug.clone()),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(Some(tag_from_model(model))),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("create tag").into()),
        }
    }

    async fn update(&self, tag: &Tag) -> Result<bool, RecipesServiceError> {
        let result = tags::ActiveModel {
            id: Set(tag.id),
            name: Set(tag.name.clone()),
            color: Set(tag.color.clone()),
            slug: Set(tag.slug.clone()),
        }
        .update(&self.db)
        .await;
        match result {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e).context("update tag").into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let result = tags::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete tag")?;
        Ok(result.rows_affected > 0)
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

impl IngredientRepository for DbIngredientRepository {
    async fn search(&self, prefix: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = prefix {
            let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(ingredients::Column::Name))).like(pattern),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("search ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let models = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find ingredients by ids")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_name_and_unit(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Option<Ingredient>, RecipesServiceError> {
        let model = ingredients::Entity::find()
            .filter(ingredients::Column::Name.eq(name))
            .filter(ingredients::Column::MeasurementUnit.eq(measurement_unit))
            .order_by_asc(ingredients::Column::Id)
            .one(&self.db)
            .await
            .context("find ingredient by name and unit")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn create(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Ingredient, RecipesServiceError> {
        let model = ingredients::ActiveModel {
            id: NotSet,
            name: Set(name.to_owned()),
            measurement_unit: Set(measurement_unit.to_owned()),
        }
        .insert(&self.db)
        .await
        .context("create ingredient")?;
        Ok(ingredient_from_model(model))
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

async fn insert_links<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    draft: &RecipeDraft,
) -> Result<(), DbErr> {
    recipe_tags::Entity::insert_many(draft.tag_ids.iter().map(|&tag_id| {
        recipe_tags::ActiveModel {
            recipe_id: Set(recipe_id),
            tag_id: Set(tag_id),
        }
    }))
    .exec_without_returning(conn)
    .await?;
    recipe_ingredients::Entity::insert_many(draft.ingredients.iter().map(|line| {
        recipe_ingredients::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(line.ingredient_id),
            amount: Set(line.amount),
        }
    }))
    .exec_without_returning(conn)
    .await?;
    Ok(())
}

/// A unique violation on `recipes.name` surfaces as `RecipeAlreadyExists`.
fn map_recipe_write_error(err: TransactionError<DbErr>, action: &'static str) -> RecipesServiceError {
    match err {
        TransactionError::Transaction(ref e) if is_unique_violation(e) => {
            RecipesServiceError::RecipeAlreadyExists
        }
        other => anyhow::Error::new(other).context(action).into(),
    }
}

impl RecipeRepository for DbRecipeRepository {
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        let mut query = recipes::Entity::find();
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if !filter.tag_slugs.is_empty() {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
                        .from(recipe_tags::Entity)
                        .inner_join(
                            tags::Entity,
                            Expr::col((tags::Entity, tags::Column::Id))
                                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                        )
                        .and_where(
                            Expr::col((tags::Entity, tags::Column::Slug))
                                .is_in(filter.tag_slugs.iter().cloned()),
                        )
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.favorited_by {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(favorites::Column::RecipeId)
                        .from(favorites::Entity)
                        .and_where(favorites::Column::UserId.eq(user_id))
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.in_shopping_cart_of {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(shopping_carts::Column::RecipeId)
                        .from(shopping_carts::Entity)
                        .and_where(shopping_carts::Column::UserId.eq(user_id))
                        .to_owned(),
                ),
            );
        }
        let models = query
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list recipes")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        Ok(model.map(recipe_from_model))
    }

    async fn find_id_by_name(&self, name: &str) -> Result<Option<i32>, RecipesServiceError> {
        let model = recipes::Entity::find()
            .filter(recipes::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find recipe by name")?;
        Ok(model.map(|m| m.id))
    }

    async fn create(
        &self,
        author_id: Uuid,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipesServiceError> {
        let draft = draft.clone();
        let model = self
            .db
            .transaction::<_, recipes::Model, DbErr>(|txn| {
                Box::pin(async move {
                    let recipe = recipes::ActiveModel {
                        id: NotSet,
                        author_id: Set(author_id),
                        name: Set(draft.name.clone()),
                        image: Set(draft.image.clone()),
                        text: Set(draft.text.clone()),
                        cooking_time: Set(draft.cooking_time),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;
                    insert_links(txn, recipe.id, &draft).await?;
                    Ok(recipe)
                })
            })
            .await
            .map_err(|e| map_recipe_write_error(e, "create recipe"))?;
        Ok(recipe_from_model(model))
    }

    async fn update(&self, id: i32, draft: &RecipeDraft) -> Result<(), RecipesServiceError> {
        let draft = draft.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    recipes::ActiveModel {
                        id: Set(id),
                        name: Set(draft.name.clone()),
                        image: Set(draft.image.clone()),
                        text: Set(draft.text.clone()),
                        cooking_time: Set(draft.cooking_time),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    recipe_tags::Entity::delete_many()
                        .filter(recipe_tags::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    recipe_ingredients::Entity::delete_many()
                        .filter(recipe_ingredients::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    insert_links(txn, id, &draft).await
                })
            })
            .await
            .map_err(|e| map_recipe_write_error(e, "update recipe"))
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        let mut query = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let models = query
            .all(&self.db)
            .await
            .context("list recipes by author")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("count recipes by author")?;
        Ok(count)
    }

    async fn details(
        &self,
        recipes: Vec<Recipe>,
        viewer: Option<Uuid>,
    ) -> Result<Vec<RecipeDetail>, RecipesServiceError> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }
        let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
        let author_ids: Vec<Uuid> = recipes
            .iter()
            .map(|r| r.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let authors: HashMap<Uuid, User> = users::Entity::find()
            .filter(users::Column::Id.is_in(author_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("load recipe authors")?
            .into_iter()
            .map(|m| (m.id, user_from_model(m)))
            .collect();

        let tag_links = recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("load recipe tag links")?;
        let tags_by_id: HashMap<i32, Tag> = tags::Entity::find()
            .filter(tags::Column::Id.is_in(tag_links.iter().map(|l| l.tag_id)))
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("load recipe tags")?
            .into_iter()
            .map(|m| (m.id, tag_from_model(m)))
            .collect();

        let ingredient_links = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("load recipe ingredient links")?;
        let ingredients_by_id: HashMap<i32, Ingredient> = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ingredient_links.iter().map(|l| l.ingredient_id)))
            .all(&self.db)
            .await
            .context("load recipe ingredients")?
            .into_iter()
            .map(|m| (m.id, ingredient_from_model(m)))
            .collect();

        let (followed, favorited, in_cart) = match viewer {
            Some(viewer) => {
                let followed: HashSet<Uuid> = subscriptions::Entity::find()
                    .filter(subscriptions::Column::UserId.eq(viewer))
                    .filter(subscriptions::Column::AuthorId.is_in(author_ids.iter().copied()))
                    .all(&self.db)
                    .await
                    .context("load viewer subscriptions")?
                    .into_iter()
                    .map(|m| m.author_id)
                    .collect();
                let favorited: HashSet<i32> = favorites::Entity::find()
                    .filter(favorites::Column::UserId.eq(viewer))
                    .filter(favorites::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                    .all(&self.db)
                    .await
                    .context("load viewer favorites")?
                    .into_iter()
                    .map(|m| m.recipe_id)
                    .collect();
                let in_cart: HashSet<i32> = shopping_carts::Entity::find()
                    .filter(shopping_carts::Column::UserId.eq(viewer))
                    .filter(shopping_carts::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                    .all(&self.db)
                    .await
                    .context("load viewer shopping cart")?
                    .into_iter()
                    .map(|m| m.recipe_id)
                    .collect();
                (followed, favorited, in_cart)
            }
            None => Default::default(),
        };

        let mut details = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            let author = authors
                .get(&recipe.author_id)
                .cloned()
                .with_context(|| format!("author {} of recipe {} is missing", recipe.author_id, recipe.id))?;
            let mut recipe_tags: Vec<Tag> = tag_links
                .iter()
                .filter(|l| l.recipe_id == recipe.id)
                .filter_map(|l| tags_by_id.get(&l.tag_id).cloned())
                .collect();
            recipe_tags.sort_by(|a, b| a.name.cmp(&b.name));
            let mut recipe_ingredients: Vec<RecipeIngredient> = ingredient_links
                .iter()
                .filter(|l| l.recipe_id == recipe.id)
                .filter_map(|l| {
                    ingredients_by_id.get(&l.ingredient_id).map(|i| RecipeIngredient {
                        ingredient: i.clone(),
                        amount: l.amount,
                    })
                })
                .collect();
            recipe_ingredients.sort_by(|a, b| a.ingredient.name.cmp(&b.ingredient.name));
            details.push(RecipeDetail {
                author: UserProfile {
                    is_subscribed: followed.contains(&author.id),
                    user: author,
                },
                tags: recipe_tags,
                ingredients: recipe_ingredients,
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                recipe,
            });
        }
        Ok(details)
    }
}

fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: model.id,
        author_id: model.author_id,
        name: model.name,
        image: model.image,
        text: model.text,
        cooking_time: model.cooking_time,
        created_at: model.created_at,
    }
}

// ── Favorite repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFavoriteRepository {
    pub db: DatabaseConnection,
}

impl RecipeMarkRepository for DbFavoriteRepository {
    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let inserted = favorites::Entity::insert(favorites::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("add favorite")?;
        Ok(inserted > 0)
    }

    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let result = favorites::Entity::delete_many()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::RecipeId.eq(recipe_id))
            .exec(&self.db)
            .await
            .context("remove favorite")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Shopping cart repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbShoppingCartRepository {
    pub db: DatabaseConnection,
}

impl RecipeMarkRepository for DbShoppingCartRepository {
    async fn add(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let inserted = shopping_carts::Entity::insert(shopping_carts::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                shopping_carts::Column::UserId,
                shopping_carts::Column::RecipeId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("add to shopping cart")?;
        Ok(inserted > 0)
    }

    async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
        let result = shopping_carts::Entity::delete_many()
            .filter(shopping_carts::Column::UserId.eq(user_id))
            .filter(shopping_carts::Column::RecipeId.eq(recipe_id))
            .exec(&self.db)
            .await
            .context("remove from shopping cart")?;
        Ok(result.rows_affected > 0)
    }
}

impl ShoppingCartRepository for DbShoppingCartRepository {
    async fn list_ingredients(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CartIngredient>, RecipesServiceError> {
        #[derive(Debug, FromQueryResult)]
        struct CartRow {
            ingredient_id: i32,
            name: String,
            measurement_unit: String,
            amount: i32,
        }

        let rows = CartRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT i.id AS ingredient_id, i.name, i.measurement_unit, ri.amount
                FROM shopping_carts sc
                JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
                JOIN ingredients i ON i.id = ri.ingredient_id
                WHERE sc.user_id = $1
            "#,
            [user_id.into()],
        ))
        .all(&self.db)
        .await
        .context("list shopping cart ingredients")?;

        Ok(rows
            .into_iter()
            .map(|row| CartIngredient {
                ingredient_id: row.ingredient_id,
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: row.amount,
            })
            .collect())
    }
}

// ── Subscription repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl SubscriptionRepository for DbSubscriptionRepository {
    async fn add(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let inserted = subscriptions::Entity::insert(subscriptions::ActiveModel {
            user_id: Set(user_id),
            author_id: Set(author_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                subscriptions::Column::UserId,
                subscriptions::Column::AuthorId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("add subscription")?;
        Ok(inserted > 0)
    }

    async fn remove(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let result = subscriptions::Entity::delete_many()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .filter(subscriptions::Column::AuthorId.eq(author_id))
            .exec(&self.db)
            .await
            .context("remove subscription")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_authors(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, RecipesServiceError> {
        let models = users::Entity::find()
            .filter(
                users::Column::Id.in_subquery(
                    Query::select()
                        .column(subscriptions::Column::AuthorId)
                        .from(subscriptions::Entity)
                        .and_where(subscriptions::Column::UserId.eq(user_id))
                        .to_owned(),
                ),
            )
            .order_by_asc(users::Column::Username)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list subscribed authors")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn subscribed_among(
        &self,
        user_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, RecipesServiceError> {
        let models = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .filter(subscriptions::Column::AuthorId.is_in(author_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find subscribed authors")?;
        Ok(models.into_iter().map(|m| m.author_id).collect())
    }
}
