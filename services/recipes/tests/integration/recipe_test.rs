use foodgram_domain::pagination::PageRequest;
use foodgram_domain::user::UserRole;
use foodgram_recipes::domain::types::RecipeFilter;
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::favorite::{AddFavoriteUseCase, RemoveFavoriteUseCase};
use foodgram_recipes::usecase::recipe::{
    CreateRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase, UpdateRecipeUseCase,
};

use crate::helpers::{MemoryDb, draft};

fn seeded() -> MemoryDb {
    let db = MemoryDb::new();
    db.add_tag("Breakfast", "breakfast"); // 1
    db.add_tag("Dinner", "dinner"); // 2
    db.add_ingredient("Egg", "pcs"); // 1
    db.add_ingredient("Milk", "ml"); // 2
    db
}

fn create_usecase(db: &MemoryDb) -> CreateRecipeUseCase<MemoryDb, MemoryDb, MemoryDb> {
    CreateRecipeUseCase {
        repo: db.clone(),
        tags: db.clone(),
        ingredients: db.clone(),
    }
}

#[tokio::test]
async fn should_reject_amount_zero() {
    let db = seeded();
    let author = db.add_user("chef").id;
    let result = create_usecase(&db)
        .execute(author, draft("Omelette", vec![1], vec![(1, 0)]))
        .await;
    assert!(matches!(result, Err(RecipesServiceError::InvalidAmount)));
    assert!(db.tables.lock().unwrap().recipes.is_empty());
}

#[tokio::test]
async fn should_accept_amount_one() {
    let db = seeded();
    let author = db.add_user("chef").id;
    let detail = create_usecase(&db)
        .execute(author, draft("Omelette", vec![1], vec![(1, 1)]))
        .await
        .unwrap();
    assert_eq!(detail.ingredients.len(), 1);
    assert_eq!(detail.ingredients[0].amount, 1);
    assert_eq!(detail.ingredients[0].ingredient.name, "Egg");
    assert_eq!(detail.author.user.id, author);
}

#[tokio::test]
async fn should_reject_duplicate_ingredient_lines() {
    let db = seeded();
    let author = db.add_user("chef").id;
    let result = create_usecase(&db)
        .execute(author, draft("Omelette", vec![1], vec![(1, 2), (1, 3)]))
        .await;
    assert!(matches!(result, Err(RecipesServiceError::DuplicateIngredient)));
}

#[tokio::test]
async fn should_replace_tags_and_ingredients_on_update() {
    let db = seeded();
    let author = db.add_user("chef").id;
    let created = create_usecase(&db)
        .execute(author, draft("Omelette", vec![1], vec![(1, 2)]))
        .await
        .unwrap();

    let updated = UpdateRecipeUseCase {
        repo: db.clone(),
        tags: db.clone(),
        ingredients: db.clone(),
    }
    .execute(
        created.recipe.id,
        author,
        UserRole::User,
        draft("Omelette", vec![2], vec![(2, 200)]),
    )
    .await
    .unwrap();

    let tag_slugs: Vec<_> = updated.tags.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(tag_slugs, vec!["dinner"]);
    assert_eq!(updated.ingredients.len(), 1);
    assert_eq!(updated.ingredients[0].ingredient.name, "Milk");
    assert_eq!(updated.ingredients[0].amount, 200);
}

#[tokio::test]
async fn should_filter_by_tag_and_favorites() {
    let db = seeded();
    let author = db.add_user("chef").id;
    let reader = db.add_user("reader").id;
    let create = create_usecase(&db);
    let omelette = create
        .execute(author, draft("Omelette", vec![1], vec![(1, 2)]))
        .await
        .unwrap();
    create
        .execute(author, draft("Stew", vec![2], vec![(2, 50)]))
        .await
        .unwrap();

    AddFavoriteUseCase {
        recipes: db.clone(),
        favorites: db.favorites(),
    }
    .execute(reader, omelette.recipe.id)
    .await
    .unwrap();

    let list = ListRecipesUseCase { repo: db.clone() };
    let by_tag = list
        .execute(
            RecipeFilter {
                tag_slugs: vec!["dinner".into()],
                ..Default::default()
            },
            None,
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].recipe.name, "Stew");

    let favorited = list
        .execute(
            RecipeFilter {
                favorited_by: Some(reader),
                ..Default::default()
            },
            Some(reader),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(favorited.len(), 1);
    assert!(favorited[0].is_favorited);

    let all = list
        .execute(RecipeFilter::default(), None, PageRequest::default())
        .await
        .unwrap();
    let names: Vec<_> = all.iter().map(|d| d.recipe.name.as_str()).collect();
    assert_eq!(names, vec!["Stew", "Omelette"]);
}

#[tokio::test]
async fn should_reject_second_favorite() {
    let db = seeded();
    let author = db.add_user("chef").id;
    let created = create_usecase(&db)
        .execute(author, draft("Omelette", vec![1], vec![(1, 2)]))
        .await
        .unwrap();
    let add = AddFavoriteUseCase {
        recipes: db.clone(),
        favorites: db.favorites(),
    };
    add.execute(author, created.recipe.id).await.unwrap();
    let second = add.execute(author, created.recipe.id).await;
    assert!(matches!(second, Err(RecipesServiceError::FavoriteAlreadyExists)));

    let viewed = GetRecipeUseCase { repo: db.clone() }
        .execute(created.recipe.id, Some(author))
        .await
        .unwrap();
    assert!(viewed.is_favorited);
    assert!(!viewed.is_in_shopping_cart);
}

#[tokio::test]
async fn should_remove_favorite_once() {
    let db = seeded();
    let author = db.add_user("chef").id;
    let created = create_usecase(&db)
        .execute(author, draft("Omelette", vec![1], vec![(1, 2)]))
        .await
        .unwrap();
    AddFavoriteUseCase {
        recipes: db.clone(),
        favorites: db.favorites(),
    }
    .execute(author, created.recipe.id)
    .await
    .unwrap();

    let remove = RemoveFavoriteUseCase {
        recipes: db.clone(),
        favorites: db.favorites(),
    };
    remove.execute(author, created.recipe.id).await.unwrap();
    let again = remove.execute(author, created.recipe.id).await;
    assert!(matches!(again, Err(RecipesServiceError::FavoriteNotFound)));

    let missing = remove.execute(author, 999).await;
    assert!(matches!(missing, Err(RecipesServiceError::RecipeNotFound)));
}
