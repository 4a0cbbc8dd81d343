use uuid::Uuid;

use foodgram_domain::user::UserRole;
use foodgram_recipes::domain::repository::RecipeRepository;
use foodgram_recipes::domain::shopping_list::render;
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::recipe::{CreateRecipeUseCase, DeleteRecipeUseCase};
use foodgram_recipes::usecase::shopping_cart::{
    AddToShoppingCartUseCase, DownloadShoppingListUseCase, RemoveFromShoppingCartUseCase,
};

use crate::helpers::{MemoryDb, draft};

async fn create_recipe(db: &MemoryDb, author: Uuid, name: &str, lines: Vec<(i32, i32)>) -> i32 {
    let usecase = CreateRecipeUseCase {
        repo: db.clone(),
        tags: db.clone(),
        ingredients: db.clone(),
    };
    usecase
        .execute(author, draft(name, vec![1], lines))
        .await
        .unwrap()
        .recipe
        .id
}

async fn add_to_cart(db: &MemoryDb, user: Uuid, recipe_id: i32) -> Result<(), RecipesServiceError> {
    AddToShoppingCartUseCase {
        recipes: db.clone(),
        cart: db.cart(),
    }
    .execute(user, recipe_id)
    .await
    .map(|_| ())
}

async fn download(db: &MemoryDb, user: Uuid) -> String {
    let lines = DownloadShoppingListUseCase { cart: db.cart() }
        .execute(user)
        .await
        .unwrap();
    render(&lines)
}

fn seeded() -> (MemoryDb, Uuid) {
    let db = MemoryDb::new();
    let author = db.add_user("chef").id;
    db.add_tag("Lunch", "lunch");
    db.add_ingredient("Salt", "g"); // 1
    db.add_ingredient("Potato", "pcs"); // 2
    db.add_ingredient("Butter", "g"); // 3
    (db, author)
}

#[tokio::test]
async fn should_produce_empty_list_for_empty_cart() {
    let (db, _) = seeded();
    let user = db.add_user("shopper").id;
    assert_eq!(download(&db, user).await, "");
}

#[tokio::test]
async fn should_sum_shared_ingredient_across_cart_recipes() {
    let (db, author) = seeded();
    let user = db.add_user("shopper").id;
    let mash = create_recipe(&db, author, "Mash", vec![(1, 5), (2, 4)]).await;
    let fries = create_recipe(&db, author, "Fries", vec![(1, 10), (3, 20)]).await;
    add_to_cart(&db, user, mash).await.unwrap();
    add_to_cart(&db, user, fries).await.unwrap();

    assert_eq!(
        download(&db, user).await,
        "Butter: 20 g\nPotato: 4 pcs\nSalt: 15 g\n"
    );
}

#[tokio::test]
async fn should_reject_second_add_of_same_recipe() {
    let (db, author) = seeded();
    let user = db.add_user("shopper").id;
    let mash = create_recipe(&db, author, "Mash", vec![(1, 5)]).await;

    add_to_cart(&db, user, mash).await.unwrap();
    let second = add_to_cart(&db, user, mash).await;
    assert!(matches!(
        second,
        Err(RecipesServiceError::ShoppingCartEntryAlreadyExists)
    ));
    // The rejected add leaves the totals untouched.
    assert_eq!(download(&db, user).await, "Salt: 5 g\n");
}

#[tokio::test]
async fn should_drop_contribution_when_recipe_removed_from_cart() {
    let (db, author) = seeded();
    let user = db.add_user("shopper").id;
    let mash = create_recipe(&db, author, "Mash", vec![(1, 5), (2, 4)]).await;
    let fries = create_recipe(&db, author, "Fries", vec![(1, 10)]).await;
    add_to_cart(&db, user, mash).await.unwrap();
    add_to_cart(&db, user, fries).await.unwrap();

    RemoveFromShoppingCartUseCase {
        recipes: db.clone(),
        cart: db.cart(),
    }
    .execute(user, mash)
    .await
    .unwrap();

    assert_eq!(download(&db, user).await, "Salt: 10 g\n");
}

#[tokio::test]
async fn should_return_not_found_when_removing_absent_entry() {
    let (db, author) = seeded();
    let user = db.add_user("shopper").id;
    let mash = create_recipe(&db, author, "Mash", vec![(1, 5)]).await;
    let result = RemoveFromShoppingCartUseCase {
        recipes: db.clone(),
        cart: db.cart(),
    }
    .execute(user, mash)
    .await;
    assert!(matches!(
        result,
        Err(RecipesServiceError::ShoppingCartEntryNotFound)
    ));
}

#[tokio::test]
async fn should_return_recipe_not_found_for_unknown_recipe() {
    let (db, _) = seeded();
    let user = db.add_user("shopper").id;
    let result = add_to_cart(&db, user, 999).await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

#[tokio::test]
async fn should_forget_deleted_recipes() {
    let (db, author) = seeded();
    let user = db.add_user("shopper").id;
    let mash = create_recipe(&db, author, "Mash", vec![(1, 5)]).await;
    add_to_cart(&db, user, mash).await.unwrap();

    DeleteRecipeUseCase { repo: db.clone() }
        .execute(mash, author, UserRole::User)
        .await
        .unwrap();

    assert_eq!(download(&db, user).await, "");
    assert!(RecipeRepository::find_by_id(&db, mash).await.unwrap().is_none());
}

#[tokio::test]
async fn should_keep_each_users_cart_separate() {
    let (db, author) = seeded();
    let alice = db.add_user("alice").id;
    let bob = db.add_user("bob").id;
    let mash = create_recipe(&db, author, "Mash", vec![(1, 5)]).await;
    add_to_cart(&db, alice, mash).await.unwrap();
    add_to_cart(&db, bob, mash).await.unwrap();

    assert_eq!(download(&db, alice).await, "Salt: 5 g\n");
    assert_eq!(download(&db, bob).await, "Salt: 5 g\n");
}

#[tokio::test]
async fn should_keep_same_name_with_different_units_apart() {
    let (db, author) = seeded();
    let user = db.add_user("shopper").id;
    db.add_ingredient("Salt", "pinch"); // 4
    let soup = create_recipe(&db, author, "Soup", vec![(1, 5), (4, 2)]).await;
    add_to_cart(&db, user, soup).await.unwrap();

    assert_eq!(download(&db, user).await, "Salt: 5 g\nSalt: 2 pinch\n");
}
