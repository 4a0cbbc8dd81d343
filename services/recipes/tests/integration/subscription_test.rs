use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::recipe::CreateRecipeUseCase;
use foodgram_recipes::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

use crate::helpers::{MemoryDb, draft};

fn subscribe_usecase(db: &MemoryDb) -> SubscribeUseCase<MemoryDb, MemoryDb, MemoryDb> {
    SubscribeUseCase {
        users: db.clone(),
        subscriptions: db.clone(),
        recipes: db.clone(),
    }
}

#[tokio::test]
async fn should_reject_self_subscription() {
    let db = MemoryDb::new();
    let user = db.add_user("narcissus").id;
    let result = subscribe_usecase(&db).execute(user, user, None).await;
    assert!(matches!(result, Err(RecipesServiceError::SelfSubscription)));
    assert!(db.tables.lock().unwrap().subscriptions.is_empty());
}

#[tokio::test]
async fn should_check_self_subscription_before_user_lookup() {
    // The id is unknown to storage, yet the self check wins.
    let db = MemoryDb::new();
    let ghost = Uuid::now_v7();
    let result = subscribe_usecase(&db).execute(ghost, ghost, None).await;
    assert!(matches!(result, Err(RecipesServiceError::SelfSubscription)));
}

#[tokio::test]
async fn should_reject_duplicate_subscription() {
    let db = MemoryDb::new();
    let fan = db.add_user("fan").id;
    let chef = db.add_user("chef").id;
    subscribe_usecase(&db).execute(fan, chef, None).await.unwrap();
    let second = subscribe_usecase(&db).execute(fan, chef, None).await;
    assert!(matches!(
        second,
        Err(RecipesServiceError::SubscriptionAlreadyExists)
    ));
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_author() {
    let db = MemoryDb::new();
    let fan = db.add_user("fan").id;
    let result = subscribe_usecase(&db)
        .execute(fan, Uuid::now_v7(), None)
        .await;
    assert!(matches!(result, Err(RecipesServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_list_authors_with_limited_recipes() {
    let db = MemoryDb::new();
    let fan = db.add_user("fan").id;
    let chef = db.add_user("chef").id;
    db.add_tag("Dinner", "dinner");
    db.add_ingredient("Rice", "g");
    let create = CreateRecipeUseCase {
        repo: db.clone(),
        tags: db.clone(),
        ingredients: db.clone(),
    };
    for name in ["Pilaf", "Risotto", "Congee"] {
        create
            .execute(chef, draft(name, vec![1], vec![(1, 100)]))
            .await
            .unwrap();
    }

    let subscribed = subscribe_usecase(&db)
        .execute(fan, chef, Some(1))
        .await
        .unwrap();
    assert_eq!(subscribed.recipes_count, 3);
    assert_eq!(subscribed.recipes.len(), 1);
    assert_eq!(subscribed.recipes[0].name, "Congee");

    let listed = ListSubscriptionsUseCase {
        subscriptions: db.clone(),
        recipes: db.clone(),
    }
    .execute(fan, PageRequest::default(), Some(2))
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].author.id, chef);
    let names: Vec<_> = listed[0].recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Congee", "Risotto"]);
}

#[tokio::test]
async fn should_unsubscribe_once() {
    let db = MemoryDb::new();
    let fan = db.add_user("fan").id;
    let chef = db.add_user("chef").id;
    subscribe_usecase(&db).execute(fan, chef, None).await.unwrap();

    let unsubscribe = UnsubscribeUseCase {
        users: db.clone(),
        subscriptions: db.clone(),
    };
    unsubscribe.execute(fan, chef).await.unwrap();
    let again = unsubscribe.execute(fan, chef).await;
    assert!(matches!(again, Err(RecipesServiceError::SubscriptionNotFound)));
}
