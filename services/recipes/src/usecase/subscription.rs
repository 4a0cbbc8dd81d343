use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;

use crate::domain::repository::{RecipeRepository, SubscriptionRepository, UserRepository};
use crate::domain::types::{Subscription, User};
use crate::error::RecipesServiceError;

async fn subscription_of<R: RecipeRepository>(
    recipes: &R,
    author: User,
    recipes_limit: Option<u64>,
) -> Result<Subscription, RecipesServiceError> {
    let recipes_count = recipes.count_by_author(author.id).await?;
    let preview = recipes.list_by_author(author.id, recipes_limit).await?;
    Ok(Subscription {
        author,
        recipes_count,
        recipes: preview,
    })
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<U: UserRepository, S: SubscriptionRepository, R: RecipeRepository> {
    pub users: U,
    pub subscriptions: S,
    pub recipes: R,
}

impl<U: UserRepository, S: SubscriptionRepository, R: RecipeRepository> SubscribeUseCase<U, S, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        author_id: Uuid,
        recipes_limit: Option<u64>,
    ) -> Result<Subscription, RecipesServiceError> {
        if user_id == author_id {
            return Err(RecipesServiceError::SelfSubscription);
        }
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        if !self.subscriptions.add(user_id, author_id).await? {
            return Err(RecipesServiceError::SubscriptionAlreadyExists);
        }
        tracing::info!(%user_id, %author_id, "subscribed");
        subscription_of(&self.recipes, author, recipes_limit).await
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> UnsubscribeUseCase<U, S> {
    pub async fn execute(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RecipesServiceError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(RecipesServiceError::UserNotFound);
        }
        if !self.subscriptions.remove(user_id, author_id).await? {
            return Err(RecipesServiceError::SubscriptionNotFound);
        }
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<S: SubscriptionRepository, R: RecipeRepository> {
    pub subscriptions: S,
    pub recipes: R,
}

impl<S: SubscriptionRepository, R: RecipeRepository> ListSubscriptionsUseCase<S, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Vec<Subscription>, RecipesServiceError> {
        let authors = self.subscriptions.list_authors(user_id, page).await?;
        let mut out = Vec::with_capacity(authors.len());
        for author in authors {
            out.push(subscription_of(&self.recipes, author, recipes_limit).await?);
        }
        Ok(out)
    }
}
