use chrono::Utc;
use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_domain::user::UserRole;

use crate::domain::repository::{SubscriptionRepository, UserRepository};
use crate::domain::types::{
    MAX_EMAIL_LEN, MAX_USERNAME_LEN, User, UserProfile, validate_username,
};
use crate::error::RecipesServiceError;

/// Attach `is_subscribed` for `viewer` to each user, keeping order.
pub(crate) async fn with_subscription_flags<S: SubscriptionRepository>(
    subscriptions: &S,
    viewer: Option<Uuid>,
    users: Vec<User>,
) -> Result<Vec<UserProfile>, RecipesServiceError> {
    let followed = match viewer {
        Some(viewer) if !users.is_empty() => {
            let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
            subscriptions.subscribed_among(viewer, &ids).await?
        }
        _ => Vec::new(),
    };
    Ok(users
        .into_iter()
        .map(|user| UserProfile {
            is_subscribed: followed.contains(&user.id),
            user,
        })
        .collect())
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, RecipesServiceError> {
        if !validate_username(&input.username) {
            return Err(RecipesServiceError::InvalidUsername);
        }
        if input.email.trim().is_empty()
            || !input.email.contains('@')
            || input.email.chars().count() > MAX_EMAIL_LEN
            || input.first_name.chars().count() > MAX_USERNAME_LEN
            || input.last_name.chars().count() > MAX_USERNAME_LEN
        {
            return Err(RecipesServiceError::MissingData);
        }
        let user = User {
            id: Uuid::now_v7(),
            email: input.email,
            username: input.username,
            first_name: input.first_name,
            last_name: input.last_name,
            role: input.role,
            created_at: Utc::now(),
        };
        if !self.repo.create(&user).await? {
            return Err(RecipesServiceError::UserAlreadyExists);
        }
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository, S: SubscriptionRepository> {
    pub repo: R,
    pub subscriptions: S,
}

impl<R: UserRepository, S: SubscriptionRepository> GetUserUseCase<R, S> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<UserProfile, RecipesServiceError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        let viewer = viewer.filter(|v| *v != user_id);
        with_subscription_flags(&self.subscriptions, viewer, vec![user])
            .await?
            .pop()
            .ok_or(RecipesServiceError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository, S: SubscriptionRepository> {
    pub repo: R,
    pub subscriptions: S,
}

impl<R: UserRepository, S: SubscriptionRepository> ListUsersUseCase<R, S> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Vec<UserProfile>, RecipesServiceError> {
        let users = self.repo.list(page).await?;
        with_subscription_flags(&self.subscriptions, viewer, users).await
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateUserInput,
    ) -> Result<User, RecipesServiceError> {
        if input.first_name.is_none() && input.last_name.is_none() {
            return Err(RecipesServiceError::MissingData);
        }
        let too_long = |v: &Option<String>| {
            v.as_ref()
                .is_some_and(|s| s.chars().count() > MAX_USERNAME_LEN)
        };
        if too_long(&input.first_name) || too_long(&input.last_name) {
            return Err(RecipesServiceError::MissingData);
        }
        if self.repo.find_by_id(user_id).await?.is_none() {
            return Err(RecipesServiceError::UserNotFound);
        }
        self.repo
            .update_names(
                user_id,
                input.first_name.as_deref(),
                input.last_name.as_deref(),
            )
            .await?;
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)
    }
}
