use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Recipes service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("recipe is not in favorites")]
    FavoriteNotFound,
    #[error("recipe is not in shopping cart")]
    ShoppingCartEntryNotFound,
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("user with this email or username already exists")]
    UserAlreadyExists,
    #[error("tag with this name or slug already exists")]
    TagAlreadyExists,
    #[error("recipe with this name already exists")]
    RecipeAlreadyExists,
    #[error("recipe has already been added to favorites")]
    FavoriteAlreadyExists,
    #[error("recipe has already been added to shopping cart")]
    ShoppingCartEntryAlreadyExists,
    #[error("subscription already exists")]
    SubscriptionAlreadyExists,
    #[error("cannot subscribe to yourself")]
    SelfSubscription,
    #[error("ingredient amount must be at least 1")]
    InvalidAmount,
    #[error("ingredients must be unique")]
    DuplicateIngredient,
    #[error("tags must be unique")]
    DuplicateTag,
    #[error("cooking time must be at least 1 minute")]
    InvalidCookingTime,
    #[error("incorrect symbols in username")]
    InvalidUsername,
    #[error("invalid slug")]
    InvalidSlug,
    #[error("invalid color, expected #RRGGBB")]
    InvalidColor,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::FavoriteNotFound => "FAVORITE_NOT_FOUND",
            Self::ShoppingCartEntryNotFound => "SHOPPING_CART_ENTRY_NOT_FOUND",
            Self::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::RecipeAlreadyExists => "RECIPE_ALREADY_EXISTS",
            Self::FavoriteAlreadyExists => "FAVORITE_ALREADY_EXISTS",
            Self::ShoppingCartEntryAlreadyExists => "SHOPPING_CART_ENTRY_ALREADY_EXISTS",
            Self::SubscriptionAlreadyExists => "SUBSCRIPTION_ALREADY_EXISTS",
            Self::SelfSubscription => "SELF_SUBSCRIPTION",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::DuplicateIngredient => "DUPLICATE_INGREDIENT",
            Self::DuplicateTag => "DUPLICATE_TAG",
            Self::InvalidCookingTime => "INVALID_COOKING_TIME",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidSlug => "INVALID_SLUG",
            Self::InvalidColor => "INVALID_COLOR",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound
            | Self::RecipeNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound
            | Self::FavoriteNotFound
            | Self::ShoppingCartEntryNotFound
            | Self::SubscriptionNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists
            | Self::TagAlreadyExists
            | Self::RecipeAlreadyExists
            | Self::FavoriteAlreadyExists
            | Self::ShoppingCartEntryAlreadyExists
            | Self::SubscriptionAlreadyExists => StatusCode::CONFLICT,
            Self::SelfSubscription
            | Self::InvalidAmount
            | Self::DuplicateIngredient
            | Self::DuplicateTag
            | Self::InvalidCookingTime
            | Self::InvalidUsername
            | Self::InvalidSlug
            | Self::InvalidColor
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client errors; TraceLayer already records them.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
