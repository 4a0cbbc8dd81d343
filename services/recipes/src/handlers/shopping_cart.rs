use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::response::Attachment;

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::shopping_list::{self, ShoppingListLine};
use crate::error::RecipesServiceError;
use crate::handlers::recipe::RecipeShortResponse;
use crate::state::AppState;
use crate::usecase::shopping_cart::{
    AddToShoppingCartUseCase, DownloadShoppingListUseCase, RemoveFromShoppingCartUseCase,
};

pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Plain-text attachment body for the aggregated list.
pub fn shopping_list_attachment(lines: &[ShoppingListLine]) -> Attachment<String> {
    Attachment::new(shopping_list::render(lines))
        .filename(SHOPPING_LIST_FILENAME)
        .content_type("text/plain; charset=utf-8")
}

// ── POST /recipes/{id}/shopping-cart ─────────────────────────────────────────

pub async fn add_to_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), RecipesServiceError> {
    let usecase = AddToShoppingCartUseCase {
        recipes: state.recipe_repo(),
        cart: state.shopping_cart_repo(),
    };
    let recipe = usecase.execute(identity.user_id, recipe_id).await?;
    Ok((StatusCode::CREATED, Json(recipe.into())))
}

// ── DELETE /recipes/{id}/shopping-cart ───────────────────────────────────────

pub async fn remove_from_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = RemoveFromShoppingCartUseCase {
        recipes: state.recipe_repo(),
        cart: state.shopping_cart_repo(),
    };
    usecase.execute(identity.user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /recipes/download-shopping-cart ──────────────────────────────────────

pub async fn download_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, RecipesServiceError> {
    let usecase = DownloadShoppingListUseCase {
        cart: state.shopping_cart_repo(),
    };
    let lines = usecase.execute(identity.user_id).await?;
    tracing::debug!(user_id = %identity.user_id, lines = lines.len(), "shopping list rendered");
    Ok(shopping_list_attachment(&lines))
}
