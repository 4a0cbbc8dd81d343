use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use foodgram_core::health::{healthz, readyz};
use foodgram_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    favorite::{add_favorite, remove_favorite},
    ingredient::{create_ingredient, get_ingredient, list_ingredients},
    recipe::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe},
    shopping_cart::{add_to_shopping_cart, download_shopping_cart, remove_from_shopping_cart},
    subscription::{list_subscriptions, subscribe, unsubscribe},
    tag::{create_tag, delete_tag, get_tag, list_tags, update_tag},
    user::{create_user, get_me, get_user, list_users, update_me},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/me", get(get_me))
        .route("/users/me", patch(update_me))
        .route("/users/subscriptions", get(list_subscriptions))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/subscribe", post(subscribe))
        .route("/users/{id}/subscribe", delete(unsubscribe))
        // Tags
        .route("/tags", get(list_tags))
        .route("/tags", post(create_tag))
        .route("/tags/{id}", get(get_tag))
        .route("/tags/{id}", patch(update_tag))
        .route("/tags/{id}", delete(delete_tag))
        // Ingredients
        .route("/ingredients", get(list_ingredients))
        .route("/ingredients", post(create_ingredient))
        .route("/ingredients/{id}", get(get_ingredient))
        // Recipes
        .route("/recipes", get(list_recipes))
        .route("/recipes", post(create_recipe))
        .route("/recipes/download-shopping-cart", get(download_shopping_cart))
        .route("/recipes/{id}", get(get_recipe))
        .route("/recipes/{id}", patch(update_recipe))
        .route("/recipes/{id}", delete(delete_recipe))
        // Favorites
        .route("/recipes/{id}/favorite", post(add_favorite))
        .route("/recipes/{id}/favorite", delete(remove_favorite))
        // Shopping cart
        .route("/recipes/{id}/shopping-cart", post(add_to_shopping_cart))
        .route("/recipes/{id}/shopping-cart", delete(remove_from_shopping_cart))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
