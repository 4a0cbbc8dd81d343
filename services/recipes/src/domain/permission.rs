//! Access predicates evaluated against the gateway identity.

use uuid::Uuid;

use foodgram_domain::user::UserRole;

use crate::domain::types::Recipe;

/// Tags and ingredients are curated by admins only.
pub fn can_manage_catalog(role: UserRole) -> bool {
    role.is_admin()
}

/// Recipes may be changed or deleted by their author or by an admin.
pub fn can_modify_recipe(user_id: Uuid, role: UserRole, recipe: &Recipe) -> bool {
    recipe.author_id == user_id || role.is_admin()
}
