use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::permission::can_manage_catalog;
use crate::domain::types::{DEFAULT_TAG_COLOR, Tag, TagDraft};
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::tag::{
    CreateTagUseCase, DeleteTagUseCase, GetTagUseCase, ListTagsUseCase, UpdateTagInput,
    UpdateTagUseCase,
};

#[derive(Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}

fn require_catalog_admin(identity: &IdentityHeaders) -> Result<(), RecipesServiceError> {
    if !can_manage_catalog(identity.user_role) {
        return Err(RecipesServiceError::Forbidden);
    }
    Ok(())
}

// ── GET /tags ────────────────────────────────────────────────────────────────

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, RecipesServiceError> {
    let usecase = ListTagsUseCase {
        repo: state.tag_repo(),
    };
    let tags = usecase.execute().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

// ── GET /tags/{id} ───────────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TagResponse>, RecipesServiceError> {
    let usecase = GetTagUseCase {
        repo: state.tag_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /tags ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub color: Option<String>,
    pub slug: String,
}

pub async fn create_tag(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), RecipesServiceError> {
    require_catalog_admin(&identity)?;
    let usecase = CreateTagUseCase {
        repo: state.tag_repo(),
    };
    let tag = usecase
        .execute(TagDraft {
            name: body.name,
            color: body.color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_owned()),
            slug: body.slug,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(tag.into())))
}

// ── PATCH /tags/{id} ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub slug: Option<String>,
}

pub async fn update_tag(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateTagRequest>,
) -> Result<Json<TagResponse>, RecipesServiceError> {
    require_catalog_admin(&identity)?;
    let usecase = UpdateTagUseCase {
        repo: state.tag_repo(),
    };
    let tag = usecase
        .execute(
            id,
            UpdateTagInput {
                name: body.name,
                color: body.color,
                slug: body.slug,
            },
        )
        .await?;
    Ok(Json(tag.into()))
}

// ── DELETE /tags/{id} ────────────────────────────────────────────────────────

pub async fn delete_tag(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    require_catalog_admin(&identity)?;
    let usecase = DeleteTagUseCase {
        repo: state.tag_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
