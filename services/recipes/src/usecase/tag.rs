use crate::domain::repository::TagRepository;
use crate::domain::types::{Tag, TagDraft};
use crate::error::RecipesServiceError;

// ── ListTags ─────────────────────────────────────────────────────────────────

pub struct ListTagsUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> ListTagsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        self.repo.list().await
    }
}

// ── GetTag ───────────────────────────────────────────────────────────────────

pub struct GetTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> GetTagUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Tag, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::TagNotFound)
    }
}

// ── CreateTag ────────────────────────────────────────────────────────────────

pub struct CreateTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> CreateTagUseCase<R> {
    pub async fn execute(&self, draft: TagDraft) -> Result<Tag, RecipesServiceError> {
        draft.validate()?;
        self.repo
            .create(&draft)
            .await?
            .ok_or(RecipesServiceError::TagAlreadyExists)
    }
}

// ── UpdateTag ────────────────────────────────────────────────────────────────

pub struct UpdateTagInput {
    pub name: Option<String>,
    pub color: Option<String>,
    pub slug: Option<String>,
}

pub struct UpdateTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> UpdateTagUseCase<R> {
    pub async fn execute(&self, id: i32, input: UpdateTagInput) -> Result<Tag, RecipesServiceError> {
        if input.name.is_none() && input.color.is_none() && input.slug.is_none() {
            return Err(RecipesServiceError::MissingData);
        }
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::TagNotFound)?;
        let draft = TagDraft {
            name: input.name.unwrap_or(current.name),
            color: input.color.unwrap_or(current.color),
            slug: input.slug.unwrap_or(current.slug),
        };
        draft.validate()?;
        let tag = Tag {
            id,
            name: draft.name,
            color: draft.color,
            slug: draft.slug,
        };
        if !self.repo.update(&tag).await? {
            return Err(RecipesServiceError::TagAlreadyExists);
        }
        Ok(tag)
    }
}

// ── DeleteTag ────────────────────────────────────────────────────────────────

pub struct DeleteTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> DeleteTagUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), RecipesServiceError> {
        if !self.repo.delete(id).await? {
            return Err(RecipesServiceError::TagNotFound);
        }
        Ok(())
    }
}
