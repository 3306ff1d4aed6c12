//! Comments: children of [`Blog`](crate::entities::Blog)
//!
//! The `blog` reference is required and must resolve to an existing blog
//! when a comment is created or re-pointed; a dangling reference is a
//! validation error on the `blog` field, never a stored entity.

use crate::core::error::{ApiError, ValidationFailure};
use crate::core::field::FieldValue;
use crate::core::filter::{FilterKind, FilterSpec};
use crate::core::resource::{Owned, Resource};
use crate::core::schema::{self, FieldDef, FieldType, InputMode, Schema};
use crate::core::serializer::{Payload, ResourceSerializer};
use crate::entities::Blog;
use crate::storage::Store;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

static SCHEMA: Schema = Schema {
    kind: "comment",
    fields: &[
        FieldDef::read_only("id", FieldType::Reference),
        FieldDef::read_only("created_at", FieldType::Text),
        FieldDef::read_only("updated_at", FieldType::Text),
        FieldDef::required("blog", FieldType::Reference),
        FieldDef::required("comment", FieldType::Text),
    ],
};

static FILTERS: [FilterSpec; 1] = [FilterSpec::new("blog", "blog", FilterKind::EqualsIgnoreCase)];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owning blog.
    pub blog: Uuid,
    pub comment: String,
}

impl Comment {
    pub fn new(blog: Uuid, comment: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            blog,
            comment,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Resource for Comment {
    fn kind() -> &'static str {
        "comment"
    }

    fn plural() -> &'static str {
        "comments"
    }

    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn filters() -> &'static [FilterSpec] {
        &FILTERS
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "blog" => Some(FieldValue::Reference(self.blog)),
            "comment" => Some(FieldValue::Text(self.comment.clone())),
            _ => None,
        }
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.blog
    }
}

/// Serializer confirming the `blog` reference against storage.
pub struct CommentSerializer {
    blogs: Arc<dyn Store<Blog>>,
}

impl CommentSerializer {
    pub fn new(blogs: Arc<dyn Store<Blog>>) -> Self {
        Self { blogs }
    }

    async fn check_reference(&self, blog: Uuid) -> Result<(), ApiError> {
        match self.blogs.get(&blog).await? {
            Some(_) => Ok(()),
            None => Err(ValidationFailure::single("blog", "referenced blog does not exist").into()),
        }
    }
}

#[async_trait]
impl ResourceSerializer<Comment> for CommentSerializer {
    async fn build(&self, payload: &Payload) -> Result<Comment, ApiError> {
        Comment::schema().check(payload, InputMode::Create)?;
        let blog = schema::reference(payload, "blog").unwrap_or_default();
        self.check_reference(blog).await?;
        Ok(Comment::new(
            blog,
            schema::text(payload, "comment").unwrap_or_default(),
        ))
    }

    async fn merge(&self, existing: &Comment, payload: &Payload) -> Result<Comment, ApiError> {
        Comment::schema().check(payload, InputMode::Patch)?;
        let mut next = existing.clone();
        if let Some(blog) = schema::reference(payload, "blog") {
            self.check_reference(blog).await?;
            next.blog = blog;
        }
        if let Some(comment) = schema::text(payload, "comment") {
            next.comment = comment;
        }
        next.touch();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;
    use serde_json::{Value, json};

    fn payload(value: Value) -> Payload {
        value.as_object().expect("object literal").clone()
    }

    fn serializer() -> (CommentSerializer, MemoryStore) {
        let store = MemoryStore::new();
        let blogs: Arc<dyn Store<Blog>> = Arc::new(store.collection::<Blog>());
        (CommentSerializer::new(blogs), store)
    }

    #[tokio::test]
    async fn build_accepts_existing_reference() {
        let (serializer, store) = serializer();
        let blog = Blog::new("A".to_string(), "body".to_string());
        store
            .collection::<Blog>()
            .insert(blog.clone())
            .await
            .expect("insert blog");

        let comment = serializer
            .build(&payload(json!({ "blog": blog.id.to_string(), "comment": "hi" })))
            .await
            .expect("valid payload");
        assert_eq!(comment.blog, blog.id);
        assert_eq!(comment.owner_id(), blog.id);
    }

    #[tokio::test]
    async fn dangling_reference_is_a_validation_error() {
        let (serializer, _store) = serializer();
        let err = serializer
            .build(&payload(json!({
                "blog": Uuid::new_v4().to_string(),
                "comment": "hi",
            })))
            .await
            .unwrap_err();
        let ApiError::Validation(failure) = err else {
            panic!("expected a validation failure");
        };
        assert_eq!(failure.errors[0].field, "blog");
    }

    #[tokio::test]
    async fn merge_revalidates_reference_only_when_supplied() {
        let (serializer, store) = serializer();
        let blog = Blog::new("A".to_string(), "body".to_string());
        store
            .collection::<Blog>()
            .insert(blog.clone())
            .await
            .expect("insert blog");
        let existing = Comment::new(blog.id, "hi".to_string());

        // body-only patch: the reference is not re-checked
        let merged = serializer
            .merge(&existing, &payload(json!({ "comment": "edited" })))
            .await
            .expect("valid patch");
        assert_eq!(merged.comment, "edited");
        assert_eq!(merged.blog, blog.id);

        // re-pointing at a missing blog fails
        let err = serializer
            .merge(
                &existing,
                &payload(json!({ "blog": Uuid::new_v4().to_string() })),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
