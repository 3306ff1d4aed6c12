//! Blog posts: parents of [`Comment`](crate::entities::Comment)
//!
//! The rendered form embeds the blog's comments under `comments`. The embed
//! is read-only: input payloads may echo it back, but nothing is ever built
//! from it.

use crate::core::error::ApiError;
use crate::core::field::FieldValue;
use crate::core::filter::{FilterKind, FilterSpec};
use crate::core::resource::Resource;
use crate::core::schema::{self, FieldDef, FieldType, InputMode, Schema};
use crate::core::serializer::{Payload, ResourceSerializer};
use crate::entities::Comment;
use crate::storage::OwnedStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

static SCHEMA: Schema = Schema {
    kind: "blog",
    fields: &[
        FieldDef::read_only("id", FieldType::Reference),
        FieldDef::read_only("created_at", FieldType::Text),
        FieldDef::read_only("updated_at", FieldType::Text),
        FieldDef::read_only("comments", FieldType::Nested),
        FieldDef::required("blog_title", FieldType::Text),
        FieldDef::required("blog_body", FieldType::Text),
    ],
};

static FILTERS: [FilterSpec; 1] = [FilterSpec::new(
    "blog_title",
    "blog_title",
    FilterKind::ContainsIgnoreCase,
)];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub blog_title: String,
    pub blog_body: String,
}

impl Blog {
    pub fn new(blog_title: String, blog_body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            blog_title,
            blog_body,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Resource for Blog {
    fn kind() -> &'static str {
        "blog"
    }

    fn plural() -> &'static str {
        "blogs"
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
            "blog_title" => Some(FieldValue::Text(self.blog_title.clone())),
            "blog_body" => Some(FieldValue::Text(self.blog_body.clone())),
            _ => None,
        }
    }
}

/// Serializer embedding the blog's comments on the way out.
pub struct BlogSerializer {
    comments: Arc<dyn OwnedStore<Comment>>,
}

impl BlogSerializer {
    pub fn new(comments: Arc<dyn OwnedStore<Comment>>) -> Self {
        Self { comments }
    }
}

#[async_trait]
impl ResourceSerializer<Blog> for BlogSerializer {
    async fn build(&self, payload: &Payload) -> Result<Blog, ApiError> {
        Blog::schema().check(payload, InputMode::Create)?;
        Ok(Blog::new(
            schema::text(payload, "blog_title").unwrap_or_default(),
            schema::text(payload, "blog_body").unwrap_or_default(),
        ))
    }

    async fn merge(&self, existing: &Blog, payload: &Payload) -> Result<Blog, ApiError> {
        Blog::schema().check(payload, InputMode::Patch)?;
        let mut next = existing.clone();
        if let Some(blog_title) = schema::text(payload, "blog_title") {
            next.blog_title = blog_title;
        }
        if let Some(blog_body) = schema::text(payload, "blog_body") {
            next.blog_body = blog_body;
        }
        next.touch();
        Ok(next)
    }

    async fn render(&self, blog: &Blog) -> Result<Value, ApiError> {
        let mut value = serde_json::to_value(blog).map_err(|e| ApiError::Internal(e.to_string()))?;
        let comments = self.comments.list_by_owner(&blog.id).await?;
        let rendered = comments
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        value["comments"] = Value::Array(rendered);
        Ok(value)
    }
}
