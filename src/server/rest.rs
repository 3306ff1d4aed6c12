//! REST exposure: the uniform five-route surface per resource kind
//!
//! One generic descriptor serves every kind; nothing here is
//! entity-specific. Handlers translate extractor output into controller
//! calls and let [`ApiError`]'s response conversion pick the status.

use crate::core::error::ApiError;
use crate::core::filter::Criteria;
use crate::core::page::{Page, PageRequest};
use crate::core::resource::Resource;
use crate::resources::controller::ResourceController;
use crate::resources::registry::ResourceDescriptor;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// Generic REST descriptor for any resource kind.
pub struct RestResource<T: Resource> {
    controller: Arc<ResourceController<T>>,
}

impl<T: Resource> RestResource<T> {
    pub fn new(controller: Arc<ResourceController<T>>) -> Self {
        Self { controller }
    }
}

impl<T: Resource> ResourceDescriptor for RestResource<T> {
    fn kind(&self) -> &str {
        T::kind()
    }

    fn plural(&self) -> &str {
        T::plural()
    }

    fn build_routes(&self) -> Router {
        let collection = format!("/{}", T::plural());
        let member = format!("/{}/{{id}}", T::plural());
        Router::new()
            .route(&collection, get(list::<T>).post(create::<T>))
            .route(&member, get(retrieve::<T>).put(update::<T>).delete(destroy::<T>))
            .with_state(Arc::clone(&self.controller))
    }
}

/// Split the query string into pagination input and filter criteria.
///
/// `page` and `limit` are reserved; everything else is criteria, with
/// repeated names accumulating in query order. Unparsable pagination values
/// degrade to the defaults.
fn split_query(pairs: Vec<(String, String)>) -> (PageRequest, Criteria) {
    let mut request = PageRequest::default();
    let mut criteria = Criteria::new();
    for (name, value) in pairs {
        if name == "page" {
            request.page = value.parse().ok();
        } else if name == "limit" {
            request.limit = value.parse().ok();
        } else {
            criteria.entry(name).or_default().push(value);
        }
    }
    (request, criteria)
}

async fn list<T: Resource>(
    State(controller): State<Arc<ResourceController<T>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Page<Value>>, ApiError> {
    let (request, criteria) = split_query(pairs);
    Ok(Json(controller.list(&criteria, request).await?))
}

async fn create<T: Resource>(
    State(controller): State<Arc<ResourceController<T>>>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let rendered = controller.create(payload).await?;
    Ok((StatusCode::CREATED, Json(rendered)))
}

async fn retrieve<T: Resource>(
    State(controller): State<Arc<ResourceController<T>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(controller.retrieve(id).await?))
}

async fn update<T: Resource>(
    State(controller): State<Arc<ResourceController<T>>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(controller.update(id, payload).await?))
}

async fn destroy<T: Resource>(
    State(controller): State<Arc<ResourceController<T>>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Liveness endpoints, mounted beside the resource routes.
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "portal",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_query_separates_pagination_from_criteria() {
        let (request, criteria) = split_query(vec![
            ("page".to_string(), "2".to_string()),
            ("limit".to_string(), "10".to_string()),
            ("designation".to_string(), "Manager".to_string()),
            ("emp_name".to_string(), "jo".to_string()),
            ("emp_name".to_string(), "doe".to_string()),
        ]);
        assert_eq!(request.page, Some(2));
        assert_eq!(request.limit, Some(10));
        assert_eq!(criteria["designation"], vec!["Manager"]);
        assert_eq!(criteria["emp_name"], vec!["jo", "doe"]);
    }

    #[test]
    fn unparsable_pagination_degrades_to_defaults() {
        let (request, criteria) = split_query(vec![
            ("page".to_string(), "two".to_string()),
            ("limit".to_string(), "-5".to_string()),
        ]);
        assert_eq!(request.page, None);
        assert_eq!(request.limit, None);
        assert!(criteria.is_empty());
    }
}
