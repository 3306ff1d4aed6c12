//! Application wiring: config, storage, serializers, controllers, routes

use crate::config::AppConfig;
use crate::core::page::Pager;
use crate::entities::{
    Blog, BlogSerializer, Comment, CommentSerializer, Employee, EmployeeSerializer, Student,
    StudentSerializer,
};
use crate::resources::controller::{DependentChildren, ResourceController};
use crate::resources::registry::ResourceRegistry;
use crate::server::rest::{RestResource, health_routes};
use crate::storage::memory::MemoryStore;
use crate::storage::{OwnedStore, Store};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router from configuration.
///
/// # Example
///
/// ```ignore
/// let app = AppBuilder::new(AppConfig::default()).build();
/// ```
pub struct AppBuilder {
    config: AppConfig,
    store: MemoryStore,
}

impl AppBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            store: MemoryStore::new(),
        }
    }

    /// Wire every resource and return the router.
    pub fn build(self) -> Router {
        let pager = Pager::new(
            self.config.pagination.default_limit,
            self.config.pagination.max_limit,
        );

        let blogs: Arc<dyn Store<Blog>> = Arc::new(self.store.collection::<Blog>());
        let comments: Arc<dyn OwnedStore<Comment>> = Arc::new(self.store.collection::<Comment>());

        let students = Arc::new(ResourceController::new(
            Arc::new(self.store.collection::<Student>()),
            Arc::new(StudentSerializer),
            pager,
        ));
        let employees = Arc::new(ResourceController::new(
            Arc::new(self.store.collection::<Employee>()),
            Arc::new(EmployeeSerializer),
            pager,
        ));
        let blog_controller = Arc::new(
            ResourceController::new(
                Arc::clone(&blogs),
                Arc::new(BlogSerializer::new(Arc::clone(&comments))),
                pager,
            )
            .with_cascade(Arc::new(DependentChildren::new(Arc::clone(&comments)))),
        );
        let comment_controller = Arc::new(ResourceController::new(
            Arc::new(self.store.collection::<Comment>()),
            Arc::new(CommentSerializer::new(blogs)),
            pager,
        ));

        let mut registry = ResourceRegistry::new();
        registry.register(Box::new(RestResource::new(students)));
        registry.register(Box::new(RestResource::new(employees)));
        registry.register(Box::new(RestResource::new(blog_controller)));
        registry.register(Box::new(RestResource::new(comment_controller)));
        tracing::debug!(kinds = ?registry.kinds(), "registered resources");

        health_routes()
            .merge(registry.build_routes())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Bind and serve until SIGINT/SIGTERM.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.build();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_wires_the_full_router() {
        let _app = AppBuilder::new(AppConfig::default()).build();
    }
}
