pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod services;
pub mod utils;

use crate::config::StorageConfig;
use crate::services::file_service::FileService;
use crate::services::metadata::MetadataStore;
use crate::services::storage::StorageService;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::files::upload::upload_file,
        api::handlers::files::list::list_files,
        api::handlers::files::list::delete_list,
        api::handlers::files::download::download_file,
        api::handlers::files::delete::delete_file,
        api::handlers::files::delete::delete_all,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::files::UploadResponse,
            api::handlers::files::FileListResponse,
            api::handlers::files::DeleteListEntry,
            api::handlers::files::DeleteListResponse,
            api::handlers::files::FolderQuery,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "files", description = "File upload, listing, retrieval and deletion"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageService>,
    pub file_service: Arc<FileService>,
    pub config: StorageConfig,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn StorageService>,
        metadata: Option<MetadataStore>,
        config: StorageConfig,
    ) -> Self {
        let file_service = Arc::new(FileService::new(
            storage.clone(),
            metadata,
            config.clone(),
        ));

        Self {
            storage,
            file_service,
            config,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/upload", post(api::handlers::files::upload_file))
        .route("/list", get(api::handlers::files::list_files))
        .route("/file/:token", get(api::handlers::files::download_file))
        .route("/deletelist", get(api::handlers::files::delete_list))
        .route("/delete/:token", delete(api::handlers::files::delete_file))
        .route("/deleteall", delete(api::handlers::files::delete_all))
        .layer(from_fn(api::middleware::access_log::access_log_middleware))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(
            state.config.max_file_size + 10 * 1024 * 1024, // Add 10MB buffer for multipart overhead
        ))
        .with_state(state)
}
