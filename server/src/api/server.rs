//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{centre_users, health};
use crate::core::CoreApp;
use crate::core::config::PaginationConfig;
use crate::core::constants::DEFAULT_BODY_LIMIT;
use crate::core::shutdown::ShutdownService;
use crate::domain::dataset::DatasetService;

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let shutdown = app.shutdown.clone();
        let addr = resolve_addr(&app.config.server.host, app.config.server.port)?;

        let router = build_router(
            Arc::clone(&app.dataset),
            app.config.pagination.clone(),
            shutdown.clone(),
            &allowed_origins,
        );
        let router = if app.config.debug {
            router.layer(TraceLayer::new_for_http())
        } else {
            router
        };

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::debug!(addr = %addr, "HTTP server listening");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}

/// Resolve the bind address, accepting `localhost` and bracketed IPv6
fn resolve_addr(host: &str, port: u16) -> Result<SocketAddr> {
    let ip = match host {
        "localhost" => "127.0.0.1",
        h => h.trim_start_matches('[').trim_end_matches(']'),
    };
    let ip = ip
        .parse()
        .with_context(|| format!("Invalid server host: {}", host))?;
    Ok(SocketAddr::new(ip, port))
}

/// Build the full application router
pub fn build_router(
    dataset: Arc<DatasetService>,
    pagination: PaginationConfig,
    shutdown: ShutdownService,
    allowed_origins: &AllowedOrigins,
) -> Router {
    Router::new()
        .route(
            "/",
            get(|| async { Redirect::temporary("/api/v1/centre-users") }),
        )
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .route("/api/docs/", get(swagger_ui_html))
        .route(
            "/api/v1/health",
            get(health::health).with_state(Arc::clone(&dataset)),
        )
        .nest(
            "/api/v1/centre-users",
            centre_users::routes(dataset, pagination, shutdown),
        )
        .fallback(middleware::handle_404)
        .layer(CompressionLayer::new())
        .layer(middleware::cors(allowed_origins))
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::data::{DataLoader, LoadError, Record};

    struct EmptyLoader;

    #[async_trait]
    impl DataLoader for EmptyLoader {
        async fn load_data(&self) -> Result<Vec<Record>, LoadError> {
            Ok(Vec::new())
        }

        fn source(&self) -> String {
            "empty".to_string()
        }
    }

    fn router() -> Router {
        build_router(
            Arc::new(DatasetService::new(Arc::new(EmptyLoader))),
            PaginationConfig::default(),
            ShutdownService::new(),
            &AllowedOrigins::new("127.0.0.1", 5390),
        )
    }

    async fn get(uri: &str) -> axum::response::Response {
        router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_loading_before_first_load() {
        let response = get("/api/v1/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["dataset"], "loading");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = get("/api/v1/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_redirects_to_records() {
        let response = get("/").await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/api/v1/centre-users");
    }

    #[tokio::test]
    async fn test_openapi_and_docs_served() {
        assert_eq!(get("/api/openapi.json").await.status(), StatusCode::OK);
        assert_eq!(get("/api/docs").await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_allows_local_origin() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header(header::ORIGIN, "http://localhost:5391")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5391"
        );
    }

    #[test]
    fn test_resolve_addr() {
        assert_eq!(
            resolve_addr("localhost", 80).unwrap(),
            "127.0.0.1:80".parse().unwrap()
        );
        assert_eq!(
            resolve_addr("[::]", 5390).unwrap(),
            "[::]:5390".parse().unwrap()
        );
        assert!(resolve_addr("not a host", 1).is_err());
    }
}
