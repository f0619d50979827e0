//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::centre_users::{self, types as centre_users_types};
use crate::api::routes::health;
use crate::api::types::PaginationMeta;
use crate::domain::dataset::LoadState;
use crate::domain::records::{CategoricalField, Column, ColumnKind, FilterChoice, RecordRow};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CentreView API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Centre user training completion viewer"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "centre-users", description = "Centre user records, filters and dataset state")
    ),
    paths(
        health::health,
        centre_users::list_records,
        centre_users::get_filter_options,
        centre_users::get_columns,
        centre_users::get_dataset_status,
        centre_users::reload_dataset,
    ),
    components(schemas(
        PaginationMeta,
        RecordRow,
        FilterChoice,
        CategoricalField,
        Column,
        ColumnKind,
        LoadState,
        centre_users_types::FilterGroupDto,
        centre_users_types::FilterOptionsResponse,
        centre_users_types::ColumnsResponse,
        centre_users_types::DatasetStatusDto,
        centre_users_types::ReloadResponse,
        health::HealthResponse,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CentreView API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_centre_user_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for path in [
            "/api/v1/health",
            "/api/v1/centre-users",
            "/api/v1/centre-users/filter-options",
            "/api/v1/centre-users/columns",
            "/api/v1/centre-users/dataset",
            "/api/v1/centre-users/dataset/reload",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }

    #[test]
    fn test_openapi_serializes() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert_eq!(json["info"]["title"], "CentreView API");
        assert!(json["components"]["schemas"]["RecordRow"].is_object());
    }
}
