//! Validation extractors for API routes
//!
//! ## HTTP Caching Strategy
//!
//! | Endpoint Type           | Cache-Control          |
//! |-------------------------|------------------------|
//! | Record list             | `no-store`             |
//! | Filter options          | `private, max-age=30`  |
//! | Columns                 | `public, max-age=3600` |
//! | Dataset status          | `no-store`             |

use std::ops::Deref;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Validation rejection with structured error response
#[derive(Debug)]
pub enum ValidationRejection {
    /// Failed to parse query string
    Query(QueryRejection),
    /// Validation constraints not satisfied
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            Self::Query(rejection) => ("QUERY_PARSE_ERROR", rejection.body_text()),
            Self::Validation(errors) => ("VALIDATION_ERROR", format_validation_errors(&errors)),
        };
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "bad_request",
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: validation failed", field))
            })
        })
        .collect();
    // field_errors() is a map; keep the message stable across requests
    messages.sort();
    messages.join("; ")
}

/// Query extractor with automatic validation.
///
/// Deserializes query parameters and validates them using the `validator` crate.
/// Returns a `ValidationRejection` on parse or validation failure.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T> Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::Request;
    use serde::Deserialize;

    use crate::api::types::validate_page;

    #[derive(Debug, Deserialize, Validate)]
    struct PageQuery {
        #[validate(custom(function = "validate_page"))]
        page: u32,
    }

    async fn extract(uri: &str) -> Result<ValidatedQuery<PageQuery>, ValidationRejection> {
        let (mut parts, _) = Request::builder()
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        ValidatedQuery::<PageQuery>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_query() {
        let query = extract("/x?page=3").await.unwrap();
        assert_eq!(query.page, 3);
    }

    #[tokio::test]
    async fn test_unparseable_query_rejected() {
        let rejection = extract("/x?page=abc").await.unwrap_err();
        assert!(matches!(rejection, ValidationRejection::Query(_)));
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_query_rejected() {
        let rejection = extract("/x?page=0").await.unwrap_err();
        let ValidationRejection::Validation(ref errors) = rejection else {
            panic!("expected validation rejection");
        };
        assert_eq!(format_validation_errors(errors), "Page must be >= 1");
    }
}
