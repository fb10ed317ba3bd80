//! Validated query-string extractor.
//!
//! `ValidatedQuery<T>` deserializes the query string and validates it with
//! the `validator` crate. Both malformed parameters and failed validation
//! are answered with the failure envelope and a 400 status.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use billboard_core::{BillboardError, ValidateExt};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query extractor that validates the deserialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T> std::ops::Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError(BillboardError::validation(format!(
                    "Invalid query parameters: {}",
                    rejection.body_text()
                )))
            })?;

        value.validate_request()?;

        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct SearchQuery {
        #[validate(length(max = 5, message = "keyword too long"))]
        keyword: Option<String>,
    }

    async fn extract(uri: &str) -> Result<ValidatedQuery<SearchQuery>, AppError> {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ValidatedQuery::<SearchQuery>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_query_passes() {
        let query = extract("/items?keyword=abc").await.unwrap();
        assert_eq!(query.keyword.as_deref(), Some("abc"));

        let query = extract("/items").await.unwrap();
        assert!(query.keyword.is_none());
    }

    #[tokio::test]
    async fn test_failed_validation_is_bad_request() {
        let AppError(err) = extract("/items?keyword=abcdefgh").await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("keyword: keyword too long"));
    }
}
