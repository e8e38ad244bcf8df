//! Caller identity.
//!
//! Authentication itself happens upstream; by the time a request reaches this
//! service the session holder's id travels in the `x-owner-id` header. A
//! handler that takes an [`Owner`] rejects requests without a valid one.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

pub const OWNER_HEADER: &str = "x-owner-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        Uuid::parse_str(raw.trim())
            .map(Owner)
            .map_err(|_| AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<Owner, AppError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(OWNER_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        Owner::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_header() {
        let id = Uuid::new_v4();
        assert_eq!(extract(Some(&id.to_string())).await.unwrap(), Owner(id));
    }

    #[tokio::test]
    async fn test_missing_or_malformed_header() {
        assert!(matches!(extract(None).await, Err(AppError::Unauthorized)));
        assert!(matches!(extract(Some("not-a-uuid")).await, Err(AppError::Unauthorized)));
    }
}
