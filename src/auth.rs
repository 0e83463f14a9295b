//! Viewer identity extraction.
//!
//! Authentication itself lives outside this service: the gateway verifies
//! the session and forwards the viewer's opaque id in a header. Requests
//! without the header are anonymous.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;

pub const HEADER_VIEWER_ID: &str = "x-viewer-id";

/// The verified id of a logged-in viewer. Extraction rejects anonymous
/// requests with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(HEADER_VIEWER_ID)
            .ok_or(AppError::Unauthorized)?
            .to_str()
            .map_err(|_| AppError::Unauthorized)?;

        let id = Uuid::parse_str(raw).map_err(|_| AppError::Unauthorized)?;
        Ok(AuthenticatedUser(id))
    }
}

/// Viewer identity for endpoints that serve anonymous readers too.
/// Never rejects; a missing or malformed header means anonymous.
#[derive(Debug, Clone, Copy)]
pub struct Viewer(pub Option<Uuid>);

#[async_trait]
impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(HEADER_VIEWER_ID)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok());
        Ok(Viewer(id))
    }
}
