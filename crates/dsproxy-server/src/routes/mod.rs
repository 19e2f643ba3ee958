//! API routes.

pub mod documents;
pub mod health;
pub mod token;

pub use documents::{DownloadRequest, DownloadResponse, download_document_handler};
pub use health::{HealthResponse, health, health_routes, service_info};
pub use token::{REQUIRED_TOKEN_FIELDS, TokenRequest, TokenResponse, get_token_handler};

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::error::ServerError;

/// JSON body extractor for the proxy routes.
///
/// An empty body reads as `{}` so that every field can fall back to server
/// defaults. The content type is not checked. Malformed JSON is rejected as
/// [`ServerError::InvalidJson`]; body-limit rejections keep their own status.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let bytes = if bytes.iter().all(u8::is_ascii_whitespace) {
            Bytes::from_static(b"{}")
        } else {
            bytes
        };

        let Json(value) = Json::<T>::from_bytes(&bytes)
            .map_err(|rejection| ServerError::InvalidJson(rejection.body_text()).into_response())?;
        Ok(JsonBody(value))
    }
}
