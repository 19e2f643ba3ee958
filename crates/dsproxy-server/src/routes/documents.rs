//! Document endpoint: `POST /download-document`.

use axum::{Json, extract::State};
use dsproxy_oauth::{AuthInfo, fetch_document_base64};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};
use crate::routes::JsonBody;
use crate::state::AppState;

const REQUIRED_DOWNLOAD_FIELDS: [&str; 4] = [
    "authInfo.accessToken",
    "authInfo.basePath",
    "authInfo.apiAccountId",
    "envelopeId",
];

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PartialAuthInfo {
    access_token: Option<String>,
    base_path: Option<String>,
    api_account_id: Option<String>,
}

/// Download request body.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadRequest {
    auth_info: Option<PartialAuthInfo>,
    envelope_id: Option<String>,
}

/// Successful download response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub success: bool,
    pub document_base64: String,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl DownloadRequest {
    fn resolve(self) -> Result<(AuthInfo, String)> {
        let auth = self.auth_info.unwrap_or_default();
        let fields = [
            present(auth.access_token),
            present(auth.base_path),
            present(auth.api_account_id),
            present(self.envelope_id),
        ];

        let missing: Vec<&'static str> = REQUIRED_DOWNLOAD_FIELDS
            .iter()
            .zip(fields.iter())
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        match fields {
            [
                Some(access_token),
                Some(base_path),
                Some(api_account_id),
                Some(envelope_id),
            ] => Ok((
                AuthInfo {
                    access_token,
                    base_path,
                    api_account_id,
                },
                envelope_id,
            )),
            _ => Err(ServerError::MissingFields {
                required: REQUIRED_DOWNLOAD_FIELDS.to_vec(),
                missing,
            }),
        }
    }
}

/// Fetch an envelope's combined document and return it as base64.
pub async fn download_document_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<DownloadRequest>,
) -> Result<Json<DownloadResponse>> {
    let (auth, envelope_id) = request.resolve()?;

    tracing::info!(envelope_id = %envelope_id, "Requesting envelope document");

    let document_base64 = fetch_document_base64(state.provider.as_ref(), &auth, &envelope_id)
        .await
        .map_err(ServerError::Download)?;

    Ok(Json(DownloadResponse {
        success: true,
        document_base64,
    }))
}
