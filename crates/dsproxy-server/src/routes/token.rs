//! Token endpoint: `POST /api/get-token` (also served as `POST /token-proxy`).

use axum::{Json, extract::State, http::HeaderMap};
use dsproxy_oauth::{AuthResult, Credentials};
use serde::{Deserialize, Serialize};

use crate::auth::check_app_token;
use crate::config::CredentialDefaults;
use crate::error::{Result, ServerError};
use crate::routes::JsonBody;
use crate::state::AppState;

/// Body fields the token route needs, in wire names.
pub const REQUIRED_TOKEN_FIELDS: [&str; 4] = [
    "dsJWTClientId",
    "impersonatedUserGuid",
    "dsOauthServer",
    "privateKey",
];

/// Token request body. Every field may fall back to a server default.
#[derive(Default, Deserialize)]
pub struct TokenRequest {
    #[serde(rename = "dsJWTClientId", default)]
    pub client_id: Option<String>,
    #[serde(rename = "impersonatedUserGuid", default)]
    pub user_id: Option<String>,
    #[serde(rename = "dsOauthServer", default)]
    pub oauth_server: Option<String>,
    #[serde(rename = "privateKey", default)]
    pub private_key: Option<String>,
}

/// Successful token response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub success: bool,
    #[serde(flatten)]
    pub auth: AuthResult,
}

fn pick(value: Option<String>, default: &Option<String>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .or_else(|| default.clone().filter(|v| !v.trim().is_empty()))
}

impl TokenRequest {
    /// Fill gaps from `defaults` and build credentials.
    pub fn resolve(self, defaults: &CredentialDefaults) -> Result<Credentials> {
        let fields = [
            pick(self.client_id, &defaults.client_id),
            pick(self.user_id, &defaults.user_id),
            pick(self.oauth_server, &defaults.oauth_server),
            pick(self.private_key, &defaults.private_key),
        ];

        let missing: Vec<&'static str> = REQUIRED_TOKEN_FIELDS
            .iter()
            .zip(fields.iter())
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        match fields {
            [Some(client_id), Some(user_id), Some(oauth_server), Some(private_key)] => Ok(
                Credentials::new(client_id, user_id, oauth_server, private_key),
            ),
            _ => Err(ServerError::MissingFields {
                required: REQUIRED_TOKEN_FIELDS.to_vec(),
                missing,
            }),
        }
    }
}

/// Exchange JWT-grant credentials for an access token and default account.
pub async fn get_token_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<TokenRequest>,
) -> Result<Json<TokenResponse>> {
    let config = state.config();

    let client_id = pick(request.client_id.clone(), &config.defaults.client_id);
    check_app_token(&headers, client_id.as_deref(), config.require_app_token)?;

    let credentials = request.resolve(&config.defaults)?;

    tracing::info!(
        client_id = %credentials.client_id,
        oauth_host = credentials.oauth_host(),
        "Authenticating with DocuSign"
    );

    let auth = state
        .provider
        .exchange_token(&credentials)
        .await
        .map_err(ServerError::Auth)?;

    tracing::info!(account_id = %auth.account_id, "Authentication succeeded");

    Ok(Json(TokenResponse {
        success: true,
        auth,
    }))
}
