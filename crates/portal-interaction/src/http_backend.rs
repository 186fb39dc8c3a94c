//! HttpBackend - REST client for the university student API.
//!
//! Talks to the three fixed endpoints under the configured base URL and maps
//! every failure into a typed [`PortalError`]. It never falls back on its
//! own; that decision belongs to the gateway.

use crate::wire::{self, LoginData, LoginRequest};
use async_trait::async_trait;
use portal_core::{
    ApiMode, AuthGrant, Credentials, PortalConfig, PortalError, Profile, Program, Result,
    SessionToken, StudentBackend,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

const PROGRAMS_PATH: &str = "Basic/get_all_programs";
const LOGIN_PATH: &str = "Auth/student_login";
const PROFILE_PATH: &str = "Auth/get_auth";

/// Backend implementation that talks to the institutional HTTP API.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    device: String,
    timeout: Duration,
}

impl HttpBackend {
    /// Creates a backend for `base_url` (e.g. `http://puc.ac.bd:8016/api`).
    pub fn new(base_url: impl Into<String>, device: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortalError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            device: device.into(),
            timeout,
        })
    }

    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.device.clone(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Sends the request and decodes the success envelope.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        let status = response.status();
        tracing::debug!(path, status = status.as_u16(), "Backend responded");

        let body = response
            .text()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        if !status.is_success() {
            return Err(PortalError::HttpStatus {
                status: status.as_u16(),
                message: wire::error_message(&body),
            });
        }

        wire::decode_envelope(&body)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> PortalError {
        if err.is_timeout() {
            PortalError::Timeout(self.timeout)
        } else {
            PortalError::transport(format!("Request to {} failed: {err}", self.base_url))
        }
    }
}

#[async_trait]
impl StudentBackend for HttpBackend {
    fn kind(&self) -> ApiMode {
        ApiMode::Real
    }

    async fn list_programs(&self) -> Result<Vec<Program>> {
        let request = self.client.get(self.endpoint(PROGRAMS_PATH));
        self.send(request, PROGRAMS_PATH).await
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant> {
        let program_id = credentials
            .program_id
            .ok_or_else(|| PortalError::validation("Please select a program"))?;

        let payload = LoginRequest {
            program_id: program_id.to_string(),
            login: credentials.login_name(),
            password: &credentials.password,
            device: &self.device,
        };

        let request = self.client.post(self.endpoint(LOGIN_PATH)).json(&payload);
        let data: LoginData = self.send(request, LOGIN_PATH).await?;

        if data.token.trim().is_empty() {
            return Err(PortalError::protocol("Login response contained no token"));
        }

        let user = data.user_summary();
        Ok(AuthGrant {
            token: SessionToken::real(data.token),
            user,
        })
    }

    async fn fetch_profile(&self, token: &SessionToken) -> Result<Profile> {
        let request = self
            .client
            .get(self.endpoint(PROFILE_PATH))
            .bearer_auth(token.as_str());
        self.send(request, PROFILE_PATH).await
    }
}
