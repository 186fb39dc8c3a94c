//! API gateway with sticky fallback to the demo backend.
//!
//! The gateway presents one interface over two interchangeable
//! [`StudentBackend`]s. While the mode is [`ApiMode::Real`] every call goes to
//! the institutional backend first; the first transport or protocol failure
//! flips the mode to [`ApiMode::Mock`] and the same logical operation is
//! answered by the demo backend. The flag stays on `Mock` until a caller
//! explicitly sets it back.

use portal_core::program::sort_catalog;
use portal_core::{
    ApiMode, AuthGrant, Credentials, PortalConfig, PortalError, Profile, Program, Result,
    SessionToken, StudentBackend, decide_source,
};
use portal_interaction::{HttpBackend, MockBackend, MockLatency};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Coordinates the real and demo backends for one logical session.
///
/// # Concurrency
///
/// The mode flag is read at the start of each call and written only after a
/// failure is observed. Overlapping calls may both try the real backend and
/// both record the switch; the write is idempotent.
pub struct ApiGateway {
    real: Arc<dyn StudentBackend>,
    mock: Arc<dyn StudentBackend>,
    mode: RwLock<ApiMode>,
    /// Upper bound for a single real-backend attempt.
    deadline: Duration,
}

impl ApiGateway {
    pub fn new(
        real: Arc<dyn StudentBackend>,
        mock: Arc<dyn StudentBackend>,
        initial_mode: ApiMode,
        deadline: Duration,
    ) -> Self {
        Self {
            real,
            mock,
            mode: RwLock::new(initial_mode),
            deadline,
        }
    }

    /// Builds the HTTP and demo backends described by `config`.
    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        let real = HttpBackend::from_config(config)?;
        let mock = MockBackend::new(MockLatency::from(&config.mock));
        Ok(Self::new(
            Arc::new(real),
            Arc::new(mock),
            config.initial_mode,
            config.request_timeout(),
        ))
    }

    /// Which backend the next call will prefer.
    pub async fn mode(&self) -> ApiMode {
        *self.mode.read().await
    }

    /// Explicit override, e.g. to retry the real backend or force demo mode.
    pub async fn set_mode(&self, mode: ApiMode) {
        let mut current = self.mode.write().await;
        if *current != mode {
            tracing::info!(from = %*current, to = %mode, "API mode changed by request");
        }
        *current = mode;
    }

    /// Lists the program catalog, sorted by `ordering`.
    pub async fn list_programs(&self) -> Result<Vec<Program>> {
        let mut programs = match self.mode().await {
            ApiMode::Real => {
                match self.bounded(self.real_catalog()).await {
                    Ok(programs) => {
                        tracing::info!(count = programs.len(), "Programs loaded from real API");
                        programs
                    }
                    Err(err) => {
                        self.fall_back("list_programs", err).await?;
                        self.mock.list_programs().await?
                    }
                }
            }
            ApiMode::Mock => self.mock.list_programs().await?,
        };

        sort_catalog(&mut programs);
        Ok(programs)
    }

    /// Authenticates a student.
    ///
    /// Incomplete credentials are rejected before any backend is contacted
    /// and never change the mode. Rejected credentials from the demo backend
    /// are returned as [`PortalError::InvalidCredentials`].
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant> {
        credentials.validate()?;

        match self.mode().await {
            ApiMode::Real => match self.bounded(self.real.authenticate(credentials)).await {
                Ok(grant) => {
                    tracing::info!(token = %grant.token.redacted(), "Login succeeded against real API");
                    Ok(grant)
                }
                Err(err) => {
                    self.fall_back("authenticate", err).await?;
                    self.mock.authenticate(credentials).await
                }
            },
            ApiMode::Mock => self.mock.authenticate(credentials).await,
        }
    }

    /// Fetches the profile for `token`.
    ///
    /// Tokens issued by the demo backend always go to the demo backend,
    /// whatever the current mode.
    pub async fn fetch_profile(&self, token: &SessionToken) -> Result<Profile> {
        if token.is_mock() || self.mode().await.is_mock() {
            return self.mock.fetch_profile(token).await;
        }

        match self.bounded(self.real.fetch_profile(token)).await {
            Ok(profile) => {
                tracing::info!("Profile loaded from real API");
                Ok(profile)
            }
            Err(err) => {
                self.fall_back("fetch_profile", err).await?;
                self.mock.fetch_profile(token).await
            }
        }
    }

    /// An empty catalog is as useless as a failed request.
    async fn real_catalog(&self) -> Result<Vec<Program>> {
        let programs = self.real.list_programs().await?;
        if programs.is_empty() {
            return Err(PortalError::protocol("Backend returned an empty program catalog"));
        }
        Ok(programs)
    }

    /// Applies [`decide_source`] to a real-backend failure.
    ///
    /// Returns `Ok(())` when the caller should continue on the demo backend,
    /// or the original error when it must be surfaced.
    async fn fall_back(&self, operation: &'static str, err: PortalError) -> Result<()> {
        let mut mode = self.mode.write().await;
        let next = decide_source(ApiMode::Real, &err);
        if next != ApiMode::Mock {
            return Err(err);
        }

        tracing::warn!(
            operation,
            from = %self.real.kind(),
            to = %self.mock.kind(),
            error = %err,
            "Real API failed, switching to mock data"
        );
        *mode = next;
        Ok(())
    }

    async fn bounded<T, F>(&self, attempt: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.deadline, attempt)
            .await
            .unwrap_or(Err(PortalError::Timeout(self.deadline)))
    }
}
